use crate::config::{RuntimeConfig, INTER_PHRASE_PAUSE_MS};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Typing,
    Deleting,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypingTimings {
    pub type_ms: u32,
    pub delete_ms: u32,
    pub pause_ms: u32,
    pub inter_phrase_ms: u32,
}

impl TypingTimings {
    pub fn from_config(config: &RuntimeConfig) -> Self {
        Self {
            type_ms: config.type_speed_ms,
            delete_ms: config.delete_speed_ms,
            pause_ms: config.pause_ms,
            inter_phrase_ms: INTER_PHRASE_PAUSE_MS,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypingFrame {
    pub text: String,
    pub next_delay_ms: u32,
    pub cursor_visible: bool,
}

#[derive(Clone, Debug)]
pub struct TypingAnimator {
    phrases: Vec<String>,
    timings: TypingTimings,
    phrase: usize,
    cursor: usize,
    direction: Direction,
    between_phrases: bool,
    paused: bool,
}

impl TypingAnimator {
    pub fn new(phrases: Vec<String>, timings: TypingTimings) -> Self {
        Self {
            phrases,
            timings,
            phrase: 0,
            cursor: 0,
            direction: Direction::Typing,
            between_phrases: false,
            paused: false,
        }
    }

    pub fn phrase_index(&self) -> usize {
        self.phrase
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    pub fn push_phrase(&mut self, phrase: impl Into<String>) {
        self.phrases.push(phrase.into());
    }

    pub fn clear_phrases(&mut self) {
        self.phrases.clear();
        self.phrase = 0;
        self.cursor = 0;
        self.direction = Direction::Typing;
        self.between_phrases = false;
    }

    pub fn cursor_visible(&self) -> bool {
        !self.between_phrases
    }

    // Advances one character. Returns `None` while paused or when there is
    // nothing to cycle through; the state is left untouched in both cases.
    pub fn tick(&mut self) -> Option<TypingFrame> {
        if self.paused || self.phrases.is_empty() {
            return None;
        }

        let phrase = &self.phrases[self.phrase % self.phrases.len()];
        let length = phrase.chars().count();

        let next_delay_ms = match self.direction {
            Direction::Typing => {
                self.between_phrases = false;
                if self.cursor < length {
                    self.cursor += 1;
                }

                if self.cursor >= length {
                    self.direction = Direction::Deleting;
                    self.timings.pause_ms
                } else {
                    self.timings.type_ms
                }
            }
            Direction::Deleting => {
                self.cursor = self.cursor.saturating_sub(1);

                if self.cursor == 0 {
                    self.direction = Direction::Typing;
                    self.between_phrases = true;
                    self.phrase = (self.phrase + 1) % self.phrases.len();
                    self.timings.inter_phrase_ms
                } else {
                    self.timings.delete_ms
                }
            }
        };

        let text = phrase.chars().take(self.cursor).collect();

        Some(TypingFrame {
            text,
            next_delay_ms,
            cursor_visible: self.cursor_visible(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timings() -> TypingTimings {
        TypingTimings {
            type_ms: 100,
            delete_ms: 50,
            pause_ms: 2_000,
            inter_phrase_ms: 500,
        }
    }

    fn animator(phrases: &[&str]) -> TypingAnimator {
        TypingAnimator::new(phrases.iter().map(|p| p.to_string()).collect(), timings())
    }

    #[test]
    fn two_phrase_scenario_renders_expected_sequence() {
        let mut typing = animator(&["a", "bb"]);
        let frames: Vec<(String, u32)> = (0..8)
            .map(|_| {
                let frame = typing.tick().expect("non-empty list ticks");
                (frame.text, frame.next_delay_ms)
            })
            .collect();

        let expected = [
            ("a", 2_000),
            ("", 500),
            ("b", 100),
            ("bb", 2_000),
            ("b", 50),
            ("", 500),
            ("a", 2_000),
            ("", 500),
        ];
        let expected: Vec<(String, u32)> = expected
            .iter()
            .map(|(text, delay)| (text.to_string(), *delay))
            .collect();

        assert_eq!(frames, expected);
    }

    #[test]
    fn full_cycle_returns_to_next_phrase_start() {
        let mut typing = animator(&["hello", "x", "yz"]);
        let length = "hello".len();

        // type 5 chars, then delete 5 chars
        for _ in 0..(length * 2) {
            typing.tick();
        }

        assert_eq!(typing.phrase_index(), 1);
        assert_eq!(typing.cursor(), 0);
        assert_eq!(typing.direction(), Direction::Typing);
    }

    #[test]
    fn cycle_never_skips_or_repeats_characters() {
        let mut typing = animator(&["abc"]);
        let texts: Vec<String> = (0..6).map(|_| typing.tick().map(|f| f.text).unwrap_or_default()).collect();
        assert_eq!(texts, ["a", "ab", "abc", "ab", "a", ""]);
    }

    #[test]
    fn multibyte_phrases_advance_per_character() {
        let mut typing = animator(&["ção"]);
        let texts: Vec<String> = (0..3).map(|_| typing.tick().map(|f| f.text).unwrap_or_default()).collect();
        assert_eq!(texts, ["ç", "çã", "ção"]);
    }

    #[test]
    fn paused_animator_holds_state() {
        let mut typing = animator(&["abc"]);
        typing.tick();
        typing.set_paused(true);

        assert!(typing.tick().is_none());
        assert_eq!(typing.cursor(), 1);

        typing.set_paused(false);
        assert_eq!(typing.tick().map(|f| f.text).as_deref(), Some("ab"));
    }

    #[test]
    fn empty_phrase_list_never_ticks() {
        let mut typing = animator(&[]);
        assert!(typing.tick().is_none());
        assert_eq!(typing.cursor(), 0);
    }

    #[test]
    fn empty_phrase_inside_list_pauses_then_advances() {
        let mut typing = animator(&["", "a"]);

        let first = typing.tick().expect("ticks");
        assert_eq!(first.text, "");
        assert_eq!(first.next_delay_ms, 2_000);

        let second = typing.tick().expect("ticks");
        assert_eq!(second.next_delay_ms, 500);
        assert_eq!(typing.phrase_index(), 1);
    }

    #[test]
    fn cursor_hidden_between_phrases_only() {
        let mut typing = animator(&["ab", "c"]);
        let visibility: Vec<bool> = (0..5)
            .map(|_| typing.tick().expect("ticks").cursor_visible)
            .collect();

        assert_eq!(visibility, [true, true, true, false, true]);
        assert!(typing.cursor_visible());
    }

    #[test]
    fn clearing_phrases_resets_and_guards() {
        let mut typing = animator(&["abc", "d"]);
        typing.tick();
        typing.clear_phrases();
        assert!(typing.is_empty());
        assert!(typing.tick().is_none());

        typing.push_phrase("z");
        assert_eq!(typing.tick().map(|f| f.text).as_deref(), Some("z"));
    }
}

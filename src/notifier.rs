#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    pub fn class(self) -> &'static str {
        match self {
            Self::Success => "toast--success",
            Self::Error => "toast--error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToastState {
    pub message: String,
    pub kind: ToastKind,
    pub visible: bool,
    generation: u64,
}

impl Default for ToastState {
    fn default() -> Self {
        Self {
            message: String::new(),
            kind: ToastKind::Success,
            visible: false,
            generation: 0,
        }
    }
}

impl ToastState {
    pub fn show(&mut self, message: impl Into<String>, kind: ToastKind) -> u64 {
        self.message = message.into();
        self.kind = kind;
        self.visible = true;
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }

    // Hides the toast if `generation` is still the latest show. Returns
    // whether anything changed.
    pub fn hide(&mut self, generation: u64) -> bool {
        if generation != self.generation || !self.visible {
            return false;
        }

        self.visible = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_then_hide_round_trip() {
        let mut toast = ToastState::default();
        let generation = toast.show("Tudo certo!", ToastKind::Success);

        assert!(toast.visible);
        assert_eq!(toast.kind.class(), "toast--success");
        assert!(toast.hide(generation));
        assert!(!toast.visible);
    }

    #[test]
    fn last_call_wins() {
        let mut toast = ToastState::default();
        let first = toast.show("first", ToastKind::Success);
        let second = toast.show("second", ToastKind::Error);

        assert!(!toast.hide(first));
        assert!(toast.visible);
        assert_eq!(toast.message, "second");
        assert_eq!(toast.kind, ToastKind::Error);
        assert!(toast.hide(second));
    }

    #[test]
    fn hiding_twice_reports_no_change() {
        let mut toast = ToastState::default();
        let generation = toast.show("done", ToastKind::Success);
        assert!(toast.hide(generation));
        assert!(!toast.hide(generation));
    }
}

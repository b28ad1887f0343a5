pub const AUTO_SCROLL_STEP: f64 = 0.5;
pub const DRAG_MULTIPLIER: f64 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SliderStep {
    Hold,
    Advance(f64),
    WrapToStart,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SliderState {
    amount: f64,
    paused: bool,
    drag: Option<DragAnchor>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct DragAnchor {
    start_x: f64,
    start_scroll: f64,
}

impl SliderState {
    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn step(&mut self, max_scroll: f64) -> SliderStep {
        if self.paused {
            return SliderStep::Hold;
        }

        if self.amount >= max_scroll {
            self.amount = 0.0;
            SliderStep::WrapToStart
        } else {
            self.amount += AUTO_SCROLL_STEP;
            SliderStep::Advance(self.amount)
        }
    }

    pub fn begin_drag(&mut self, x: f64, scroll_left: f64) {
        self.drag = Some(DragAnchor {
            start_x: x,
            start_scroll: scroll_left,
        });
    }

    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn drag_to(&self, x: f64) -> Option<f64> {
        let anchor = self.drag?;
        Some(anchor.start_scroll - (x - anchor.start_x) * DRAG_MULTIPLIER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_half_pixel_per_frame() {
        let mut slider = SliderState::default();
        assert_eq!(slider.step(10.0), SliderStep::Advance(0.5));
        assert_eq!(slider.step(10.0), SliderStep::Advance(1.0));
    }

    #[test]
    fn wraps_once_end_is_reached() {
        let mut slider = SliderState::default();
        for _ in 0..4 {
            slider.step(2.0);
        }

        assert_eq!(slider.amount(), 2.0);
        assert_eq!(slider.step(2.0), SliderStep::WrapToStart);
        assert_eq!(slider.amount(), 0.0);
        assert_eq!(slider.step(2.0), SliderStep::Advance(0.5));
    }

    #[test]
    fn hover_pause_holds_position() {
        let mut slider = SliderState::default();
        slider.step(10.0);
        slider.set_paused(true);

        assert_eq!(slider.step(10.0), SliderStep::Hold);
        assert_eq!(slider.amount(), 0.5);
    }

    #[test]
    fn drag_scrolls_twice_the_pointer_distance() {
        let mut slider = SliderState::default();
        assert_eq!(slider.drag_to(50.0), None);

        slider.begin_drag(100.0, 300.0);
        assert_eq!(slider.drag_to(80.0), Some(340.0));
        assert_eq!(slider.drag_to(130.0), Some(240.0));

        slider.end_drag();
        assert!(!slider.is_dragging());
    }
}

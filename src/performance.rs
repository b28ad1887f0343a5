use crate::config::{FPS_WINDOW_MS, REDUCED_MOTION_FPS};

const STALE_WINDOW_MS: f64 = FPS_WINDOW_MS * 2.0;

#[derive(Clone, Copy, Debug)]
pub struct FpsSampler {
    frames: u32,
    window_start: f64,
}

impl FpsSampler {
    pub fn new(now: f64) -> Self {
        Self {
            frames: 0,
            window_start: now,
        }
    }

    pub fn record_frame(&mut self, now: f64) -> Option<u32> {
        self.frames += 1;
        let elapsed = now - self.window_start;

        if elapsed < FPS_WINDOW_MS {
            return None;
        }
        // A hidden tab stalls frames; a window that long says nothing about
        // render speed.
        if elapsed > STALE_WINDOW_MS {
            self.frames = 0;
            self.window_start = now;
            return None;
        }

        let fps = (f64::from(self.frames) * 1_000.0 / elapsed).round() as u32;
        self.frames = 0;
        self.window_start = now;
        Some(fps)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct MotionPolicy {
    reduced: bool,
}

impl MotionPolicy {
    pub fn is_reduced(self) -> bool {
        self.reduced
    }

    // True only on the first flip.
    pub fn reduce(&mut self) -> bool {
        !std::mem::replace(&mut self.reduced, true)
    }

    pub fn observe_fps(&mut self, fps: u32) -> bool {
        fps < REDUCED_MOTION_FPS && self.reduce()
    }

    pub fn keeps_sampling(self) -> bool {
        !self.reduced
    }
}

pub const REDUCED_MOTION_STYLES: &str = "
    .service-card, .dashboard-card, .portfolio-item {
        will-change: transform, opacity;
    }

    .reduced-motion * {
        animation-duration: 0.01ms !important;
        animation-iteration-count: 1 !important;
        transition-duration: 0.01ms !important;
    }
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixty_frames_in_one_second_reports_sixty() {
        let mut sampler = FpsSampler::new(0.0);
        let mut reported = None;

        for frame in 1..=60u32 {
            reported = sampler.record_frame(f64::from(frame) * 1_000.0 / 60.0);
        }

        assert_eq!(reported, Some(60));
    }

    #[test]
    fn incomplete_window_reports_nothing() {
        let mut sampler = FpsSampler::new(0.0);
        assert_eq!(sampler.record_frame(500.0), None);
        assert_eq!(sampler.record_frame(999.0), None);
        assert_eq!(sampler.record_frame(1_000.0), Some(3));
    }

    #[test]
    fn window_resets_after_report() {
        let mut sampler = FpsSampler::new(0.0);
        sampler.record_frame(1_000.0);
        assert_eq!(sampler.record_frame(1_500.0), None);
        assert_eq!(sampler.record_frame(2_000.0), Some(2));
    }

    #[test]
    fn window_spanning_a_background_gap_is_discarded() {
        let mut sampler = FpsSampler::new(0.0);
        sampler.record_frame(16.0);
        assert_eq!(sampler.record_frame(5_016.0), None);

        let mut reported = None;
        for frame in 1..=60u32 {
            reported = sampler.record_frame(5_016.0 + f64::from(frame) * 1_000.0 / 60.0);
        }
        assert_eq!(reported, Some(60));
    }

    #[test]
    fn window_just_under_the_stale_limit_still_reports() {
        let mut sampler = FpsSampler::new(0.0);
        assert_eq!(sampler.record_frame(2_000.0), Some(1));
    }

    #[test]
    fn sampling_stops_once_motion_is_reduced() {
        let mut policy = MotionPolicy::default();
        assert!(policy.keeps_sampling());
        policy.observe_fps(20);
        assert!(!policy.keeps_sampling());
    }

    #[test]
    fn slow_frames_reduce_motion_once() {
        let mut policy = MotionPolicy::default();

        assert!(!policy.observe_fps(58));
        assert!(policy.observe_fps(24));
        assert!(!policy.observe_fps(12));
        assert!(policy.is_reduced());
    }

    #[test]
    fn reduced_motion_never_reverts() {
        let mut policy = MotionPolicy::default();
        policy.reduce();
        policy.observe_fps(60);
        assert!(policy.is_reduced());
    }
}

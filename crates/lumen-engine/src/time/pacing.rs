use std::time::{Duration, Instant};

/// Fixed-interval frame pacer.
///
/// Computes the deadline for the next frame so the event loop can sleep with
/// `ControlFlow::WaitUntil` instead of busy-redrawing.
#[derive(Debug, Clone)]
pub struct FramePacer {
    interval: Duration,
    next: Option<Instant>,
}

impl FramePacer {
    pub fn new(interval: Duration) -> Self {
        Self { interval, next: None }
    }

    /// Pacer targeting `fps` frames per second.
    pub fn from_fps(fps: u32) -> Self {
        Self::new(Duration::from_secs_f64(1.0 / fps.max(1) as f64))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns true when a frame is due at `now`.
    pub fn is_due(&self, now: Instant) -> bool {
        self.next.is_none_or(|deadline| now >= deadline)
    }

    /// Records a frame at `now` and returns the next deadline.
    ///
    /// If the loop fell behind by more than one interval the schedule is
    /// rebased on `now` rather than firing a burst of catch-up frames.
    pub fn frame_presented(&mut self, now: Instant) -> Instant {
        let next = match self.next {
            Some(prev) if now < prev + self.interval => prev + self.interval,
            _ => now + self.interval,
        };
        self.next = Some(next);
        next
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_is_due_immediately() {
        let p = FramePacer::from_fps(60);
        assert!(p.is_due(Instant::now()));
    }

    #[test]
    fn from_fps_sixty_is_about_16ms() {
        let p = FramePacer::from_fps(60);
        let ms = p.interval().as_secs_f64() * 1000.0;
        assert!((ms - 16.667).abs() < 0.01);
    }

    #[test]
    fn deadlines_advance_by_interval() {
        let mut p = FramePacer::new(Duration::from_millis(10));
        let t0 = Instant::now();
        let d1 = p.frame_presented(t0);
        assert_eq!(d1, t0 + Duration::from_millis(10));
        assert!(!p.is_due(t0 + Duration::from_millis(5)));
        assert!(p.is_due(d1));

        let d2 = p.frame_presented(t0 + Duration::from_millis(11));
        assert_eq!(d2, t0 + Duration::from_millis(20));
    }

    #[test]
    fn falling_behind_rebases_schedule() {
        let mut p = FramePacer::new(Duration::from_millis(10));
        let t0 = Instant::now();
        p.frame_presented(t0);
        let late = t0 + Duration::from_millis(100);
        assert_eq!(p.frame_presented(late), late + Duration::from_millis(10));
    }

    #[test]
    fn zero_fps_does_not_divide_by_zero() {
        let p = FramePacer::from_fps(0);
        assert_eq!(p.interval(), Duration::from_secs(1));
    }
}

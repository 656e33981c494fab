use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time since the previous tick, in seconds (clamped).
    pub dt: f32,

    /// Seconds since the clock was created. Not clamped.
    pub elapsed: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter, starting at 0.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// Delta time is clamped so a debugger pause or a minimized window does not
/// feed a huge step into the particle integrator.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    /// Creates a clock clamping dt to `[100µs, 250ms]`.
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    /// Creates a clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        let now = Instant::now();
        Self {
            start: now,
            last: now,
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    pub(crate) fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);

        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            elapsed: now.saturating_duration_since(self.start).as_secs_f32(),
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn frame_index_counts_from_zero() {
        let mut c = FrameClock::new();
        let t0 = c.start;
        assert_eq!(c.tick_at(t0 + Duration::from_millis(16)).frame_index, 0);
        assert_eq!(c.tick_at(t0 + Duration::from_millis(32)).frame_index, 1);
        assert_eq!(c.tick_at(t0 + Duration::from_millis(48)).frame_index, 2);
    }

    #[test]
    fn dt_is_time_since_previous_tick() {
        let mut c = FrameClock::new();
        let t0 = c.start;
        c.tick_at(t0 + Duration::from_millis(10));
        let ft = c.tick_at(t0 + Duration::from_millis(30));
        assert!(approx(ft.dt, 0.020));
    }

    #[test]
    fn dt_clamped_to_maximum_after_stall() {
        let mut c = FrameClock::new();
        let ft = c.tick_at(c.start + Duration::from_secs(5));
        assert!(approx(ft.dt, 0.25));
        // elapsed is the wall clock, not the clamped sum
        assert!(approx(ft.elapsed, 5.0));
    }

    #[test]
    fn dt_clamped_to_minimum_for_identical_instants() {
        let mut c = FrameClock::new();
        let t = c.start;
        let ft = c.tick_at(t);
        assert!(approx(ft.dt, 0.0001));
    }

    #[test]
    fn custom_clamps_respected() {
        let mut c = FrameClock::with_clamps(Duration::from_millis(1), Duration::from_millis(5));
        let ft = c.tick_at(c.start + Duration::from_millis(100));
        assert!(approx(ft.dt, 0.005));
    }

    #[test]
    fn elapsed_accumulates_across_ticks() {
        let mut c = FrameClock::new();
        let t0 = c.start;
        c.tick_at(t0 + Duration::from_millis(500));
        let ft = c.tick_at(t0 + Duration::from_millis(1500));
        assert!(approx(ft.elapsed, 1.5));
    }
}

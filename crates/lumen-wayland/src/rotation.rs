/// Triangle rotation in whole degrees, stepped once per frame.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rotation {
    degrees: f32,
}

impl Rotation {
    pub const STEP_DEGREES: f32 = 1.0;

    pub fn degrees(&self) -> f32 {
        self.degrees
    }

    pub fn radians(&self) -> f32 {
        self.degrees.to_radians()
    }

    /// Steps forward one frame, wrapping back to 0 at a full turn.
    pub fn advance(&mut self) {
        self.degrees += Self::STEP_DEGREES;
        if self.degrees >= 360.0 {
            self.degrees = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let r = Rotation::default();
        assert_eq!(r.degrees(), 0.0);
        assert_eq!(r.radians(), 0.0);
    }

    #[test]
    fn one_degree_per_frame() {
        let mut r = Rotation::default();
        r.advance();
        r.advance();
        assert_eq!(r.degrees(), 2.0);
        assert!((r.radians() - 2.0f32.to_radians()).abs() < 1e-6);
    }

    #[test]
    fn wraps_at_full_turn() {
        let mut r = Rotation::default();
        for _ in 0..359 {
            r.advance();
        }
        assert_eq!(r.degrees(), 359.0);
        r.advance();
        assert_eq!(r.degrees(), 0.0);
    }

    #[test]
    fn never_reaches_360() {
        let mut r = Rotation::default();
        for _ in 0..1000 {
            r.advance();
            assert!((0.0..360.0).contains(&r.degrees()));
        }
    }
}

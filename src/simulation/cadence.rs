//! Frame-to-generation pacing
//!
//! An interactive front end renders far more often than the simulation should
//! advance. [`StepCadence`] turns a stream of frame ticks into generation steps.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepCadence {
    frames_per_generation: u32,
    frames_since_step: u32,
}

impl StepCadence {
    /// `frames_per_generation` of 0 is treated as 1 (step on every frame)
    pub fn new(frames_per_generation: u32) -> Self {
        Self {
            frames_per_generation: frames_per_generation.max(1),
            frames_since_step: 0,
        }
    }

    pub fn frames_per_generation(&self) -> u32 {
        self.frames_per_generation
    }

    /// Registers one rendered frame and returns whether a generation is due
    pub fn tick(&mut self) -> bool {
        self.frames_since_step += 1;
        if self.frames_since_step >= self.frames_per_generation {
            self.frames_since_step = 0;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.frames_since_step = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_every_nth_frame() {
        let mut cadence = StepCadence::new(3);
        let due: Vec<bool> = (0..7).map(|_| cadence.tick()).collect();
        assert_eq!(due, vec![false, false, true, false, false, true, false]);
    }

    #[test]
    fn test_single_frame_cadence_always_steps() {
        let mut cadence = StepCadence::new(1);
        assert!((0..5).all(|_| cadence.tick()));
    }

    #[test]
    fn test_zero_is_clamped() {
        let cadence = StepCadence::new(0);
        assert_eq!(cadence.frames_per_generation(), 1);
    }

    #[test]
    fn test_reset_restarts_count() {
        let mut cadence = StepCadence::new(2);
        assert!(!cadence.tick());
        cadence.reset();
        assert!(!cadence.tick());
        assert!(cadence.tick());
    }
}

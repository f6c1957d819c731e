use crate::constants::{MAX_FRAME_SECONDS, MAX_STEPS_PER_FRAME, TICK_SECONDS};

/// Fixed-timestep accumulator for the frame loop.
#[derive(Clone, Debug)]
pub struct StepClock {
    pub step: f32,
    pub max_steps: u32,
    pub max_frame: f32,
    accum: f32,
}

impl Default for StepClock {
    fn default() -> Self {
        Self::new(TICK_SECONDS, MAX_STEPS_PER_FRAME, MAX_FRAME_SECONDS)
    }
}

impl StepClock {
    pub fn new(step: f32, max_steps: u32, max_frame: f32) -> Self {
        Self {
            step,
            max_steps,
            max_frame,
            accum: 0.0,
        }
    }

    /// Add a frame delta and return how many fixed steps to run now.
    /// Backlog beyond `max_steps` is dropped.
    pub fn advance(&mut self, dt_seconds: f32) -> u32 {
        if !(dt_seconds.is_finite() && dt_seconds > 0.0) {
            return 0;
        }
        self.accum += dt_seconds.min(self.max_frame);
        let mut n = 0;
        while self.accum >= self.step && n < self.max_steps {
            self.accum -= self.step;
            n += 1;
        }
        if n == self.max_steps {
            self.accum = self.accum.min(self.step);
        }
        n
    }

    pub fn reset(&mut self) {
        self.accum = 0.0;
    }
}

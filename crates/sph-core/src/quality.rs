/// Weight of the newest frame in the running average.
const SMOOTHING: f32 = 0.3;
/// Fraction of the budget below which a frame counts as cheap.
const CHEAP_FRACTION: f32 = 0.6;
/// Cheap frames in a row needed before one substep is given back.
const CHEAP_STREAK: u32 = 30;

/// How the running average compares to the budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Load {
    Over,
    Cheap,
    Steady,
}

/// Trades substeps for frame time.
///
/// The host feeds it the measured cost of every frame. Sustained overruns
/// shed one substep per frame down to `min_substeps`; a long run of cheap
/// frames adds one back, never above `max_substeps`.
pub struct AdaptiveQuality {
    /// Frame time the simulation may use, in ms.
    pub budget_ms: f32,
    pub min_substeps: u32,
    pub max_substeps: u32,
    pub enabled: bool,
    current_substeps: u32,
    average_ms: f32,
    cheap_streak: u32,
}

impl AdaptiveQuality {
    /// Controller starting at `max_substeps`, disabled, with an 8 ms budget.
    pub fn new(max_substeps: u32) -> Self {
        let max_substeps = max_substeps.max(1);
        Self {
            budget_ms: 8.0,
            min_substeps: 1,
            max_substeps,
            enabled: false,
            current_substeps: max_substeps,
            average_ms: 0.0,
            cheap_streak: 0,
        }
    }

    /// Substeps the engine should run next frame. Always `max_substeps`
    /// while disabled.
    pub fn substeps(&self) -> u32 {
        if !self.enabled {
            return self.max_substeps;
        }
        self.current_substeps
    }

    pub fn average_ms(&self) -> f32 {
        self.average_ms
    }

    /// Record one frame's cost in ms. Ignored while disabled.
    pub fn update(&mut self, frame_ms: f32) {
        if !self.enabled {
            return;
        }
        self.average_ms += (frame_ms - self.average_ms) * SMOOTHING;

        match self.load() {
            Load::Over => {
                self.cheap_streak = 0;
                self.current_substeps = self
                    .current_substeps
                    .saturating_sub(1)
                    .max(self.min_substeps);
            }
            Load::Cheap => {
                self.cheap_streak += 1;
                if self.cheap_streak > CHEAP_STREAK {
                    self.cheap_streak = 0;
                    self.current_substeps = (self.current_substeps + 1).min(self.max_substeps);
                }
            }
            Load::Steady => self.cheap_streak = 0,
        }
    }

    fn load(&self) -> Load {
        if self.average_ms > self.budget_ms {
            Load::Over
        } else if self.average_ms < self.budget_ms * CHEAP_FRACTION {
            Load::Cheap
        } else {
            Load::Steady
        }
    }

    /// Back to `max_substeps` with no timing history.
    pub fn reset(&mut self) {
        self.current_substeps = self.max_substeps;
        self.average_ms = 0.0;
        self.cheap_streak = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enabled(max_substeps: u32) -> AdaptiveQuality {
        let mut quality = AdaptiveQuality::new(max_substeps);
        quality.enabled = true;
        quality
    }

    #[test]
    fn overrun_sheds_substeps() {
        let mut quality = enabled(4);
        for _ in 0..10 {
            quality.update(12.0);
        }
        assert!(quality.substeps() < 4, "got {}", quality.substeps());
    }

    #[test]
    fn cheap_frames_give_substeps_back() {
        let mut quality = enabled(4);
        quality.current_substeps = 2;
        quality.average_ms = 3.0;

        for _ in 0..100 {
            quality.update(2.0);
        }

        assert!(quality.substeps() > 2, "got {}", quality.substeps());
        assert!(quality.substeps() <= 4);
    }

    #[test]
    fn one_substep_per_cheap_streak() {
        let mut quality = enabled(4);
        quality.current_substeps = 1;

        for _ in 0..CHEAP_STREAK {
            quality.update(1.0);
        }
        assert_eq!(quality.substeps(), 1);

        quality.update(1.0);
        assert_eq!(quality.substeps(), 2);
    }

    #[test]
    fn steady_frame_breaks_the_streak() {
        let mut quality = enabled(4);
        quality.current_substeps = 1;

        for _ in 0..CHEAP_STREAK {
            quality.update(1.0);
        }
        // Pull the average into the 60..100 % band for one frame.
        quality.average_ms = 6.0;
        quality.update(6.0);
        quality.update(1.0);

        assert_eq!(quality.substeps(), 1);
    }

    #[test]
    fn disabled_reports_max_and_keeps_no_history() {
        let mut quality = AdaptiveQuality::new(3);
        assert!(!quality.enabled);
        quality.update(1000.0);
        assert_eq!(quality.substeps(), 3);
        assert_eq!(quality.average_ms(), 0.0);
    }

    #[test]
    fn never_below_minimum() {
        let mut quality = enabled(4);
        quality.min_substeps = 2;
        for _ in 0..100 {
            quality.update(100.0);
        }
        assert_eq!(quality.substeps(), 2);
    }

    #[test]
    fn reset_returns_to_max() {
        let mut quality = enabled(5);
        for _ in 0..20 {
            quality.update(50.0);
        }
        assert!(quality.substeps() < 5);

        quality.reset();
        assert_eq!(quality.substeps(), 5);
        assert_eq!(quality.average_ms(), 0.0);
    }
}

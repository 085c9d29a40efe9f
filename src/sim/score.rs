//! Obstacle speed escalation driven by score thresholds

use crate::config::GameConfig;

/// Current obstacle speed and how many score thresholds have been applied
#[derive(Debug, Clone, PartialEq)]
pub struct Difficulty {
    speed: f32,
    thresholds_applied: u32,
}

impl Difficulty {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            speed: config.base_speed,
            thresholds_applied: 0,
        }
    }

    pub fn reset(&mut self, config: &GameConfig) {
        *self = Self::new(config);
    }

    /// % of playfield width per reference frame
    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Apply every threshold `score` has crossed since the last call.
    ///
    /// Each positive multiple of `speedup_every` applies exactly once, however
    /// often it is observed. Returns the new speed if it changed.
    pub fn on_score(&mut self, score: u32, config: &GameConfig) -> Option<f32> {
        let reached = score / config.speedup_every;
        let before = self.speed;
        while self.thresholds_applied < reached {
            self.thresholds_applied += 1;
            self.speed = (self.speed + config.speed_step).min(config.max_speed);
        }
        (self.speed > before).then_some(self.speed)
    }
}

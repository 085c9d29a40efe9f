//! Game tuning
//!
//! Every gameplay constant lives here so a page (or a JSON file on native)
//! can override it. Defaults come from [`crate::consts`].

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Playfield geometry in px, shared by collision and rendering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
    /// Distance from the bottom edge to the ground line
    pub ground_inset: f32,
    /// Fixed left edge of the character
    pub character_left: f32,
    /// Character box is square
    pub character_size: f32,
    pub obstacle_width: f32,
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,
            ground_inset: GROUND_INSET,
            character_left: CHARACTER_LEFT,
            character_size: CHARACTER_SIZE,
            obstacle_width: OBSTACLE_WIDTH,
        }
    }
}

impl Playfield {
    /// Y coordinate of the ground line (screen space, y down)
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.height - self.ground_inset
    }
}

/// All gameplay tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Physics ===
    pub reference_frame_ms: f64,
    pub gravity: f32,
    pub gravity_damping: f32,
    pub jump_impulse: f32,
    pub max_height: f32,
    pub start_position: f32,

    // === Obstacles ===
    pub spawn_interval_ms: f64,
    pub spawn_position: f32,
    pub prune_position: f32,
    pub min_obstacle_height: f32,
    pub max_obstacle_height: f32,

    // === Score & difficulty ===
    pub score_interval_ms: f64,
    pub base_speed: f32,
    pub speed_step: f32,
    pub max_speed: f32,
    pub speedup_every: u32,

    // === Collision ===
    pub collision_margin: f32,
    pub playfield: Playfield,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            reference_frame_ms: REFERENCE_FRAME_MS,
            gravity: GRAVITY,
            gravity_damping: GRAVITY_DAMPING,
            jump_impulse: JUMP_IMPULSE,
            max_height: MAX_HEIGHT,
            start_position: START_POSITION,

            spawn_interval_ms: SPAWN_INTERVAL_MS,
            spawn_position: SPAWN_POSITION,
            prune_position: PRUNE_POSITION,
            min_obstacle_height: MIN_OBSTACLE_HEIGHT,
            max_obstacle_height: MAX_OBSTACLE_HEIGHT,

            score_interval_ms: SCORE_INTERVAL_MS,
            base_speed: BASE_SPEED,
            speed_step: SPEED_STEP,
            max_speed: MAX_SPEED,
            speedup_every: SPEEDUP_EVERY,

            collision_margin: COLLISION_MARGIN,
            playfield: Playfield::default(),
        }
    }
}

/// Why a configuration was rejected
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Input was not valid JSON for [`GameConfig`]
    Parse(String),
    /// A field is outside the range the simulation supports
    OutOfRange { field: &'static str, reason: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "invalid config json: {msg}"),
            Self::OutOfRange { field, reason } => write!(f, "config field `{field}` {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            reason: "must be a positive number",
        })
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            reason: "must be finite",
        })
    }
}

impl GameConfig {
    /// Parse and validate a JSON config; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every tunable is usable by the simulation
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("reference_frame_ms", self.reference_frame_ms)?;
        positive("spawn_interval_ms", self.spawn_interval_ms)?;
        positive("score_interval_ms", self.score_interval_ms)?;
        positive("max_height", self.max_height as f64)?;
        positive("min_obstacle_height", self.min_obstacle_height as f64)?;
        positive("base_speed", self.base_speed as f64)?;
        finite("gravity", self.gravity)?;
        finite("gravity_damping", self.gravity_damping)?;
        finite("jump_impulse", self.jump_impulse)?;
        finite("collision_margin", self.collision_margin)?;

        if !(0.0..=self.max_height).contains(&self.start_position) {
            return Err(ConfigError::OutOfRange {
                field: "start_position",
                reason: "must lie within [0, max_height]",
            });
        }
        if !(self.max_obstacle_height > self.min_obstacle_height) {
            return Err(ConfigError::OutOfRange {
                field: "max_obstacle_height",
                reason: "must be greater than min_obstacle_height",
            });
        }
        if !(self.prune_position < self.spawn_position) {
            return Err(ConfigError::OutOfRange {
                field: "prune_position",
                reason: "must be left of spawn_position",
            });
        }
        if !(self.speed_step >= 0.0) {
            return Err(ConfigError::OutOfRange {
                field: "speed_step",
                reason: "must not be negative",
            });
        }
        if !(self.max_speed >= self.base_speed) {
            return Err(ConfigError::OutOfRange {
                field: "max_speed",
                reason: "must be at least base_speed",
            });
        }
        if self.speedup_every == 0 {
            return Err(ConfigError::OutOfRange {
                field: "speedup_every",
                reason: "must be at least 1",
            });
        }
        if !(self.collision_margin >= 0.0) {
            return Err(ConfigError::OutOfRange {
                field: "collision_margin",
                reason: "must not be negative",
            });
        }

        let p = &self.playfield;
        positive("playfield.width", p.width as f64)?;
        positive("playfield.height", p.height as f64)?;
        positive("playfield.character_size", p.character_size as f64)?;
        positive("playfield.obstacle_width", p.obstacle_width as f64)?;
        if !(0.0..p.height).contains(&p.ground_inset) {
            return Err(ConfigError::OutOfRange {
                field: "playfield.ground_inset",
                reason: "must lie within [0, height)",
            });
        }

        Ok(())
    }
}

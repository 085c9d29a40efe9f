//! Dino Jump - A side-scrolling reflex game
//!
//! Core modules:
//! - `sim`: Pure simulation (physics, obstacles, collisions, score, phases)
//! - `session`: Session lifecycle wiring the simulation to host timers
//! - `platform`: Host scheduling abstraction (browser and virtual clock)
//! - `renderer`: 2D canvas rendering and HUD
//! - `config`: Data-driven game tuning

pub mod config;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod sim;

pub use config::{ConfigError, GameConfig, Playfield};
pub use session::Session;

/// Game configuration constants (defaults for [`GameConfig`])
pub mod consts {
    /// Reference frame used to normalize motion (ms)
    pub const REFERENCE_FRAME_MS: f64 = 16.0;

    /// Downward acceleration per reference frame, before damping
    pub const GRAVITY: f32 = 2.0;
    /// Scale applied to gravity each step
    pub const GRAVITY_DAMPING: f32 = 0.1;
    /// Velocity set on jump (negative = up)
    pub const JUMP_IMPULSE: f32 = -5.0;
    /// Lowest character position (% of playfield height from the top)
    pub const MAX_HEIGHT: f32 = 80.0;
    /// Character position at session start
    pub const START_POSITION: f32 = 50.0;

    /// Obstacle spawn cadence (ms)
    pub const SPAWN_INTERVAL_MS: f64 = 2000.0;
    /// Spawn position (% of playfield width)
    pub const SPAWN_POSITION: f32 = 100.0;
    /// Obstacles at or left of this position are removed
    pub const PRUNE_POSITION: f32 = -10.0;
    /// Obstacle height range in px, [min, max)
    pub const MIN_OBSTACLE_HEIGHT: f32 = 40.0;
    pub const MAX_OBSTACLE_HEIGHT: f32 = 120.0;

    /// Obstacle speed (% of width per reference frame)
    pub const BASE_SPEED: f32 = 4.0;
    pub const SPEED_STEP: f32 = 0.5;
    pub const MAX_SPEED: f32 = 12.0;
    /// Speed goes up every time score reaches a multiple of this
    pub const SPEEDUP_EVERY: u32 = 50;
    /// Score cadence (ms per point)
    pub const SCORE_INTERVAL_MS: f64 = 100.0;

    /// Inward collision margin on every side (px)
    pub const COLLISION_MARGIN: f32 = 15.0;

    /// Playfield geometry (px)
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 400.0;
    pub const GROUND_INSET: f32 = 16.0;
    pub const CHARACTER_LEFT: f32 = 80.0;
    pub const CHARACTER_SIZE: f32 = 64.0;
    pub const OBSTACLE_WIDTH: f32 = 30.0;
}

/// Convert a time delta into reference frames
#[inline]
pub fn frames_elapsed(delta_ms: f64, reference_frame_ms: f64) -> f32 {
    (delta_ms / reference_frame_ms) as f32
}

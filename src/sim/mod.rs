//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Time only arrives as host timestamps and timer callbacks
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod game;
pub mod obstacles;
pub mod physics;
pub mod score;
pub mod state;

pub use clock::Clock;
pub use collision::{Aabb, character_box, first_collision, obstacle_box};
pub use game::Game;
pub use obstacles::ObstacleField;
pub use score::Difficulty;
pub use state::{Character, GameEvent, GamePhase, GameState, Obstacle, Snapshot};

//! Game state and core simulation types

use serde::{Deserialize, Serialize};

use super::collision::Aabb;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first jump/start
    #[default]
    Idle,
    /// Active gameplay
    Playing,
    /// Run ended by a collision
    GameOver,
}

/// Phase and scoring, mutated only by [`super::Game`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub score: u32,
    /// Best completed score this page session
    pub high_score: u32,
}

impl GameState {
    #[inline]
    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }
}

/// The player character (vertical motion only)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Character {
    /// Top edge as % of playfield height, 0 = top, `max_height` = resting on the ground
    pub position: f32,
    /// % per reference frame, negative = up
    pub velocity: f32,
}

impl Character {
    pub fn new(position: f32) -> Self {
        Self {
            position,
            velocity: 0.0,
        }
    }
}

/// A ground obstacle scrolling right to left
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Creation-order id, never reused
    pub id: u64,
    /// Left edge as % of playfield width
    pub position: f32,
    /// Height in px, fixed at spawn
    pub height: f32,
}

/// Events raised by the simulation for the session to act on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Obstacle speed went up after a score threshold
    SpeedUp { speed: f32 },
    /// A collision ended the run
    GameOver { final_score: u32, high_score: u32 },
}

/// Everything the renderer needs for one frame, as plain values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u32,
    pub high_score: u32,
    pub obstacle_speed: f32,
    /// Character top as % of playfield height
    pub character_position: f32,
    /// Live obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Character box in playfield px
    pub character_box: Aabb,
    /// One box per entry in `obstacles`, same order
    pub obstacle_boxes: Vec<Aabb>,
}

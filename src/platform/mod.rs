//! Platform abstraction layer
//!
//! The session never touches browser APIs directly. A [`Host`] supplies:
//! - Display-synchronized frame callbacks
//! - Fixed-interval timers
//! - Rendering and the game-over notification
//!
//! Every armed callback is stamped with the session epoch it was armed under
//! and comes back through [`crate::Session::dispatch`] as a [`Wakeup`].

use core::fmt;

use serde::Serialize;

use crate::sim::Snapshot;

pub mod virtual_host;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use virtual_host::VirtualHost;

/// The two fixed-cadence timers a session runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Append an obstacle
    Spawn,
    /// Add a point
    Score,
}

/// A callback delivered by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Wakeup {
    /// Display frame with its timestamp (ms)
    Frame { timestamp: f64 },
    Timer(TimerKind),
}

/// Shown to the player when a run ends
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameOverNotice {
    pub title: String,
    pub final_score: u32,
}

impl GameOverNotice {
    pub const TITLE: &'static str = "Game Over";

    pub fn new(final_score: u32) -> Self {
        Self {
            title: Self::TITLE.to_string(),
            final_score,
        }
    }

    /// Toast body text
    pub fn description(&self) -> String {
        format!("Your score: {}", self.final_score)
    }
}

/// Scheduling, rendering and notification services for a session
pub trait Host {
    /// Cancellation token for an armed callback
    type Handle: Copy + Eq + fmt::Debug;

    /// Arm a one-shot callback for the next display frame
    fn request_frame(&mut self, epoch: u64) -> Self::Handle;

    /// Arm a repeating timer firing every `period_ms`
    fn set_interval(&mut self, timer: TimerKind, period_ms: f64, epoch: u64) -> Self::Handle;

    /// Cancel an armed callback. Must be synchronous: a canceled callback
    /// never reaches the session afterwards.
    fn cancel(&mut self, handle: Self::Handle);

    fn render(&mut self, snapshot: &Snapshot);

    fn notify(&mut self, notice: &GameOverNotice);
}

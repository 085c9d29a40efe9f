//! 2D canvas rendering module
//!
//! Draws straight from [`Snapshot`] boxes, so what is on screen is exactly
//! what the collision test sees. DOM-only pieces (HUD, overlays, toast) live
//! in `hud`.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
#[cfg(target_arch = "wasm32")]
pub mod hud;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
#[cfg(target_arch = "wasm32")]
pub use hud::Hud;

use crate::sim::{GamePhase, Snapshot};

/// CSS colors for the canvas
#[derive(Debug, Clone)]
pub struct Palette {
    pub sky: &'static str,
    pub ground: &'static str,
    pub character: &'static str,
    pub character_eye: &'static str,
    pub obstacle: &'static str,
    pub obstacle_band: &'static str,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            sky: "#eff6ff",
            ground: "#a16207",
            character: "#15803d",
            character_eye: "#ffffff",
            obstacle: "#92400e",
            obstacle_band: "rgba(69, 26, 3, 0.3)",
        }
    }
}

/// Which full-playfield overlay is visible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    /// "Press Space to Start"
    Start,
    /// "Game Over" with the final score and a Play Again button
    GameOver { final_score: u32 },
}

impl Overlay {
    pub fn for_snapshot(snapshot: &Snapshot) -> Self {
        match snapshot.phase {
            GamePhase::Idle => Overlay::Start,
            GamePhase::Playing => Overlay::None,
            GamePhase::GameOver => Overlay::GameOver {
                final_score: snapshot.score,
            },
        }
    }
}

/// Y offsets (fractions of height) of the decorative bands on an obstacle
pub const OBSTACLE_BANDS: [f32; 3] = [0.25, 0.5, 0.75];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::Game;

    #[test]
    fn test_overlay_follows_phase() {
        let mut game = Game::new(GameConfig::default(), 9);
        assert_eq!(Overlay::for_snapshot(&game.snapshot()), Overlay::Start);

        game.start();
        assert_eq!(Overlay::for_snapshot(&game.snapshot()), Overlay::None);

        for _ in 0..7 {
            game.score_tick();
        }
        game.frame(0.0);
        game.obstacle_field_mut().place(14.0, 120.0);
        // Fall to the ground so the obstacle connects
        let mut ts = 0.0;
        while game.is_playing() {
            ts += 16.0;
            game.frame(ts);
            if game.obstacles().is_empty() {
                game.obstacle_field_mut().place(14.0, 120.0);
            }
        }
        assert_eq!(
            Overlay::for_snapshot(&game.snapshot()),
            Overlay::GameOver { final_score: 7 }
        );
    }
}

//! The authoritative game: phase machine plus the per-tick update
//!
//! Every callback (frame, spawn timer, score timer) reads the current phase
//! from here and does nothing unless the game is `Playing`.

use super::clock::Clock;
use super::collision::{character_box, first_collision, obstacle_box};
use super::obstacles::ObstacleField;
use super::physics;
use super::score::Difficulty;
use super::state::{Character, GameEvent, GamePhase, GameState, Obstacle, Snapshot};
use crate::config::GameConfig;
use crate::frames_elapsed;

/// Complete simulation state for one page session
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    state: GameState,
    character: Character,
    obstacles: ObstacleField,
    difficulty: Difficulty,
    clock: Clock,
}

impl Game {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            character: Character::new(config.start_position),
            obstacles: ObstacleField::new(seed),
            difficulty: Difficulty::new(&config),
            state: GameState::default(),
            clock: Clock::new(),
            config,
        }
    }

    /// Enter `Playing` with a fresh run. High score carries over.
    pub fn start(&mut self) {
        self.state.phase = GamePhase::Playing;
        self.state.score = 0;
        self.character = Character::new(self.config.start_position);
        self.obstacles.clear();
        self.difficulty.reset(&self.config);
        self.clock.reset();
    }

    /// Upward impulse; returns false outside `Playing`
    pub fn jump(&mut self) -> bool {
        if !self.state.is_playing() {
            return false;
        }
        physics::apply_jump(&mut self.character, &self.config);
        true
    }

    /// One display frame: physics, scrolling, pruning, then collision against
    /// the positions just computed.
    pub fn frame(&mut self, timestamp: f64) -> Option<GameEvent> {
        if !self.state.is_playing() {
            return None;
        }

        let delta = self.clock.tick(timestamp);
        let frames = frames_elapsed(delta, self.config.reference_frame_ms);

        physics::integrate(&mut self.character, frames, &self.config);

        self.obstacles.advance(self.difficulty.speed() * frames);
        let pruned = self.obstacles.prune(self.config.prune_position);
        if pruned > 0 {
            log::debug!("Pruned {} obstacle(s), {} live", pruned, self.obstacles.len());
        }

        let hit = first_collision(
            &character_box(&self.character, &self.config.playfield),
            self.obstacles.as_slice(),
            &self.config.playfield,
            self.config.collision_margin,
        )?;
        log::debug!("Collision with obstacle {}", hit);
        Some(self.end())
    }

    /// Spawn timer callback
    pub fn spawn_obstacle(&mut self) -> Option<u64> {
        if !self.state.is_playing() {
            return None;
        }
        let id = self.obstacles.spawn(&self.config);
        log::debug!("Spawned obstacle {}", id);
        Some(id)
    }

    /// Score timer callback: one point, then check speed thresholds
    pub fn score_tick(&mut self) -> Option<GameEvent> {
        if !self.state.is_playing() {
            return None;
        }
        self.state.score += 1;
        self.difficulty
            .on_score(self.state.score, &self.config)
            .map(|speed| GameEvent::SpeedUp { speed })
    }

    fn end(&mut self) -> GameEvent {
        self.state.phase = GamePhase::GameOver;
        self.state.high_score = self.state.high_score.max(self.state.score);
        GameEvent::GameOver {
            final_score: self.state.score,
            high_score: self.state.high_score,
        }
    }

    /// Plain values for the renderer
    pub fn snapshot(&self) -> Snapshot {
        let playfield = &self.config.playfield;
        Snapshot {
            phase: self.state.phase,
            score: self.state.score,
            high_score: self.state.high_score,
            obstacle_speed: self.difficulty.speed(),
            character_position: self.character.position,
            obstacles: self.obstacles.as_slice().to_vec(),
            character_box: character_box(&self.character, playfield),
            obstacle_boxes: self
                .obstacles
                .as_slice()
                .iter()
                .map(|o| obstacle_box(o, playfield))
                .collect(),
        }
    }

    #[inline]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[inline]
    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.state.is_playing()
    }

    #[inline]
    pub fn character(&self) -> &Character {
        &self.character
    }

    #[inline]
    pub fn obstacles(&self) -> &[Obstacle] {
        self.obstacles.as_slice()
    }

    /// Direct access for scripted scenarios
    #[inline]
    pub fn obstacle_field_mut(&mut self) -> &mut ObstacleField {
        &mut self.obstacles
    }

    #[inline]
    pub fn obstacle_speed(&self) -> f32 {
        self.difficulty.speed()
    }
}

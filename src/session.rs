//! Session lifecycle
//!
//! Owns the [`Game`] and the three host callbacks that drive it (frame loop,
//! spawn timer, score timer). Starting a session cancels the previous one's
//! callbacks before arming new ones; stopping is idempotent and also runs on
//! drop.

use crate::config::GameConfig;
use crate::platform::{GameOverNotice, Host, TimerKind, Wakeup};
use crate::sim::{Game, GameEvent};

pub struct Session<H: Host> {
    pub(crate) game: Game,
    pub(crate) host: H,
    /// Bumped on every start; callbacks armed under an older epoch are stale
    epoch: u64,
    frame: Option<H::Handle>,
    spawn_timer: Option<H::Handle>,
    score_timer: Option<H::Handle>,
}

impl<H: Host> Session<H> {
    pub fn new(config: GameConfig, seed: u64, host: H) -> Self {
        Self {
            game: Game::new(config, seed),
            host,
            epoch: 0,
            frame: None,
            spawn_timer: None,
            score_timer: None,
        }
    }

    /// Begin a new run (valid from any phase)
    pub fn start(&mut self) {
        self.stop();
        self.epoch += 1;
        self.game.start();
        log::info!(
            "Session {} started (high score {})",
            self.epoch,
            self.game.state().high_score
        );

        let (spawn_ms, score_ms) = {
            let config = self.game.config();
            (config.spawn_interval_ms, config.score_interval_ms)
        };
        self.frame = Some(self.host.request_frame(self.epoch));
        self.spawn_timer = Some(self.host.set_interval(TimerKind::Spawn, spawn_ms, self.epoch));
        self.score_timer = Some(self.host.set_interval(TimerKind::Score, score_ms, self.epoch));

        self.render();
    }

    /// The single "continue" action: jump while playing, otherwise start
    pub fn jump(&mut self) {
        if !self.game.jump() {
            self.start();
        }
    }

    /// Cancel every outstanding callback of the current run
    pub fn stop(&mut self) {
        for handle in [
            self.frame.take(),
            self.spawn_timer.take(),
            self.score_timer.take(),
        ]
        .into_iter()
        .flatten()
        {
            self.host.cancel(handle);
        }
    }

    /// Entry point for every host callback
    pub fn dispatch(&mut self, epoch: u64, wakeup: Wakeup) {
        if epoch != self.epoch || !self.game.is_playing() {
            log::warn!(
                "Ignoring stale {:?} (armed in session {}, current {}, {:?})",
                wakeup,
                epoch,
                self.epoch,
                self.game.phase()
            );
            return;
        }

        match wakeup {
            Wakeup::Frame { timestamp } => self.on_frame(timestamp),
            Wakeup::Timer(TimerKind::Spawn) => {
                self.game.spawn_obstacle();
            }
            Wakeup::Timer(TimerKind::Score) => {
                if let Some(GameEvent::SpeedUp { speed }) = self.game.score_tick() {
                    log::debug!(
                        "Score {}: obstacle speed now {}",
                        self.game.state().score,
                        speed
                    );
                }
            }
        }
    }

    fn on_frame(&mut self, timestamp: f64) {
        // The handle that just fired is spent
        self.frame = None;

        let event = self.game.frame(timestamp);
        self.render();

        match event {
            Some(GameEvent::GameOver {
                final_score,
                high_score,
            }) => {
                self.stop();
                log::info!(
                    "Game over in session {}: score {} (high score {})",
                    self.epoch,
                    final_score,
                    high_score
                );
                self.host.notify(&GameOverNotice::new(final_score));
            }
            _ => self.frame = Some(self.host.request_frame(self.epoch)),
        }
    }

    /// Push the current state to the renderer
    pub fn render(&mut self) {
        let snapshot = self.game.snapshot();
        self.host.render(&snapshot);
    }

    #[inline]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// True while any callback of the current run is armed
    pub fn is_armed(&self) -> bool {
        self.frame.is_some() || self.spawn_timer.is_some() || self.score_timer.is_some()
    }

    #[inline]
    pub fn game(&self) -> &Game {
        &self.game
    }

    #[inline]
    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    #[inline]
    pub fn host(&self) -> &H {
        &self.host
    }
}

impl<H: Host> Drop for Session<H> {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::VirtualHost;
    use crate::sim::{Character, GamePhase, physics};

    const FRAME_MS: f64 = 16.0;

    fn session() -> Session<VirtualHost> {
        Session::new(GameConfig::default(), 2024, VirtualHost::new(FRAME_MS))
    }

    /// Obstacles never spawn on their own
    fn quiet_session() -> Session<VirtualHost> {
        let config = GameConfig {
            spawn_interval_ms: 1.0e9,
            ..GameConfig::default()
        };
        Session::new(config, 2024, VirtualHost::new(FRAME_MS))
    }

    /// Put a tall obstacle in the character's column and run one frame
    fn crash(session: &mut Session<VirtualHost>) {
        session.game_mut().obstacle_field_mut().place(14.0, 120.0);
        session.advance(FRAME_MS);
    }

    #[test]
    fn test_new_session_is_idle_and_unarmed() {
        let mut s = session();
        assert_eq!(s.game().phase(), GamePhase::Idle);
        assert!(!s.is_armed());
        s.advance(5_000.0);
        assert_eq!(s.game().state().score, 0);
        assert_eq!(s.host().frames_rendered(), 0);
    }

    #[test]
    fn test_jump_from_idle_starts() {
        let mut s = session();
        s.jump();
        assert_eq!(s.game().phase(), GamePhase::Playing);
        assert_eq!(s.epoch(), 1);
        assert!(s.is_armed());
        // One frame plus two timers
        assert_eq!(s.host().pending_count(), 3);
        // A second jump is an impulse, not a restart
        s.jump();
        assert_eq!(s.epoch(), 1);
        assert_eq!(s.game().character().velocity, -5.0);
    }

    #[test]
    fn test_hundred_frames_without_obstacles() {
        let mut s = session();
        s.start();
        s.advance(100.0 * FRAME_MS);

        let game = s.game();
        assert_eq!(game.phase(), GamePhase::Playing);
        // 1600ms at one point per 100ms
        assert_eq!(game.state().score, 16);
        assert!(game.obstacles().is_empty());
        assert_eq!(s.host().frames_rendered(), 1 + 100);

        // Gravity-only trajectory: first frame seeds the clock, 99 full steps
        let config = GameConfig::default();
        let mut expected = Character::new(config.start_position);
        for _ in 0..99 {
            physics::integrate(&mut expected, 1.0, &config);
        }
        assert_eq!(*game.character(), expected);
        assert_eq!(game.character().position, config.max_height);
    }

    #[test]
    fn test_score_follows_wall_clock() {
        for total_ms in [0.0, 99.0, 100.0, 1_234.0, 4_999.0, 60_000.0] {
            let mut s = quiet_session();
            s.start();
            s.advance(total_ms);
            assert!(s.game().is_playing());
            assert_eq!(s.game().state().score, (total_ms / 100.0).floor() as u32);
        }
    }

    #[test]
    fn test_spawn_cadence() {
        let mut s = session();
        s.start();
        s.advance(1_999.0);
        assert!(s.game().obstacles().is_empty());
        s.advance(1.0);
        assert_eq!(s.game().obstacles().len(), 1);
        // Spawned at 100, then the frame due at the same instant scrolled it once
        assert_eq!(s.game().obstacles()[0].position, 96.0);
    }

    #[test]
    fn test_collision_ends_run_once() {
        let mut s = session();
        s.start();
        s.advance(400.0);
        assert_eq!(s.game().state().score, 4);

        crash(&mut s);
        assert_eq!(s.game().phase(), GamePhase::GameOver);
        assert_eq!(s.game().state().high_score, 4);
        assert_eq!(s.host().notices(), &[GameOverNotice::new(4)]);
        assert!(!s.is_armed());
        assert_eq!(s.host().pending_count(), 0);

        // Nothing runs after teardown
        let rendered = s.host().frames_rendered();
        s.advance(10_000.0);
        assert_eq!(s.game().state().score, 4);
        assert_eq!(s.host().frames_rendered(), rendered);
        assert_eq!(s.host().notices().len(), 1);
        assert_eq!(
            s.host().last_snapshot().map(|snap| snap.phase),
            Some(GamePhase::GameOver)
        );
    }

    #[test]
    fn test_restart_from_game_over() {
        let mut s = quiet_session();
        s.start();
        s.advance(3_000.0);
        let speed_before = s.game().obstacle_speed();
        assert_eq!(speed_before, 4.0);
        crash(&mut s);
        let high = s.game().state().high_score;
        assert_eq!(high, 30);

        s.start();
        let game = s.game();
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(game.state().score, 0);
        assert!(game.obstacles().is_empty());
        assert_eq!(game.obstacle_speed(), 4.0);
        assert_eq!(game.state().high_score, high);
        assert_eq!(s.host().pending_count(), 3);
    }

    #[test]
    fn test_jump_after_game_over_restarts() {
        let mut s = session();
        s.start();
        s.advance(500.0);
        crash(&mut s);
        s.jump();
        assert_eq!(s.game().phase(), GamePhase::Playing);
        assert_eq!(s.epoch(), 2);
        assert_eq!(s.game().character().velocity, 0.0);
    }

    #[test]
    fn test_restart_cancels_previous_callbacks() {
        let mut s = session();
        s.start();
        s.advance(250.0);
        s.start();
        s.start();
        // Only the newest session's three callbacks remain
        assert_eq!(s.host().pending_count(), 3);
        s.advance(1_000.0);
        assert_eq!(s.game().state().score, 10);
    }

    #[test]
    fn test_stale_callbacks_are_ignored() {
        let mut s = session();
        s.start();
        s.advance(500.0);
        let old_epoch = s.epoch();
        crash(&mut s);
        let state = *s.game().state();

        // Late callbacks from the finished run
        s.dispatch(old_epoch, Wakeup::Timer(TimerKind::Score));
        s.dispatch(old_epoch, Wakeup::Timer(TimerKind::Spawn));
        s.dispatch(old_epoch, Wakeup::Frame { timestamp: 99_999.0 });
        assert_eq!(*s.game().state(), state);
        assert_eq!(s.game().obstacles().len(), 1);

        // And from the previous epoch once a new run is going
        s.start();
        s.dispatch(old_epoch, Wakeup::Timer(TimerKind::Score));
        s.dispatch(old_epoch, Wakeup::Timer(TimerKind::Spawn));
        assert_eq!(s.game().state().score, 0);
        assert!(s.game().obstacles().is_empty());
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut s = session();
        s.start();
        s.stop();
        s.stop();
        assert!(!s.is_armed());
        assert_eq!(s.host().pending_count(), 0);
        s.advance(1_000.0);
        assert_eq!(s.game().state().score, 0);
    }

    #[test]
    fn test_speed_increases_every_fifty_points() {
        let mut s = session();
        s.start();
        // Clear obstacles as they spawn
        for _ in 0..60 {
            s.advance(100.0);
            s.game_mut().obstacle_field_mut().clear();
        }
        assert_eq!(s.game().state().score, 60);
        assert_eq!(s.game().obstacle_speed(), 4.5);
    }
}

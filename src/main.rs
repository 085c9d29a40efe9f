//! Dino Jump entry point
//!
//! Handles platform-specific initialization and starts the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, PointerEvent};

    use dino_jump::GameConfig;
    use dino_jump::platform::web::{WebSession, new_session};
    use dino_jump::renderer::{CanvasRenderer, Hud};

    /// Optional `<script type="application/json" id="game-config">` override
    fn load_config(document: &web_sys::Document) -> GameConfig {
        let Some(json) = document
            .get_element_by_id("game-config")
            .and_then(|el| el.text_content())
        else {
            return GameConfig::default();
        };
        match GameConfig::from_json(&json) {
            Ok(config) => {
                log::info!("Loaded game config from page");
                config
            }
            Err(e) => {
                log::warn!("Ignoring page config: {}", e);
                GameConfig::default()
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Dino Jump starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()?;

        let config = load_config(&document);
        let renderer = CanvasRenderer::new(&canvas, config.playfield)?;
        let hud = Hud::new(window.clone(), document.clone());

        let seed = js_sys::Date::now() as u64;
        let session = new_session(config, seed, window.clone(), renderer, hud);
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&window, &document, &canvas, session.clone());

        // Idle frame with the start overlay
        session.borrow_mut().render();

        log::info!("Dino Jump ready!");
        Ok(())
    }

    fn with_session(session: &Rc<RefCell<WebSession>>, f: impl FnOnce(&mut WebSession)) {
        match session.try_borrow_mut() {
            Ok(mut s) => f(&mut s),
            Err(_) => log::warn!("Session busy, input dropped"),
        }
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        document: &web_sys::Document,
        canvas: &HtmlCanvasElement,
        session: Rc<RefCell<WebSession>>,
    ) {
        {
            let session = session.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.code() == "Space" {
                    event.prevent_default();
                    with_session(&session, |s| s.jump());
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let session = session.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                with_session(&session, |s| s.jump());
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch button over the playfield, desktop button under it
        for id in ["jump-btn", "desktop-jump-btn"] {
            let Some(btn) = document.get_element_by_id(id) else {
                continue;
            };
            let session = session.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                with_session(&session, |s| s.jump());
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                with_session(&session, |s| s.start());
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        log::error!("Dino Jump failed to start: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Dino Jump (native) starting...");
    log::info!("Native mode runs headless autoplay - run with `trunk serve` for the web version");

    let config = native::load_config()?;
    for seed in [1u64, 7, 42] {
        let report = native::autoplay(config.clone(), seed, 120_000.0);
        println!(
            "seed {:>3}: score {:>5}, high score {:>5}, speed {:>4.1}, {}",
            seed,
            report.score,
            report.high_score,
            report.final_speed,
            if report.crashed { "crashed" } else { "survived" }
        );
    }
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use anyhow::Context;

    use dino_jump::platform::VirtualHost;
    use dino_jump::sim::{Game, GamePhase, physics};
    use dino_jump::{GameConfig, Session};

    /// Virtual display refresh
    const FRAME_MS: f64 = 16.0;
    /// How many frames ahead the bot starts its jump
    const JUMP_LEAD_FRAMES: f32 = 8.0;

    pub struct Report {
        pub score: u32,
        pub high_score: u32,
        pub final_speed: f32,
        pub crashed: bool,
    }

    /// `DINO_JUMP_CONFIG=path.json` overrides the defaults
    pub fn load_config() -> anyhow::Result<GameConfig> {
        let Ok(path) = std::env::var("DINO_JUMP_CONFIG") else {
            return Ok(GameConfig::default());
        };
        let json = std::fs::read_to_string(&path)
            .with_context(|| format!("reading config file {path}"))?;
        let config =
            GameConfig::from_json(&json).with_context(|| format!("parsing config file {path}"))?;
        log::info!("Loaded config from {}", path);
        Ok(config)
    }

    /// Jump when grounded and the nearest approaching obstacle is close
    fn should_jump(game: &Game) -> bool {
        let config = game.config();
        if !physics::on_ground(game.character(), config) {
            return false;
        }
        let snapshot = game.snapshot();
        let px_per_frame = snapshot.obstacle_speed * config.playfield.width / 100.0;
        let character = &snapshot.character_box;
        snapshot.obstacle_boxes.iter().any(|b| {
            let gap = b.left() - character.right();
            gap > 0.0 && gap / px_per_frame <= JUMP_LEAD_FRAMES
        })
    }

    /// Play one run on a virtual clock for at most `max_ms`
    pub fn autoplay(config: GameConfig, seed: u64, max_ms: f64) -> Report {
        let mut session = Session::new(config, seed, VirtualHost::new(FRAME_MS));
        session.start();

        let mut elapsed = 0.0;
        while elapsed < max_ms && session.game().phase() == GamePhase::Playing {
            session.advance(FRAME_MS);
            elapsed += FRAME_MS;
            if session.game().is_playing() && should_jump(session.game()) {
                session.jump();
            }
        }

        let state = *session.game().state();
        Report {
            score: state.score,
            high_score: state.high_score,
            final_speed: session.game().obstacle_speed(),
            crashed: state.phase == GamePhase::GameOver,
        }
    }

}

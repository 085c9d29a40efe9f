//! DOM HUD, overlays, and the game-over toast

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, Window};

use super::Overlay;
use crate::platform::GameOverNotice;
use crate::sim::Snapshot;

/// How long the toast stays up (ms)
const TOAST_MS: i32 = 3000;

pub struct Hud {
    window: Window,
    document: Document,
}

fn set_hidden(el: &Element, hidden: bool) {
    let classes = el.class_list();
    let _ = if hidden {
        classes.add_1("hidden")
    } else {
        classes.remove_1("hidden")
    };
}

impl Hud {
    pub fn new(window: Window, document: Document) -> Self {
        Self { window, document }
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(el) = self.document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn show(&self, id: &str, visible: bool) {
        if let Some(el) = self.document.get_element_by_id(id) {
            set_hidden(&el, !visible);
        }
    }

    pub fn update(&self, snapshot: &Snapshot) {
        self.set_text("hud-score", &snapshot.score.to_string());
        self.set_text("hud-high-score", &snapshot.high_score.to_string());

        let overlay = Overlay::for_snapshot(snapshot);
        self.show("start-overlay", overlay == Overlay::Start);
        match overlay {
            Overlay::GameOver { final_score } => {
                self.set_text("final-score", &final_score.to_string());
                self.show("game-over-overlay", true);
            }
            _ => self.show("game-over-overlay", false),
        }
    }

    pub fn toast(&self, notice: &GameOverNotice) {
        let Some(toast) = self.document.get_element_by_id("toast") else {
            log::warn!("No #toast element; skipping notification");
            return;
        };
        self.set_text("toast-title", &notice.title);
        self.set_text("toast-description", &notice.description());
        set_hidden(&toast, false);

        let hide = Closure::once_into_js(move || set_hidden(&toast, true));
        if let Err(e) = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(hide.unchecked_ref(), TOAST_MS)
        {
            log::warn!("Failed to schedule toast dismissal: {:?}", e);
        }
    }
}

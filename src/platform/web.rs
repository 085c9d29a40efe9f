//! Browser host: requestAnimationFrame, setInterval, canvas, DOM
//!
//! Callbacks hold only a `Weak` to the session. A callback that finds the
//! session gone, or already borrowed, does nothing.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::Window;

use super::{GameOverNotice, Host, TimerKind, Wakeup};
use crate::renderer::{CanvasRenderer, Hud};
use crate::session::Session;
use crate::sim::Snapshot;

pub type WebSession = Session<WebHost>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebHandle {
    Frame(i32),
    Interval(i32),
}

pub struct WebHost {
    window: Window,
    session: Weak<RefCell<WebSession>>,
    /// Closure of the pending animation frame
    frame: Option<(i32, Closure<dyn FnMut(f64)>)>,
    /// Frame closure that already fired; may still be on the stack
    spent_frame: Option<Closure<dyn FnMut(f64)>>,
    /// Interval closures stay alive until their timer is cleared
    intervals: HashMap<i32, Closure<dyn FnMut()>>,
    canvas: CanvasRenderer,
    hud: Hud,
}

impl WebHost {
    pub fn new(
        window: Window,
        session: Weak<RefCell<WebSession>>,
        canvas: CanvasRenderer,
        hud: Hud,
    ) -> Self {
        Self {
            window,
            session,
            frame: None,
            spent_frame: None,
            intervals: HashMap::new(),
            canvas,
            hud,
        }
    }
}

/// Deliver a wakeup to the session if it is still alive and free
fn deliver(session: &Weak<RefCell<WebSession>>, epoch: u64, wakeup: Wakeup) {
    let Some(session) = session.upgrade() else {
        return;
    };
    match session.try_borrow_mut() {
        Ok(mut s) => s.dispatch(epoch, wakeup),
        Err(_) => log::warn!("Session busy, dropping {:?}", wakeup),
    };
}

impl Host for WebHost {
    type Handle = WebHandle;

    fn request_frame(&mut self, epoch: u64) -> WebHandle {
        // Re-arming happens inside the previous frame's callback, so that
        // closure is parked rather than dropped
        self.spent_frame = self.frame.take().map(|(_, callback)| callback);

        let session = self.session.clone();
        let callback: Closure<dyn FnMut(f64)> = Closure::once(move |timestamp: f64| {
            deliver(&session, epoch, Wakeup::Frame { timestamp });
        });
        match self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
        {
            Ok(id) => {
                self.frame = Some((id, callback));
                WebHandle::Frame(id)
            }
            Err(e) => {
                log::error!("requestAnimationFrame failed: {:?}", e);
                WebHandle::Frame(0)
            }
        }
    }

    fn set_interval(&mut self, timer: TimerKind, period_ms: f64, epoch: u64) -> WebHandle {
        let session = self.session.clone();
        let callback = Closure::<dyn FnMut()>::new(move || {
            deliver(&session, epoch, Wakeup::Timer(timer));
        });
        match self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                period_ms.round() as i32,
            ) {
            Ok(id) => {
                self.intervals.insert(id, callback);
                WebHandle::Interval(id)
            }
            Err(e) => {
                log::error!("setInterval({:?}) failed: {:?}", timer, e);
                WebHandle::Interval(0)
            }
        }
    }

    fn cancel(&mut self, handle: WebHandle) {
        match handle {
            WebHandle::Frame(id) => {
                if let Err(e) = self.window.cancel_animation_frame(id) {
                    log::warn!("cancelAnimationFrame({}) failed: {:?}", id, e);
                }
                if self.frame.as_ref().is_some_and(|(pending, _)| *pending == id) {
                    self.frame = None;
                }
            }
            WebHandle::Interval(id) => {
                self.window.clear_interval_with_handle(id);
                self.intervals.remove(&id);
            }
        }
    }

    fn render(&mut self, snapshot: &Snapshot) {
        self.canvas.draw(snapshot);
        self.hud.update(snapshot);
    }

    fn notify(&mut self, notice: &GameOverNotice) {
        self.hud.toast(notice);
    }
}

/// Build a session whose host points back at it
pub fn new_session(
    config: crate::GameConfig,
    seed: u64,
    window: Window,
    canvas: CanvasRenderer,
    hud: Hud,
) -> Rc<RefCell<WebSession>> {
    Rc::new_cyclic(|weak| {
        RefCell::new(Session::new(
            config,
            seed,
            WebHost::new(window, weak.clone(), canvas, hud),
        ))
    })
}

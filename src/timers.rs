use crate::LiveScene;
use anyhow::anyhow;
use drift_core::{Effect, Subscription};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// A pending `setTimeout`. Dropping it clears the timer, so the closure can
/// never run after its owner is gone.
pub struct Timeout {
    window: web::Window,
    handle: i32,
    _closure: Closure<dyn FnMut()>,
}

impl Timeout {
    pub fn start(
        window: &web::Window,
        delay_ms: u32,
        f: impl FnMut() + 'static,
    ) -> anyhow::Result<Self> {
        let closure = Closure::wrap(Box::new(f) as Box<dyn FnMut()>);
        let handle = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                delay_ms.min(i32::MAX as u32) as i32,
            )
            .map_err(|e| anyhow!("{:?}", e))?;
        Ok(Self {
            window: window.clone(),
            handle,
            _closure: closure,
        })
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        self.window.clear_timeout_with_handle(self.handle);
    }
}

/// The single outstanding quiet-period reset of a scene generation.
pub struct QuietTimers {
    window: web::Window,
    pending: Option<(u64, Timeout)>,
}

impl QuietTimers {
    pub fn new(window: &web::Window) -> Self {
        Self {
            window: window.clone(),
            pending: None,
        }
    }

    pub fn pending_token(&self) -> Option<u64> {
        self.pending.as_ref().map(|(t, _)| *t)
    }

    /// Carry out the timer effects returned by a scroll transition.
    pub fn apply(timers: &Rc<RefCell<Self>>, scene: &Rc<RefCell<LiveScene>>, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::CancelReset { token } => {
                    let mut t = timers.borrow_mut();
                    if t.pending_token() == Some(token) {
                        t.pending = None;
                    }
                }
                Effect::ScheduleReset { token, delay_ms } => {
                    let scene = scene.clone();
                    let window = timers.borrow().window.clone();
                    match Timeout::start(&window, delay_ms, move || {
                        scene.borrow_mut().quiet_elapsed(token);
                    }) {
                        Ok(timeout) => timers.borrow_mut().pending = Some((token, timeout)),
                        Err(e) => log::error!("[mood] could not schedule reset: {:?}", e),
                    }
                }
                _ => {}
            }
        }
    }
}

impl Subscription for QuietTimers {
    fn cancel(&mut self) {
        self.pending = None;
    }
}

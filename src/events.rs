use crate::constants::WHEEL_LINE_PX;
use crate::timers::QuietTimers;
use crate::{dom, input, LiveScene};
use anyhow::anyhow;
use drift_core::{Subscription, Teardown};
use glam::Vec2;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// A registered DOM listener. Cancelling removes it from its target and
/// drops the closure.
pub struct Listener {
    target: web::EventTarget,
    kind: &'static str,
    closure: Option<Closure<dyn FnMut(web::Event)>>,
}

impl Listener {
    /// `passive: Some(false)` is needed for handlers that call `preventDefault`
    /// on wheel/touch-like events.
    pub fn add(
        target: &web::EventTarget,
        kind: &'static str,
        passive: Option<bool>,
        handler: impl FnMut(web::Event) + 'static,
    ) -> anyhow::Result<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        let added = match passive {
            Some(p) => {
                let opts = web::AddEventListenerOptions::new();
                opts.set_passive(p);
                target.add_event_listener_with_callback_and_add_event_listener_options(
                    kind,
                    closure.as_ref().unchecked_ref(),
                    &opts,
                )
            }
            None => target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref()),
        };
        added.map_err(|e| anyhow!("{:?}", e))?;
        Ok(Self {
            target: target.clone(),
            kind,
            closure: Some(closure),
        })
    }
}

impl Subscription for Listener {
    fn cancel(&mut self) {
        if let Some(closure) = self.closure.take() {
            _ = self
                .target
                .remove_event_listener_with_callback(self.kind, closure.as_ref().unchecked_ref());
        }
    }
}

/// Everything the per-generation handlers share.
#[derive(Clone)]
pub struct SceneWiring {
    pub window: web::Window,
    pub canvas: web::HtmlCanvasElement,
    pub scene: Rc<RefCell<LiveScene>>,
    pub timers: Rc<RefCell<QuietTimers>>,
    /// Target of a scroll the page issued itself; that event does not count.
    pub pending_reset: Rc<Cell<Option<f64>>>,
}

pub fn wire_scene_handlers(w: &SceneWiring, teardown: &mut Teardown) -> anyhow::Result<()> {
    teardown.push(wire_scroll(w)?);
    teardown.push(wire_wheel(w)?);
    teardown.push(wire_touch_hold(w)?);
    for l in wire_pointer(w)? {
        teardown.push(l);
    }
    Ok(())
}

fn wire_scroll(w: &SceneWiring) -> anyhow::Result<Listener> {
    let w = w.clone();
    let target: web::EventTarget = w.window.clone().into();
    Listener::add(&target, "scroll", Some(true), move |_ev| {
        let offset = dom::scroll_y(&w.window);
        if input::is_programmatic_scroll(w.pending_reset.take(), offset) {
            log::info!("[scene] ignoring programmatic scroll");
            return;
        }
        let effects = w.scene.borrow_mut().scroll(offset);
        QuietTimers::apply(&w.timers, &w.scene, effects);
    })
}

/// Wheel over the overlay scrolls the page, except while a body is held.
fn wire_wheel(w: &SceneWiring) -> anyhow::Result<Listener> {
    let w = w.clone();
    let target: web::EventTarget = w.canvas.clone().into();
    Listener::add(&target, "wheel", Some(false), move |ev| {
        let Some(ev) = ev.dyn_ref::<web::WheelEvent>() else {
            return;
        };
        ev.prevent_default();
        if w.scene.borrow().drag().is_dragging() {
            return;
        }
        let page = w.scene.borrow().layout().viewport.height as f64;
        let dx = input::wheel_delta_px(ev.delta_x(), ev.delta_mode(), WHEEL_LINE_PX, page);
        let dy = input::wheel_delta_px(ev.delta_y(), ev.delta_mode(), WHEEL_LINE_PX, page);
        w.window.scroll_by_with_x_and_y(dx, dy);
    })
}

/// Touch pans pass through to the page; once a body is held they are ours.
fn wire_touch_hold(w: &SceneWiring) -> anyhow::Result<Listener> {
    let w = w.clone();
    let target: web::EventTarget = w.canvas.clone().into();
    Listener::add(&target, "touchmove", Some(false), move |ev| {
        if w.scene.borrow().drag().is_dragging() {
            ev.prevent_default();
        }
    })
}

fn pointer_world(canvas: &web::HtmlCanvasElement, ev: &web::PointerEvent) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    input::client_to_world(
        ev.client_x() as f32,
        ev.client_y() as f32,
        rect.left() as f32,
        rect.top() as f32,
    )
}

fn wire_pointer(w: &SceneWiring) -> anyhow::Result<Vec<Listener>> {
    let target: web::EventTarget = w.canvas.clone().into();
    let mut out = Vec::with_capacity(4);

    let wd = w.clone();
    out.push(Listener::add(&target, "pointerdown", None, move |ev| {
        let Some(ev) = ev.dyn_ref::<web::PointerEvent>() else {
            return;
        };
        let p = pointer_world(&wd.canvas, ev);
        if wd.scene.borrow_mut().grab(p) {
            ev.prevent_default();
            dom::set_touch_capture(&wd.canvas, true);
            _ = wd.canvas.set_pointer_capture(ev.pointer_id());
        }
    })?);

    let wm = w.clone();
    out.push(Listener::add(&target, "pointermove", None, move |ev| {
        let Some(ev) = ev.dyn_ref::<web::PointerEvent>() else {
            return;
        };
        if !wm.scene.borrow().drag().is_dragging() {
            return;
        }
        let p = pointer_world(&wm.canvas, ev);
        wm.scene.borrow_mut().drag_to(p);
    })?);

    for kind in ["pointerup", "pointercancel"] {
        let wu = w.clone();
        out.push(Listener::add(&target, kind, None, move |ev| {
            let Some(ev) = ev.dyn_ref::<web::PointerEvent>() else {
                return;
            };
            if !wu.scene.borrow().drag().is_dragging() {
                return;
            }
            wu.scene.borrow_mut().end_drag();
            dom::set_touch_capture(&wu.canvas, false);
            _ = wu.canvas.release_pointer_capture(ev.pointer_id());
        })?);
    }
    Ok(out)
}

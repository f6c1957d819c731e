use crate::render;
use crate::LiveScene;
use anyhow::anyhow;
use drift_core::Subscription;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub scene: Rc<RefCell<LiveScene>>,
    pub ctx: web::CanvasRenderingContext2d,
    pub dpr: f64,
    pub last_instant: Instant,
}

impl FrameContext {
    pub fn new(scene: Rc<RefCell<LiveScene>>, ctx: web::CanvasRenderingContext2d, dpr: f64) -> Self {
        Self {
            scene,
            ctx,
            dpr,
            last_instant: Instant::now(),
        }
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;

        let mut scene = self.scene.borrow_mut();
        scene.tick(dt_sec);
        if let Err(e) = render::draw(&self.ctx, &scene, self.dpr) {
            log::error!("render error: {:?}", e);
        }
    }
}

type TickSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// The running requestAnimationFrame loop of one generation.
pub struct FrameLoop {
    window: web::Window,
    handle: Rc<Cell<Option<i32>>>,
    tick: TickSlot,
}

impl Subscription for FrameLoop {
    fn cancel(&mut self) {
        if let Some(h) = self.handle.take() {
            _ = self.window.cancel_animation_frame(h);
        }
        // Breaks the closure's reference to its own slot.
        self.tick.borrow_mut().take();
    }
}

fn request(window: &web::Window, tick: &TickSlot, handle: &Cell<Option<i32>>) {
    if let Some(cb) = tick.borrow().as_ref() {
        match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(h) => handle.set(Some(h)),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
    }
}

pub fn start_loop(window: &web::Window, mut frame_ctx: FrameContext) -> anyhow::Result<FrameLoop> {
    let tick: TickSlot = Rc::new(RefCell::new(None));
    let handle = Rc::new(Cell::new(None));

    let tick_clone = tick.clone();
    let handle_clone = handle.clone();
    let window_clone = window.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        handle_clone.set(None);
        frame_ctx.frame();
        request(&window_clone, &tick_clone, &handle_clone);
    }) as Box<dyn FnMut()>));

    request(window, &tick, &handle);
    if handle.get().is_none() {
        tick.borrow_mut().take();
        return Err(anyhow!("could not start frame loop"));
    }
    Ok(FrameLoop {
        window: window.clone(),
        handle,
        tick,
    })
}

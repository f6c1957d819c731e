#![cfg(target_arch = "wasm32")]
use drift_core::{RapierWorld, Scene, SceneConfig, SceneGenerations, Teardown};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod fetch;
mod frame;
mod input;
mod render;
mod timers;

use timers::{QuietTimers, Timeout};

pub(crate) type LiveScene = Scene<RapierWorld, StdRng>;

/// Page-lifetime state. Everything tied to one scene lives in that
/// generation's `Teardown` instead.
struct Page {
    window: web::Window,
    document: web::Document,
    config: SceneConfig,
    generations: RefCell<SceneGenerations>,
    /// Target offset of a scroll-to-top the page issued itself, until it lands.
    pending_reset: Rc<Cell<Option<f64>>>,
    _reset_timer: Option<Timeout>,
    resize_timer: RefCell<Option<Timeout>>,
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("logo-drift starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    dom::document_ready(&document).await?;

    let config = dom::read_config(&document);
    dom::set_manual_scroll_restoration(&window);

    let pending_reset = Rc::new(Cell::new(None));
    let mut reset_timer = None;
    if config.overlay.reset_scroll_on_load && dom::scroll_y(&window) > 0.0 {
        pending_reset.set(Some(0.0));
        window.scroll_to_with_x_and_y(0.0, 0.0);
        // Expires on the next task even if no listener ever sees the reset.
        let pending = pending_reset.clone();
        reset_timer = Some(Timeout::start(&window, 0, move || pending.set(None))?);
    }

    let page = Rc::new(Page {
        window,
        document,
        config,
        generations: RefCell::new(SceneGenerations::new()),
        pending_reset,
        _reset_timer: reset_timer,
        resize_timer: RefCell::new(None),
    });
    wire_resize(&page)?;
    rebuild(page);
    Ok(())
}

/// Debounced resize: the last event in a burst triggers one rebuild.
fn wire_resize(page: &Rc<Page>) -> anyhow::Result<()> {
    let p = page.clone();
    let closure = Closure::wrap(Box::new(move || {
        let target = p.clone();
        match Timeout::start(&p.window, p.config.overlay.resize_debounce_ms, move || {
            log::info!("[resize] viewport changed; rebuilding");
            rebuild(target.clone());
        }) {
            Ok(t) => {
                p.resize_timer.replace(Some(t));
            }
            Err(e) => log::error!("[resize] debounce failed: {:?}", e),
        }
    }) as Box<dyn FnMut()>);
    page.window
        .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    closure.forget();
    Ok(())
}

/// Tear down the live scene and start building the next generation.
fn rebuild(page: Rc<Page>) {
    let generation = page.generations.borrow_mut().begin();
    log::info!("[scene] starting generation {}", generation);
    spawn_local(async move {
        if let Err(e) = build_generation(&page, generation).await {
            log::error!("[scene] asset load failed: {:?}", e);
        }
    });
}

async fn build_generation(page: &Page, generation: u64) -> anyhow::Result<()> {
    let svg_text = fetch::fetch_text(&page.window, &page.config.asset_path).await?;
    if !page.generations.borrow().is_current(generation) {
        log::info!("[resize] generation {} superseded during fetch", generation);
        return Ok(());
    }

    let viewport = dom::viewport(&page.window, &page.document);
    let scene = Scene::build(
        &svg_text,
        viewport,
        page.config.clone(),
        RapierWorld::new(page.config.base_gravity),
        StdRng::from_entropy(),
        dom::scroll_y(&page.window),
    )?;
    let scene = Rc::new(RefCell::new(scene));

    // Registered first so it runs last, once listeners and the frame loop are gone.
    let mut teardown = Teardown::new(generation);
    let disposed = scene.clone();
    teardown.on_teardown(move || disposed.borrow_mut().dispose());

    let (canvas, ctx) =
        dom::create_overlay(&page.window, &page.document, &page.config.overlay, viewport)?;
    let overlay = canvas.clone();
    teardown.on_teardown(move || overlay.remove());

    let timers = Rc::new(RefCell::new(QuietTimers::new(&page.window)));
    teardown.push(timers.clone());

    let wiring = events::SceneWiring {
        window: page.window.clone(),
        canvas,
        scene: scene.clone(),
        timers,
        pending_reset: page.pending_reset.clone(),
    };
    events::wire_scene_handlers(&wiring, &mut teardown)?;

    let frame_ctx = frame::FrameContext::new(scene, ctx, page.window.device_pixel_ratio());
    teardown.push(frame::start_loop(&page.window, frame_ctx)?);

    if page.generations.borrow_mut().install(teardown) {
        log::info!("[scene] generation {} live", generation);
    }
    Ok(())
}

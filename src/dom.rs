use crate::constants::{CANVAS_ID, DATA_PREFIX, HOST_ELEMENT_ID};
use crate::input;
use anyhow::anyhow;
use drift_core::config::OverlayParams;
use drift_core::{SceneConfig, Viewport};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Layout viewport: the document's client width (excludes the scrollbar) by
/// the window's inner height.
pub fn viewport(window: &web::Window, document: &web::Document) -> Viewport {
    let width = document
        .document_element()
        .map(|el| el.client_width() as f64)
        .filter(|w| *w > 0.0)
        .or_else(|| window.inner_width().ok().and_then(|v| v.as_f64()))
        .unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    Viewport::new(width as f32, height as f32)
}

#[inline]
pub fn scroll_y(window: &web::Window) -> f32 {
    window.scroll_y().unwrap_or(0.0) as f32
}

pub fn set_manual_scroll_restoration(window: &web::Window) {
    match window.history() {
        Ok(h) => {
            if let Err(e) = h.set_scroll_restoration(web::ScrollRestoration::Manual) {
                log::warn!("[scene] scrollRestoration not settable: {:?}", e);
            }
        }
        Err(e) => log::warn!("[scene] no history: {:?}", e),
    }
}

/// Defaults overridden by `data-*` attributes on the optional host element.
pub fn read_config(document: &web::Document) -> SceneConfig {
    let mut config = SceneConfig::default();
    let Some(host) = document.get_element_by_id(HOST_ELEMENT_ID) else {
        return config;
    };
    for name in host.get_attribute_names().iter().filter_map(|n| n.as_string()) {
        let Some(key) = input::override_key(&name, DATA_PREFIX) else {
            continue;
        };
        let value = host.get_attribute(&name).unwrap_or_default();
        if !config.apply_override(key, &value) {
            log::warn!("[scene] ignoring override {}={:?}", name, value);
        }
    }
    config
}

/// Full-viewport fixed canvas appended to `<body>`, backing store sized for
/// the device pixel ratio. Returns the canvas and its 2D context.
pub fn create_overlay(
    window: &web::Window,
    document: &web::Document,
    params: &OverlayParams,
    viewport: Viewport,
) -> anyhow::Result<(web::HtmlCanvasElement, web::CanvasRenderingContext2d)> {
    let body = document.body().ok_or_else(|| anyhow!("no body"))?;
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow!("{:?}", e))?
        .dyn_into()
        .map_err(|e| anyhow!("{:?}", e))?;
    canvas.set_id(CANVAS_ID);

    let style = canvas.style();
    let background = params.background.as_deref().unwrap_or("transparent");
    for (prop, value) in [
        ("position", "fixed".to_string()),
        ("top", "0".to_string()),
        ("left", "0".to_string()),
        ("width", format!("{}px", viewport.width)),
        ("height", format!("{}px", viewport.height)),
        ("z-index", params.z_index.to_string()),
        ("background", background.to_string()),
        ("touch-action", input::overlay_touch_action(false).to_string()),
    ] {
        style
            .set_property(prop, &value)
            .map_err(|e| anyhow!("{:?}", e))?;
    }

    let (w, h) = input::backing_size(
        viewport.width as f64,
        viewport.height as f64,
        window.device_pixel_ratio(),
    );
    canvas.set_width(w);
    canvas.set_height(h);

    body.append_child(&canvas).map_err(|e| anyhow!("{:?}", e))?;

    let ctx: web::CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|e| anyhow!("{:?}", e))?
        .ok_or_else(|| anyhow!("no 2d context"))?
        .dyn_into()
        .map_err(|e| anyhow!("{:?}", e))?;
    Ok((canvas, ctx))
}

/// Resolves once the document has finished parsing.
pub async fn document_ready(document: &web::Document) -> anyhow::Result<()> {
    let state = js_sys::Reflect::get(document, &JsValue::from_str("readyState"))
        .ok()
        .and_then(|v| v.as_string())
        .unwrap_or_default();
    if state != "loading" {
        return Ok(());
    }
    let target = document.clone();
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        let opts = web::AddEventListenerOptions::new();
        opts.set_once(true);
        let cb = Closure::once_into_js(move || {
            _ = resolve.call0(&JsValue::NULL);
        });
        _ = target.add_event_listener_with_callback_and_add_event_listener_options(
            "DOMContentLoaded",
            cb.unchecked_ref(),
            &opts,
        );
    });
    JsFuture::from(promise)
        .await
        .map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}

/// Switch the overlay between passing touch pans to the page and owning them.
pub fn set_touch_capture(canvas: &web::HtmlCanvasElement, holding: bool) {
    if let Err(e) = canvas
        .style()
        .set_property("touch-action", input::overlay_touch_action(holding))
    {
        log::warn!("[drag] could not set touch-action: {:?}", e);
    }
}

use crate::constants::{SCROLL_TARGET_SLOP_PX, TOUCH_ACTION_HELD, TOUCH_ACTION_IDLE};
use glam::Vec2;

// Pure helpers shared by the pointer and wheel handlers. No web-sys here so
// they can be checked on the host.

pub const DOM_DELTA_PIXEL: u32 = 0;
pub const DOM_DELTA_LINE: u32 = 1;
pub const DOM_DELTA_PAGE: u32 = 2;

/// Client (CSS px) coordinates relative to the canvas' top-left corner.
/// World units are CSS pixels, so this is also the world position.
#[inline]
pub fn client_to_world(client_x: f32, client_y: f32, rect_left: f32, rect_top: f32) -> Vec2 {
    Vec2::new(client_x - rect_left, client_y - rect_top)
}

/// Backing store size for a CSS size and device pixel ratio, never zero.
#[inline]
pub fn backing_size(css_width: f64, css_height: f64, dpr: f64) -> (u32, u32) {
    let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
    let w = (css_width * dpr).round().max(1.0) as u32;
    let h = (css_height * dpr).round().max(1.0) as u32;
    (w, h)
}

/// Wheel delta in pixels for any `deltaMode`.
#[inline]
pub fn wheel_delta_px(delta: f64, mode: u32, line_px: f64, page_px: f64) -> f64 {
    match mode {
        DOM_DELTA_LINE => delta * line_px,
        DOM_DELTA_PAGE => delta * page_px,
        _ => delta,
    }
}

/// `data-foo-bar` -> `foo-bar`; other attribute names are not overrides.
#[inline]
pub fn override_key<'a>(attr_name: &'a str, prefix: &str) -> Option<&'a str> {
    attr_name.strip_prefix(prefix).filter(|k| !k.is_empty())
}

/// Overlay `touch-action`. Touch pans scroll the page unless a body is held.
#[inline]
pub fn overlay_touch_action(holding: bool) -> &'static str {
    if holding {
        TOUCH_ACTION_HELD
    } else {
        TOUCH_ACTION_IDLE
    }
}

/// True when a scroll event is the page's own reset: one is pending and the
/// offset sits on its target. Any other event is a real scroll.
#[inline]
pub fn is_programmatic_scroll(pending_target: Option<f64>, offset: f64) -> bool {
    matches!(pending_target, Some(t) if (offset - t).abs() <= SCROLL_TARGET_SLOP_PX)
}

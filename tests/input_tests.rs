// Host-side tests for pure input helpers.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}
mod constants {
    include!("../src/constants.rs");
}

use input::*;

#[test]
fn client_point_maps_to_canvas_space() {
    let p = client_to_world(150.0, 90.0, 0.0, 0.0);
    assert_eq!(p, glam::Vec2::new(150.0, 90.0));
    let shifted = client_to_world(150.0, 90.0, 10.0, 30.0);
    assert_eq!(shifted, glam::Vec2::new(140.0, 60.0));
}

#[test]
fn backing_size_follows_device_pixel_ratio() {
    assert_eq!(backing_size(800.0, 600.0, 2.0), (1600, 1200));
    assert_eq!(backing_size(801.0, 600.0, 1.5), (1202, 900));
    // Bad ratios fall back to 1, and the store is never empty.
    assert_eq!(backing_size(800.0, 600.0, 0.0), (800, 600));
    assert_eq!(backing_size(800.0, 600.0, f64::NAN), (800, 600));
    assert_eq!(backing_size(0.0, 0.0, 2.0), (1, 1));
}

#[test]
fn wheel_delta_modes() {
    let line = constants::WHEEL_LINE_PX;
    assert_eq!(wheel_delta_px(3.0, DOM_DELTA_PIXEL, line, 700.0), 3.0);
    assert_eq!(wheel_delta_px(3.0, DOM_DELTA_LINE, line, 700.0), 48.0);
    assert_eq!(wheel_delta_px(-1.0, DOM_DELTA_PAGE, line, 700.0), -700.0);
    assert_eq!(wheel_delta_px(2.0, 99, line, 700.0), 2.0);
}

#[test]
fn override_keys_come_from_data_attributes() {
    let prefix = constants::DATA_PREFIX;
    assert_eq!(override_key("data-layout", prefix), Some("layout"));
    assert_eq!(override_key("data-z-index", prefix), Some("z-index"));
    assert_eq!(override_key("data-", prefix), None);
    assert_eq!(override_key("id", prefix), None);
    assert_eq!(override_key("class", prefix), None);
}

#[test]
fn overlay_lets_touch_pans_through_until_a_body_is_held() {
    assert_eq!(overlay_touch_action(false), "pan-x pan-y");
    assert_eq!(overlay_touch_action(true), "none");
}

#[test]
fn only_the_pending_reset_offset_is_programmatic() {
    // No reset pending: every event is real.
    assert!(!is_programmatic_scroll(None, 0.0));
    // The reset landing on its target is skipped.
    assert!(is_programmatic_scroll(Some(0.0), 0.0));
    assert!(is_programmatic_scroll(Some(0.0), 0.4));
    // A user scroll that beats the reset is real.
    assert!(!is_programmatic_scroll(Some(0.0), 120.0));
}

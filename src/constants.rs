/// DOM and rendering constants for the web front end.
///
/// Physics and mood tuning lives in `drift_core::constants`; these only
/// concern the page.
// Optional element carrying `data-*` configuration overrides
pub const HOST_ELEMENT_ID: &str = "logo-drift";
pub const DATA_PREFIX: &str = "data-";

// Overlay canvas id (one per scene generation)
pub const CANVAS_ID: &str = "logo-drift-canvas";

// Drag constraint line
pub const CONSTRAINT_COLOR: &str = "rgba(0, 255, 0, 0.7)";
pub const CONSTRAINT_WIDTH: f64 = 2.0;

// Wheel deltaMode scaling
pub const WHEEL_LINE_PX: f64 = 16.0; // DOM_DELTA_LINE

// Overlay `touch-action`: pan through to the page unless a body is held
pub const TOUCH_ACTION_IDLE: &str = "pan-x pan-y";
pub const TOUCH_ACTION_HELD: &str = "none";

// A programmatic scroll lands within this many px of its target
pub const SCROLL_TARGET_SLOP_PX: f64 = 0.5;

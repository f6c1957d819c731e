// Tuning constants shared by the core and the web frontend.
// Mood and drag values are in per-tick units (one tick = 1/60 s); the physics
// backend converts them when applying.

// Layout
pub const PADDING_FRACTION: f32 = 0.2; // share of the viewport kept free around the logo
pub const SCALE_MULTIPLIER: f32 = 0.5; // de-emphasis applied after fit-to-viewport

// Sampling
pub const SAMPLE_LENGTH: f32 = 10.0; // max polyline segment length in source units
pub const CURVE_ESTIMATE_STEPS: usize = 16; // polyline resolution used to estimate curve length
pub const MAX_SEGMENT_PIECES: usize = 4096; // longer segments are rejected as malformed

// Materials
pub const DEFAULT_DENSITY: f32 = 0.003;
pub const DEFAULT_AIR_FRICTION: f32 = 0.01;
pub const ARROW_DENSITY: f32 = 0.02;
pub const ARROW_AIR_FRICTION: f32 = 0.0005; // near-frictionless drift
pub const LETTERING_DENSITY: f32 = 0.0006;
pub const LETTERING_AIR_FRICTION: f32 = 0.08; // heavier feel
pub const RESTITUTION: f32 = 0.02;
pub const FRICTION: f32 = 0.3;

// Visual defaults
pub const DEFAULT_FILL: &str = "#2d4059";
pub const DEFAULT_STROKE_WIDTH: f32 = 0.5;
pub const PART_STROKE_WIDTH: f32 = 0.5; // seam stroke for decomposed parts

// Settle phase
pub const SETTLE_STEPS: u32 = 15;
pub const TICK_SECONDS: f32 = 1.0 / 60.0;

// World
pub const BASE_GRAVITY: f32 = 1.0;
pub const GRAVITY_PX_PER_S2: f32 = 1000.0; // one gravity unit in world acceleration
pub const WALL_THICKNESS: f32 = 50.0;
pub const CEILING_LIFT: f32 = 100.0; // ceiling sits this far above the viewport top

// Mood
pub const QUIET_MS: u32 = 150;
pub const FLOAT_PUSH: f32 = 0.015; // upward push per unit mass
pub const FLOAT_JITTER: f32 = 0.005; // horizontal push range per unit mass
pub const FAR_SCROLL_THRESHOLD: f32 = 500.0;
pub const FLOAT_GRAVITY_NEAR: f32 = -0.5;
pub const FLOAT_GRAVITY_FAR: f32 = -0.1;
pub const FALLING_GRAVITY: f32 = 4.5;
pub const SPIN_RANGE: f32 = 0.2; // angular velocity drawn from [-range/2, range/2)
pub const BUMP_PUSH: f32 = 0.001;

// Drag
pub const DRAG_AIR_FRICTION: f32 = 0.2;
pub const DRAG_STIFFNESS: f32 = 0.95;

// Step loop
pub const MAX_STEPS_PER_FRAME: u32 = 4;
pub const MAX_FRAME_SECONDS: f32 = 0.25; // clamp after tab switches

// Overlay
pub const OVERLAY_Z_INDEX: i32 = 10;
pub const RESIZE_DEBOUNCE_MS: u32 = 250;

//! Scene configuration with the tuned defaults.

use crate::constants::*;
use crate::shape::{ShapeClass, ShapeMaterial};

/// Where the scaled logo bounding box is anchored in the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LayoutPolicy {
    Centered,
    #[default]
    BottomRight,
}

impl LayoutPolicy {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "center" | "centered" | "centre" => Some(Self::Centered),
            "bottom-right" | "bottomright" | "corner" => Some(Self::BottomRight),
            _ => None,
        }
    }
}

/// Which classification damping a released body falls back to when no
/// pre-drag value was remembered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DragRestorePolicy {
    /// Only lettering shapes get the lettering damping; everything else non-arrow gets the default.
    #[default]
    LetteringOnly,
    /// Every non-arrow shape gets the lettering damping.
    AnyNonArrow,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MaterialTable {
    pub arrow: ShapeMaterial,
    pub lettering: ShapeMaterial,
    pub default: ShapeMaterial,
}

impl MaterialTable {
    pub fn get(&self, class: ShapeClass) -> ShapeMaterial {
        match class {
            ShapeClass::Arrow => self.arrow,
            ShapeClass::Lettering => self.lettering,
            ShapeClass::Default => self.default,
        }
    }
}

impl Default for MaterialTable {
    fn default() -> Self {
        let base = ShapeMaterial {
            density: DEFAULT_DENSITY,
            air_friction: DEFAULT_AIR_FRICTION,
            restitution: RESTITUTION,
            friction: FRICTION,
        };
        Self {
            arrow: ShapeMaterial {
                density: ARROW_DENSITY,
                air_friction: ARROW_AIR_FRICTION,
                ..base
            },
            lettering: ShapeMaterial {
                density: LETTERING_DENSITY,
                air_friction: LETTERING_AIR_FRICTION,
                ..base
            },
            default: base,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MoodParams {
    pub quiet_ms: u32,
    pub float_push: f32,
    pub float_jitter: f32,
    pub far_scroll_threshold: f32,
    pub float_gravity_near: f32,
    pub float_gravity_far: f32,
    pub falling_gravity: f32,
    pub spin_range: f32,
    pub bump_push: f32,
    /// Re-randomize spin on every scroll-up event while already falling.
    pub respin_on_reentry: bool,
}

impl Default for MoodParams {
    fn default() -> Self {
        Self {
            quiet_ms: QUIET_MS,
            float_push: FLOAT_PUSH,
            float_jitter: FLOAT_JITTER,
            far_scroll_threshold: FAR_SCROLL_THRESHOLD,
            float_gravity_near: FLOAT_GRAVITY_NEAR,
            float_gravity_far: FLOAT_GRAVITY_FAR,
            falling_gravity: FALLING_GRAVITY,
            spin_range: SPIN_RANGE,
            bump_push: BUMP_PUSH,
            respin_on_reentry: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DragParams {
    pub dragged_air_friction: f32,
    pub stiffness: f32,
    pub restore_policy: DragRestorePolicy,
}

impl Default for DragParams {
    fn default() -> Self {
        Self {
            dragged_air_friction: DRAG_AIR_FRICTION,
            stiffness: DRAG_STIFFNESS,
            restore_policy: DragRestorePolicy::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct OverlayParams {
    pub z_index: i32,
    /// CSS background; `None` keeps the canvas transparent.
    pub background: Option<String>,
    pub resize_debounce_ms: u32,
    pub reset_scroll_on_load: bool,
}

impl Default for OverlayParams {
    fn default() -> Self {
        Self {
            z_index: OVERLAY_Z_INDEX,
            background: None,
            resize_debounce_ms: RESIZE_DEBOUNCE_MS,
            reset_scroll_on_load: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub asset_path: String,
    pub padding_fraction: f32,
    pub scale_multiplier: f32,
    pub layout_policy: LayoutPolicy,
    pub sample_length: f32,
    pub materials: MaterialTable,
    pub arrow_ids: Vec<String>,
    pub lettering_ids: Vec<String>,
    pub settle_steps: u32,
    pub settle_dt: f32,
    pub base_gravity: f32,
    pub walls: bool,
    pub wall_thickness: f32,
    pub ceiling_lift: f32,
    pub mood: MoodParams,
    pub drag: DragParams,
    pub overlay: OverlayParams,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            asset_path: "images/logo.svg".to_string(),
            padding_fraction: PADDING_FRACTION,
            scale_multiplier: SCALE_MULTIPLIER,
            layout_policy: LayoutPolicy::default(),
            sample_length: SAMPLE_LENGTH,
            materials: MaterialTable::default(),
            arrow_ids: vec!["arrow".to_string()],
            lettering_ids: vec!["M".to_string(), "arc-t".to_string()],
            settle_steps: SETTLE_STEPS,
            settle_dt: TICK_SECONDS / SETTLE_STEPS as f32,
            base_gravity: BASE_GRAVITY,
            walls: true,
            wall_thickness: WALL_THICKNESS,
            ceiling_lift: CEILING_LIFT,
            mood: MoodParams::default(),
            drag: DragParams::default(),
            overlay: OverlayParams::default(),
        }
    }
}

impl SceneConfig {
    /// Apply a single `data-*` style override. Unknown keys and unparsable
    /// values are ignored and reported back as `false`.
    pub fn apply_override(&mut self, key: &str, value: &str) -> bool {
        match key {
            "asset" => {
                let v = value.trim();
                if v.is_empty() {
                    return false;
                }
                self.asset_path = v.to_string();
                true
            }
            "layout" => match LayoutPolicy::from_name(value) {
                Some(p) => {
                    self.layout_policy = p;
                    true
                }
                None => false,
            },
            "z-index" => match value.trim().parse::<i32>() {
                Ok(z) => {
                    self.overlay.z_index = z;
                    true
                }
                Err(_) => false,
            },
            "background" => {
                let v = value.trim();
                self.overlay.background = match v {
                    "" | "transparent" | "none" => None,
                    _ => Some(v.to_string()),
                };
                true
            }
            "drag-restore" => match value.trim() {
                "lettering" | "lettering-only" => {
                    self.drag.restore_policy = DragRestorePolicy::LetteringOnly;
                    true
                }
                "non-arrow" | "any-non-arrow" => {
                    self.drag.restore_policy = DragRestorePolicy::AnyNonArrow;
                    true
                }
                _ => false,
            },
            "reset-scroll" => match value.trim() {
                "true" | "1" | "" => {
                    self.overlay.reset_scroll_on_load = true;
                    true
                }
                "false" | "0" => {
                    self.overlay.reset_scroll_on_load = false;
                    true
                }
                _ => false,
            },
            _ => false,
        }
    }
}

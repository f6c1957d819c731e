//! Fit-to-viewport scale and anchoring offset for the whole logo.

use glam::Vec2;

use crate::config::{LayoutPolicy, SceneConfig};

/// Logical bounding box of the source image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ViewBox {
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite())
    }
}

/// Visible page area in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Scene placement for one build generation. Recomputed on every resize.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneLayout {
    pub view_box: ViewBox,
    pub viewport: Viewport,
    pub scale: f32,
    pub offset: Vec2,
}

impl SceneLayout {
    /// World position of a point given in source-image coordinates.
    #[inline]
    pub fn to_world(&self, p: Vec2) -> Vec2 {
        p * self.scale + self.offset
    }
}

/// Uniform scale: the tighter of the two axis fits into the padded viewport,
/// times the de-emphasis multiplier. A degenerate box falls back to 1 before
/// the multiplier.
pub fn fit_scale(view_box: &ViewBox, viewport: &Viewport, padding: f32, multiplier: f32) -> f32 {
    let avail_w = viewport.width * (1.0 - padding);
    let avail_h = viewport.height * (1.0 - padding);
    let fit = if view_box.is_degenerate() {
        1.0
    } else {
        (avail_w / view_box.width).min(avail_h / view_box.height)
    };
    let fit = if fit.is_finite() && fit >= 0.0 { fit } else { 1.0 };
    fit * multiplier
}

pub fn compute_layout(view_box: ViewBox, viewport: Viewport, config: &SceneConfig) -> SceneLayout {
    let scale = fit_scale(
        &view_box,
        &viewport,
        config.padding_fraction,
        config.scale_multiplier,
    );
    let scaled = Vec2::new(view_box.width * scale, view_box.height * scale);
    let origin = Vec2::new(view_box.x * scale, view_box.y * scale);
    let anchor = match config.layout_policy {
        LayoutPolicy::BottomRight => Vec2::new(viewport.width, viewport.height) - scaled,
        LayoutPolicy::Centered => (Vec2::new(viewport.width, viewport.height) - scaled) * 0.5,
    };
    SceneLayout {
        view_box,
        viewport,
        scale,
        offset: anchor - origin,
    }
}

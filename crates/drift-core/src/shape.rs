//! Shape data: extracted vector shapes and the bodies placed from them.

use glam::Vec2;

use crate::config::SceneConfig;

/// Semantic class of a shape, fixed at build time. Drives the material lookup
/// and the drag-release fallback damping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ShapeClass {
    Arrow,
    Lettering,
    #[default]
    Default,
}

impl ShapeClass {
    pub fn classify(tag: Option<&str>, config: &SceneConfig) -> Self {
        match tag {
            Some(t) if config.arrow_ids.iter().any(|id| id == t) => Self::Arrow,
            Some(t) if config.lettering_ids.iter().any(|id| id == t) => Self::Lettering,
            _ => Self::Default,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeMaterial {
    pub density: f32,
    /// Per-tick velocity decay in \[0, 1).
    pub air_friction: f32,
    pub restitution: f32,
    pub friction: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ShapeStyle {
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f32,
}

/// One sampled path from the source image. Immutable after extraction.
#[derive(Clone, Debug)]
pub struct VectorShape {
    pub points: Vec<Vec2>,
    pub centroid: Vec2,
    pub style: ShapeStyle,
    pub tag: Option<String>,
}

/// A rigid body description placed in world space.
///
/// `outline` and `parts` are in body-local coordinates: centered on the shape
/// centroid and already multiplied by the layout scale. Every part is drawn
/// with `style.fill`, so the seams of a decomposed body stay invisible.
#[derive(Clone, Debug)]
pub struct PlacedBody {
    pub position: Vec2,
    pub outline: Vec<Vec2>,
    pub parts: Vec<Vec<Vec2>>,
    pub material: ShapeMaterial,
    pub class: ShapeClass,
    pub is_static: bool,
    pub style: ShapeStyle,
    pub tag: Option<String>,
}

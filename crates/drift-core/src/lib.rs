//! Scene building and scroll-driven physics moods for an SVG logo.
//!
//! Nothing in this crate touches the DOM. The web front end fetches the asset,
//! feeds scroll/pointer events in and applies the returned effects to a
//! [`PhysicsWorld`], which keeps every state transition testable on the host.

pub mod builder;
pub mod clock;
pub mod config;
pub mod constants;
pub mod drag;
pub mod geometry;
pub mod layout;
pub mod lifecycle;
pub mod mood;
pub mod path;
pub mod physics;
pub mod rapier_world;
pub mod scene;
pub mod settle;
pub mod shape;
pub mod svg;

pub use builder::{build_scene, extract_shapes, place_shapes, BuiltScene};
pub use clock::StepClock;
pub use config::{DragRestorePolicy, LayoutPolicy, SceneConfig};
pub use drag::DragTracker;
pub use layout::{compute_layout, SceneLayout, ViewBox, Viewport};
pub use lifecycle::{SceneGenerations, Subscription, Teardown};
pub use mood::{apply_effects, Effect, Mood, MoodController, MoodEvent, MoodState};
pub use physics::{BodyId, PhysicsWorld, Pose};
pub use rapier_world::RapierWorld;
pub use scene::Scene;
pub use shape::{PlacedBody, ShapeClass, ShapeMaterial, ShapeStyle, VectorShape};
pub use svg::{PathElement, SvgDocument};

use thiserror::Error;

/// Failures that leave the scene empty. All of them are asset-load problems.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Invalid attribute: {0}")]
    Attribute(String),

    #[error("SVG has no usable viewBox or width/height")]
    MissingViewBox,

    #[error("SVG contains no path elements")]
    NoPaths,

    #[error("Fetch failed: {0}")]
    Fetch(String),
}

pub type Result<T> = std::result::Result<T, SceneError>;

/// Per-path failures. These are logged and the path is skipped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
    #[error("path data could not be parsed near `{0}`")]
    BadPathData(String),

    #[error("path sampled to no vertices")]
    EmptySample,

    #[error("path segment of length {0} is too long or not finite")]
    OversizedSegment(f32),
}

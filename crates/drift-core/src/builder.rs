//! SVG asset to placed, settled rigid bodies.

use glam::Vec2;

use crate::config::SceneConfig;
use crate::constants::{DEFAULT_FILL, DEFAULT_STROKE_WIDTH};
use crate::geometry::{centroid, decompose_convex, scale, translate};
use crate::layout::{compute_layout, SceneLayout, Viewport};
use crate::path::{parse_path_data, sample_path};
use crate::physics::{BodyId, PhysicsWorld};
use crate::settle::settle_and_freeze;
use crate::shape::{PlacedBody, ShapeClass, ShapeStyle, VectorShape};
use crate::svg::{parse_document, PathElement, SvgDocument};
use crate::{Result, ShapeError};

/// Output of one build generation.
#[derive(Clone, Debug)]
pub struct BuiltScene {
    pub layout: SceneLayout,
    pub bodies: Vec<PlacedBody>,
    /// Parallel to `bodies`.
    pub handles: Vec<BodyId>,
    pub walls: Vec<BodyId>,
}

pub fn extract_shape(el: &PathElement, sample_length: f32) -> std::result::Result<VectorShape, ShapeError> {
    let commands = parse_path_data(&el.d)?;
    let points = sample_path(&commands, sample_length)?;
    if points.is_empty() {
        return Err(ShapeError::EmptySample);
    }
    let fill = el.fill.clone().unwrap_or_else(|| DEFAULT_FILL.to_string());
    let stroke = el.stroke.clone().unwrap_or_else(|| fill.clone());
    let stroke_width = el
        .stroke_width
        .filter(|w| *w > 0.0)
        .unwrap_or(DEFAULT_STROKE_WIDTH);
    Ok(VectorShape {
        centroid: centroid(&points),
        points,
        style: ShapeStyle {
            fill,
            stroke,
            stroke_width,
        },
        tag: el.id.clone(),
    })
}

/// Sample every path; paths that fail are logged and skipped.
pub fn extract_shapes(doc: &SvgDocument, config: &SceneConfig) -> Vec<VectorShape> {
    doc.paths
        .iter()
        .enumerate()
        .filter_map(|(i, el)| match extract_shape(el, config.sample_length) {
            Ok(s) => Some(s),
            Err(e) => {
                log::warn!("[scene] skipping path #{} (id={:?}): {}", i, el.id, e);
                None
            }
        })
        .collect()
}

/// Center each shape on its centroid, scale it, and position it in the world.
/// Bodies come out dynamic; the settle phase freezes them.
pub fn place_shapes(shapes: &[VectorShape], layout: &SceneLayout, config: &SceneConfig) -> Vec<PlacedBody> {
    shapes
        .iter()
        .map(|shape| {
            let centered = translate(&shape.points, -shape.centroid);
            let outline = scale(&centered, layout.scale);
            let class = ShapeClass::classify(shape.tag.as_deref(), config);
            PlacedBody {
                position: layout.to_world(shape.centroid),
                parts: decompose_convex(&outline),
                outline,
                material: config.materials.get(class),
                class,
                is_static: false,
                style: shape.style.clone(),
                tag: shape.tag.clone(),
            }
        })
        .collect()
}

/// Static boundary boxes just outside the viewport; the ceiling sits higher
/// so bodies may float above the visible top edge.
pub fn add_walls<W: PhysicsWorld + ?Sized>(world: &mut W, viewport: Viewport, config: &SceneConfig) -> Vec<BodyId> {
    let t = config.wall_thickness;
    let (w, h) = (viewport.width, viewport.height);
    vec![
        world.add_wall(Vec2::new(w * 0.5, h + t * 0.5), Vec2::new(w * 0.5, t * 0.5)),
        world.add_wall(
            Vec2::new(w * 0.5, -t * 0.5 - config.ceiling_lift),
            Vec2::new(w * 0.5, t * 0.5),
        ),
        world.add_wall(Vec2::new(-t * 0.5, h * 0.5), Vec2::new(t * 0.5, h * 0.5)),
        world.add_wall(Vec2::new(w + t * 0.5, h * 0.5), Vec2::new(t * 0.5, h * 0.5)),
    ]
}

/// Parse, place, settle and freeze. The world must be empty.
pub fn build_scene<W: PhysicsWorld + ?Sized>(
    svg_text: &str,
    viewport: Viewport,
    config: &SceneConfig,
    world: &mut W,
) -> Result<BuiltScene> {
    let doc = parse_document(svg_text)?;
    let layout = compute_layout(doc.view_box, viewport, config);
    log::info!(
        "[scene] building: {} paths, viewport {}x{}, scale {:.3}",
        doc.paths.len(),
        viewport.width,
        viewport.height,
        layout.scale
    );

    let shapes = extract_shapes(&doc, config);
    let mut bodies = place_shapes(&shapes, &layout, config);

    world.set_gravity(config.base_gravity);
    let walls = if config.walls {
        add_walls(world, viewport, config)
    } else {
        Vec::new()
    };
    let handles: Vec<BodyId> = bodies.iter().map(|b| world.add_body(b)).collect();

    settle_and_freeze(world, &handles, config.settle_steps, config.settle_dt);
    for b in &mut bodies {
        b.is_static = true;
    }

    log::info!("[scene] built {} bodies; simulation paused", bodies.len());
    Ok(BuiltScene {
        layout,
        bodies,
        handles,
        walls,
    })
}

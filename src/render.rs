use crate::constants::{CONSTRAINT_COLOR, CONSTRAINT_WIDTH};
use crate::LiveScene;
use drift_core::constants::PART_STROKE_WIDTH;
use drift_core::{PhysicsWorld, PlacedBody, Pose};
use glam::Vec2;
use wasm_bindgen::JsValue;
use web_sys as web;

fn trace(ctx: &web::CanvasRenderingContext2d, points: &[Vec2]) {
    ctx.begin_path();
    let mut iter = points.iter();
    if let Some(p0) = iter.next() {
        ctx.move_to(p0.x as f64, p0.y as f64);
    }
    for p in iter {
        ctx.line_to(p.x as f64, p.y as f64);
    }
    ctx.close_path();
}

fn draw_body(
    ctx: &web::CanvasRenderingContext2d,
    body: &PlacedBody,
    pose: Pose,
) -> Result<(), JsValue> {
    ctx.save();
    ctx.translate(pose.position.x as f64, pose.position.y as f64)?;
    ctx.rotate(pose.angle as f64)?;

    // Parts are filled and stroked in the fill colour so the seams vanish.
    ctx.set_fill_style_str(&body.style.fill);
    ctx.set_stroke_style_str(&body.style.fill);
    ctx.set_line_width(PART_STROKE_WIDTH as f64);
    for part in &body.parts {
        trace(ctx, part);
        ctx.fill();
        ctx.stroke();
    }

    if body.style.stroke != body.style.fill {
        ctx.set_stroke_style_str(&body.style.stroke);
        ctx.set_line_width(body.style.stroke_width as f64);
        trace(ctx, &body.outline);
        ctx.stroke();
    }

    ctx.restore();
    Ok(())
}

/// Redraw the whole scene. Coordinates are CSS pixels; `dpr` maps them onto
/// the backing store.
pub fn draw(
    ctx: &web::CanvasRenderingContext2d,
    scene: &LiveScene,
    dpr: f64,
) -> Result<(), JsValue> {
    let viewport = scene.layout().viewport;
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, viewport.width as f64, viewport.height as f64);

    for (body, pose) in scene.bodies() {
        draw_body(ctx, body, pose)?;
    }

    if let Some(active) = scene.drag().active() {
        if let Some(pose) = scene.world().pose(active.body) {
            let anchor = pose.apply(active.local_anchor);
            ctx.set_stroke_style_str(CONSTRAINT_COLOR);
            ctx.set_line_width(CONSTRAINT_WIDTH);
            ctx.begin_path();
            ctx.move_to(anchor.x as f64, anchor.y as f64);
            ctx.line_to(active.pointer.x as f64, active.pointer.y as f64);
            ctx.stroke();
        }
    }
    Ok(())
}

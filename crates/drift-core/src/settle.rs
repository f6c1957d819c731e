//! Pre-display settle phase: a short burst of dynamic steps, then freeze.

use crate::physics::{BodyId, PhysicsWorld};

/// Run `steps` sub-steps of `dt` seconds with whatever bodies are dynamic.
pub fn settle<W: PhysicsWorld + ?Sized>(world: &mut W, steps: u32, dt: f32) {
    for _ in 0..steps {
        world.step(dt);
    }
}

/// Settle, then make every listed body static so the arrangement holds
/// still until the scene is released.
pub fn settle_and_freeze<W: PhysicsWorld + ?Sized>(
    world: &mut W,
    handles: &[BodyId],
    steps: u32,
    dt: f32,
) {
    settle(world, steps, dt);
    for id in handles {
        world.set_static(*id, true);
    }
    log::info!("[scene] settle complete ({} steps); {} bodies frozen", steps, handles.len());
}

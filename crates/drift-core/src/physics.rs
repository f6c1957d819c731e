//! The capability set the scene needs from a rigid-body engine.
//!
//! Quantities passed through this trait use the per-tick conventions of the
//! tuning constants: gravity in gravity units, impulses as per-tick velocity
//! changes already multiplied by mass, angular velocity in radians per tick,
//! air friction as the per-tick velocity decay fraction.

use glam::Vec2;

use crate::shape::PlacedBody;

/// Opaque handle to a body in a [`PhysicsWorld`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub position: Vec2,
    pub angle: f32,
}

impl Pose {
    /// Map a body-local point into world space.
    #[inline]
    pub fn apply(&self, local: Vec2) -> Vec2 {
        Vec2::from_angle(self.angle).rotate(local) + self.position
    }

    /// Map a world point into body-local space.
    #[inline]
    pub fn inverse_apply(&self, world: Vec2) -> Vec2 {
        Vec2::from_angle(-self.angle).rotate(world - self.position)
    }
}

pub trait PhysicsWorld {
    fn add_body(&mut self, body: &PlacedBody) -> BodyId;
    /// Immovable box used for the viewport boundary.
    fn add_wall(&mut self, center: Vec2, half_extents: Vec2) -> BodyId;
    fn remove_body(&mut self, id: BodyId);
    /// Drop every body and collider.
    fn clear(&mut self);

    fn set_static(&mut self, id: BodyId, is_static: bool);
    fn is_static(&self, id: BodyId) -> bool;
    fn mass(&self, id: BodyId) -> f32;
    fn pose(&self, id: BodyId) -> Option<Pose>;

    fn apply_impulse(&mut self, id: BodyId, impulse: Vec2);
    fn set_angular_velocity(&mut self, id: BodyId, per_tick: f32);
    /// Per-tick linear velocity (world units per tick).
    fn set_velocity(&mut self, id: BodyId, per_tick: Vec2);
    fn air_friction(&self, id: BodyId) -> f32;
    fn set_air_friction(&mut self, id: BodyId, per_tick: f32);

    fn gravity(&self) -> f32;
    fn set_gravity(&mut self, units: f32);

    /// Topmost dynamic or static logo body containing `point`; walls excluded.
    fn body_at(&self, point: Vec2) -> Option<BodyId>;

    fn step(&mut self, dt_seconds: f32);
}

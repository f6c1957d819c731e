//! [`PhysicsWorld`] backed by rapier2d. World units are CSS pixels, y down.

use fnv::FnvHashMap;
use glam::Vec2;
use rapier2d::prelude::*;

use crate::constants::{GRAVITY_PX_PER_S2, TICK_SECONDS};
use crate::physics::{BodyId, PhysicsWorld, Pose};
use crate::shape::PlacedBody;

const TICKS_PER_SECOND: f32 = 1.0 / TICK_SECONDS;
// A per-tick force k acts for one tick of 1000/60 ms: dv = k/m * tick_ms^2 px/tick.
const TICK_MS: f32 = 1000.0 * TICK_SECONDS;
const FORCE_TO_IMPULSE: f32 = TICK_MS * TICK_MS * TICKS_PER_SECOND;
const FALLBACK_RADIUS: f32 = 1.0;

/// Per-tick velocity decay to rapier's continuous damping coefficient.
#[inline]
pub fn damping_from_air_friction(per_tick: f32) -> f32 {
    let f = per_tick.clamp(0.0, 0.99);
    TICKS_PER_SECOND * f / (1.0 - f)
}

struct Entry {
    handle: RigidBodyHandle,
    air_friction: f32,
    wall: bool,
}

pub struct RapierWorld {
    gravity_units: f32,
    params: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: BroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd: CCDSolver,
    entries: FnvHashMap<BodyId, Entry>,
    by_handle: FnvHashMap<RigidBodyHandle, BodyId>,
    next_id: u32,
}

impl RapierWorld {
    pub fn new(gravity_units: f32) -> Self {
        Self {
            gravity_units,
            params: IntegrationParameters::default(),
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: BroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd: CCDSolver::new(),
            entries: FnvHashMap::default(),
            by_handle: FnvHashMap::default(),
            next_id: 0,
        }
    }

    pub fn body_count(&self) -> usize {
        self.entries.values().filter(|e| !e.wall).count()
    }

    fn register(&mut self, handle: RigidBodyHandle, air_friction: f32, wall: bool) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        self.entries.insert(
            id,
            Entry {
                handle,
                air_friction,
                wall,
            },
        );
        self.by_handle.insert(handle, id);
        id
    }

    fn body(&self, id: BodyId) -> Option<&RigidBody> {
        self.entries.get(&id).and_then(|e| self.bodies.get(e.handle))
    }

    fn body_mut(&mut self, id: BodyId) -> Option<&mut RigidBody> {
        let handle = self.entries.get(&id)?.handle;
        self.bodies.get_mut(handle)
    }
}

impl PhysicsWorld for RapierWorld {
    fn add_body(&mut self, body: &PlacedBody) -> BodyId {
        let damping = damping_from_air_friction(body.material.air_friction);
        let builder = if body.is_static {
            RigidBodyBuilder::fixed()
        } else {
            RigidBodyBuilder::dynamic()
        };
        let rb = builder
            .translation(vector![body.position.x, body.position.y])
            .linear_damping(damping)
            .angular_damping(damping)
            .can_sleep(false)
            .build();
        let handle = self.bodies.insert(rb);

        let mut attached = 0;
        for part in &body.parts {
            let pts: Vec<Point<Real>> = part.iter().map(|p| point![p.x, p.y]).collect();
            if let Some(builder) = ColliderBuilder::convex_hull(&pts) {
                let col = builder
                    .density(body.material.density)
                    .restitution(body.material.restitution)
                    .friction(body.material.friction)
                    .build();
                self.colliders
                    .insert_with_parent(col, handle, &mut self.bodies);
                attached += 1;
            }
        }
        if attached == 0 {
            log::warn!("[scene] body {:?} has no convex parts; using a point collider", body.tag);
            let col = ColliderBuilder::ball(FALLBACK_RADIUS)
                .density(body.material.density)
                .build();
            self.colliders
                .insert_with_parent(col, handle, &mut self.bodies);
        }
        self.register(handle, body.material.air_friction, false)
    }

    fn add_wall(&mut self, center: Vec2, half_extents: Vec2) -> BodyId {
        let rb = RigidBodyBuilder::fixed()
            .translation(vector![center.x, center.y])
            .build();
        let handle = self.bodies.insert(rb);
        let col = ColliderBuilder::cuboid(half_extents.x, half_extents.y).build();
        self.colliders
            .insert_with_parent(col, handle, &mut self.bodies);
        self.register(handle, 0.0, true)
    }

    fn remove_body(&mut self, id: BodyId) {
        if let Some(entry) = self.entries.remove(&id) {
            self.by_handle.remove(&entry.handle);
            self.bodies.remove(
                entry.handle,
                &mut self.islands,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                true,
            );
        }
    }

    fn clear(&mut self) {
        // Ids are never reused, so stale handles from before the clear stay dead.
        let next_id = self.next_id;
        *self = Self::new(self.gravity_units);
        self.next_id = next_id;
    }

    fn set_static(&mut self, id: BodyId, is_static: bool) {
        if let Some(rb) = self.body_mut(id) {
            if is_static {
                rb.set_linvel(vector![0.0, 0.0], false);
                rb.set_angvel(0.0, false);
                rb.set_body_type(RigidBodyType::Fixed, false);
            } else {
                rb.set_body_type(RigidBodyType::Dynamic, true);
            }
        }
    }

    fn is_static(&self, id: BodyId) -> bool {
        self.body(id).map_or(true, |rb| !rb.is_dynamic())
    }

    fn mass(&self, id: BodyId) -> f32 {
        let Some(rb) = self.body(id) else {
            return 0.0;
        };
        let m = rb.mass();
        if m > 0.0 {
            return m;
        }
        // Mass properties are refreshed on the next step; sum the colliders meanwhile.
        rb.colliders()
            .iter()
            .filter_map(|h| self.colliders.get(*h))
            .map(|c| c.mass_properties().mass())
            .sum()
    }

    fn pose(&self, id: BodyId) -> Option<Pose> {
        self.body(id).map(|rb| Pose {
            position: Vec2::new(rb.translation().x, rb.translation().y),
            angle: rb.rotation().angle(),
        })
    }

    fn apply_impulse(&mut self, id: BodyId, impulse: Vec2) {
        if let Some(rb) = self.body_mut(id) {
            if rb.is_dynamic() {
                let j = impulse * FORCE_TO_IMPULSE;
                rb.apply_impulse(vector![j.x, j.y], true);
            }
        }
    }

    fn set_angular_velocity(&mut self, id: BodyId, per_tick: f32) {
        if let Some(rb) = self.body_mut(id) {
            rb.set_angvel(per_tick * TICKS_PER_SECOND, true);
        }
    }

    fn set_velocity(&mut self, id: BodyId, per_tick: Vec2) {
        if let Some(rb) = self.body_mut(id) {
            let v = per_tick * TICKS_PER_SECOND;
            rb.set_linvel(vector![v.x, v.y], true);
        }
    }

    fn air_friction(&self, id: BodyId) -> f32 {
        self.entries.get(&id).map_or(0.0, |e| e.air_friction)
    }

    fn set_air_friction(&mut self, id: BodyId, per_tick: f32) {
        let damping = damping_from_air_friction(per_tick);
        if let Some(entry) = self.entries.get_mut(&id) {
            entry.air_friction = per_tick;
            if let Some(rb) = self.bodies.get_mut(entry.handle) {
                rb.set_linear_damping(damping);
                rb.set_angular_damping(damping);
            }
        }
    }

    fn gravity(&self) -> f32 {
        self.gravity_units
    }

    fn set_gravity(&mut self, units: f32) {
        self.gravity_units = units;
    }

    fn body_at(&self, point: Vec2) -> Option<BodyId> {
        let p = point![point.x, point.y];
        self.colliders
            .iter()
            .filter(|(_, co)| co.shape().contains_point(co.position(), &p))
            .filter_map(|(_, co)| co.parent())
            .filter_map(|h| self.by_handle.get(&h).copied())
            .filter(|id| self.entries.get(id).map_or(false, |e| !e.wall))
            .max()
    }

    fn step(&mut self, dt_seconds: f32) {
        if dt_seconds <= 0.0 {
            return;
        }
        self.params.dt = dt_seconds;
        let gravity = vector![0.0, self.gravity_units * GRAVITY_PX_PER_S2];
        self.pipeline.step(
            &gravity,
            &self.params,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd,
            None,
            &(),
            &(),
        );
    }
}

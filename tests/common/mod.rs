// Deterministic in-memory world for driving the controllers without rapier.

#![allow(dead_code)]
use std::collections::BTreeMap;

use drift_core::{BodyId, PhysicsWorld, PlacedBody, Pose};
use glam::Vec2;

#[derive(Clone, Debug)]
pub struct FakeBody {
    pub pose: Pose,
    pub is_static: bool,
    pub mass: f32,
    pub air_friction: f32,
    pub impulses: Vec<Vec2>,
    pub angular_velocity: f32,
    pub velocity: Vec2,
    pub radius: f32,
    pub wall: bool,
}

#[derive(Default)]
pub struct FakeWorld {
    pub bodies: BTreeMap<BodyId, FakeBody>,
    pub gravity: f32,
    pub gravity_history: Vec<f32>,
    pub steps: u32,
    next: u32,
}

impl FakeWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dynamic disc at `position` with the given mass.
    pub fn add_disc(&mut self, position: Vec2, radius: f32, mass: f32, air_friction: f32) -> BodyId {
        self.insert(FakeBody {
            pose: Pose { position, angle: 0.0 },
            is_static: false,
            mass,
            air_friction,
            impulses: Vec::new(),
            angular_velocity: 0.0,
            velocity: Vec2::ZERO,
            radius,
            wall: false,
        })
    }

    fn insert(&mut self, body: FakeBody) -> BodyId {
        let id = BodyId(self.next);
        self.next += 1;
        self.bodies.insert(id, body);
        id
    }

    pub fn body(&self, id: BodyId) -> &FakeBody {
        &self.bodies[&id]
    }
}

impl PhysicsWorld for FakeWorld {
    fn add_body(&mut self, body: &PlacedBody) -> BodyId {
        let radius = body.outline.iter().map(|p| p.length()).fold(0.0, f32::max);
        let id = self.add_disc(body.position, radius, body.material.density * 100.0, body.material.air_friction);
        self.set_static(id, body.is_static);
        id
    }

    fn add_wall(&mut self, center: Vec2, half_extents: Vec2) -> BodyId {
        self.insert(FakeBody {
            pose: Pose { position: center, angle: 0.0 },
            is_static: true,
            mass: 0.0,
            air_friction: 0.0,
            impulses: Vec::new(),
            angular_velocity: 0.0,
            velocity: Vec2::ZERO,
            radius: half_extents.max_element(),
            wall: true,
        })
    }

    fn remove_body(&mut self, id: BodyId) {
        self.bodies.remove(&id);
    }

    fn clear(&mut self) {
        self.bodies.clear();
    }

    fn set_static(&mut self, id: BodyId, is_static: bool) {
        if let Some(b) = self.bodies.get_mut(&id) {
            b.is_static = is_static;
        }
    }

    fn is_static(&self, id: BodyId) -> bool {
        self.bodies.get(&id).map_or(true, |b| b.is_static)
    }

    fn mass(&self, id: BodyId) -> f32 {
        self.bodies.get(&id).map_or(0.0, |b| b.mass)
    }

    fn pose(&self, id: BodyId) -> Option<Pose> {
        self.bodies.get(&id).map(|b| b.pose)
    }

    fn apply_impulse(&mut self, id: BodyId, impulse: Vec2) {
        if let Some(b) = self.bodies.get_mut(&id) {
            b.impulses.push(impulse);
        }
    }

    fn set_angular_velocity(&mut self, id: BodyId, per_tick: f32) {
        if let Some(b) = self.bodies.get_mut(&id) {
            b.angular_velocity = per_tick;
        }
    }

    fn set_velocity(&mut self, id: BodyId, per_tick: Vec2) {
        if let Some(b) = self.bodies.get_mut(&id) {
            b.velocity = per_tick;
        }
    }

    fn air_friction(&self, id: BodyId) -> f32 {
        self.bodies.get(&id).map_or(0.0, |b| b.air_friction)
    }

    fn set_air_friction(&mut self, id: BodyId, per_tick: f32) {
        if let Some(b) = self.bodies.get_mut(&id) {
            b.air_friction = per_tick;
        }
    }

    fn gravity(&self) -> f32 {
        self.gravity
    }

    fn set_gravity(&mut self, units: f32) {
        self.gravity = units;
        self.gravity_history.push(units);
    }

    fn body_at(&self, point: Vec2) -> Option<BodyId> {
        self.bodies
            .iter()
            .rev()
            .find(|(_, b)| !b.wall && b.pose.position.distance(point) <= b.radius)
            .map(|(id, _)| *id)
    }

    fn step(&mut self, _dt: f32) {
        self.steps += 1;
        for b in self.bodies.values_mut().filter(|b| !b.is_static) {
            b.pose.position += b.velocity;
            b.pose.angle += b.angular_velocity;
        }
    }
}

//! Pointer drag: damping swap while held and a spring-like drive toward the pointer.

use fnv::FnvHashMap;
use glam::Vec2;

use crate::config::{DragParams, DragRestorePolicy, MaterialTable};
use crate::physics::{BodyId, PhysicsWorld};
use crate::shape::ShapeClass;

/// Damping for a released body that had no remembered value.
pub fn fallback_air_friction(class: ShapeClass, policy: DragRestorePolicy, materials: &MaterialTable) -> f32 {
    match (class, policy) {
        (ShapeClass::Arrow, _) => materials.arrow.air_friction,
        (ShapeClass::Lettering, _) | (ShapeClass::Default, DragRestorePolicy::AnyNonArrow) => {
            materials.lettering.air_friction
        }
        (ShapeClass::Default, DragRestorePolicy::LetteringOnly) => materials.default.air_friction,
    }
}

/// Per-tick velocity that moves the grabbed point `stiffness` of the way to the pointer.
#[inline]
pub fn drive_velocity(anchor_world: Vec2, pointer: Vec2, stiffness: f32) -> Vec2 {
    (pointer - anchor_world) * stiffness
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActiveDrag {
    pub body: BodyId,
    /// Grab point in body-local coordinates.
    pub local_anchor: Vec2,
    pub pointer: Vec2,
}

#[derive(Default)]
pub struct DragTracker {
    remembered: FnvHashMap<BodyId, f32>,
    active: Option<ActiveDrag>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<ActiveDrag> {
        self.active
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    pub fn remembered(&self, body: BodyId) -> Option<f32> {
        self.remembered.get(&body).copied()
    }

    /// Start dragging `body` at world `point`. Static bodies cannot be grabbed.
    pub fn grab<W: PhysicsWorld + ?Sized>(
        &mut self,
        world: &mut W,
        body: BodyId,
        point: Vec2,
        params: &DragParams,
    ) -> bool {
        if world.is_static(body) {
            return false;
        }
        if let Some(prev) = self.active {
            if prev.body != body {
                log::warn!("[drag] grab of {:?} while {:?} still held", body, prev.body);
            }
        }
        let Some(pose) = world.pose(body) else {
            return false;
        };
        // Never remember the dragged value itself (re-grab without a release).
        let current = world.air_friction(body);
        if current != params.dragged_air_friction {
            self.remembered.entry(body).or_insert(current);
        }
        world.set_air_friction(body, params.dragged_air_friction);
        self.active = Some(ActiveDrag {
            body,
            local_anchor: pose.inverse_apply(point),
            pointer: point,
        });
        log::info!("[drag] grab {:?}", body);
        true
    }

    pub fn move_to(&mut self, point: Vec2) {
        if let Some(a) = self.active.as_mut() {
            a.pointer = point;
        }
    }

    /// Pull the held body toward the pointer; call once per fixed step.
    pub fn drive<W: PhysicsWorld + ?Sized>(&self, world: &mut W, stiffness: f32) {
        let Some(a) = self.active else {
            return;
        };
        if let Some(pose) = world.pose(a.body) {
            let anchor = pose.apply(a.local_anchor);
            world.set_velocity(a.body, drive_velocity(anchor, a.pointer, stiffness));
        }
    }

    /// End the drag and restore damping: the remembered value when present,
    /// else the class fallback.
    pub fn release<W: PhysicsWorld + ?Sized>(
        &mut self,
        world: &mut W,
        class_of: impl Fn(BodyId) -> ShapeClass,
        params: &DragParams,
        materials: &MaterialTable,
    ) -> Option<BodyId> {
        let a = self.active.take()?;
        let restore = self
            .remembered
            .remove(&a.body)
            .unwrap_or_else(|| fallback_air_friction(class_of(a.body), params.restore_policy, materials));
        world.set_air_friction(a.body, restore);
        log::info!("[drag] release {:?} (air friction {})", a.body, restore);
        Some(a.body)
    }
}

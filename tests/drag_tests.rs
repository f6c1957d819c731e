// Host-side tests for drag damping and the pointer drive.

mod common;

use common::FakeWorld;
use drift_core::config::{DragParams, MaterialTable};
use drift_core::drag::{drive_velocity, fallback_air_friction};
use drift_core::{DragRestorePolicy, DragTracker, PhysicsWorld, ShapeClass};
use glam::Vec2;

#[test]
fn grab_swaps_damping_and_release_restores_it() {
    let mut world = FakeWorld::new();
    let id = world.add_disc(Vec2::new(50.0, 50.0), 10.0, 1.0, 0.0005);
    let params = DragParams::default();
    let materials = MaterialTable::default();
    let mut drag = DragTracker::new();

    assert!(drag.grab(&mut world, id, Vec2::new(52.0, 50.0), &params));
    assert!(drag.is_dragging());
    assert_eq!(world.air_friction(id), 0.2);
    assert_eq!(drag.remembered(id), Some(0.0005));

    let released = drag.release(&mut world, |_| ShapeClass::Default, &params, &materials);
    assert_eq!(released, Some(id));
    assert_eq!(world.air_friction(id), 0.0005);
    assert!(!drag.is_dragging());
    assert_eq!(drag.remembered(id), None);
}

#[test]
fn static_bodies_cannot_be_grabbed() {
    let mut world = FakeWorld::new();
    let id = world.add_disc(Vec2::ZERO, 10.0, 1.0, 0.01);
    world.set_static(id, true);
    let mut drag = DragTracker::new();
    assert!(!drag.grab(&mut world, id, Vec2::ZERO, &DragParams::default()));
    assert_eq!(world.air_friction(id), 0.01);
}

#[test]
fn regrab_without_release_keeps_original_value() {
    let mut world = FakeWorld::new();
    let id = world.add_disc(Vec2::ZERO, 10.0, 1.0, 0.08);
    let params = DragParams::default();
    let mut drag = DragTracker::new();
    drag.grab(&mut world, id, Vec2::ZERO, &params);
    drag.grab(&mut world, id, Vec2::ZERO, &params);
    drag.release(&mut world, |_| ShapeClass::Arrow, &params, &MaterialTable::default());
    assert_eq!(world.air_friction(id), 0.08);
}

#[test]
fn fallback_follows_class_and_policy() {
    let m = MaterialTable::default();
    use DragRestorePolicy::*;
    assert_eq!(fallback_air_friction(ShapeClass::Arrow, LetteringOnly, &m), 0.0005);
    assert_eq!(fallback_air_friction(ShapeClass::Arrow, AnyNonArrow, &m), 0.0005);
    assert_eq!(fallback_air_friction(ShapeClass::Lettering, LetteringOnly, &m), 0.08);
    assert_eq!(fallback_air_friction(ShapeClass::Default, LetteringOnly, &m), 0.01);
    assert_eq!(fallback_air_friction(ShapeClass::Default, AnyNonArrow, &m), 0.08);
}

#[test]
fn release_without_memory_uses_fallback() {
    // A body whose friction already equals the dragged value leaves nothing
    // to remember, so release falls back to its class.
    let mut world = FakeWorld::new();
    let id = world.add_disc(Vec2::ZERO, 10.0, 1.0, 0.2);
    let params = DragParams {
        restore_policy: DragRestorePolicy::AnyNonArrow,
        ..DragParams::default()
    };
    let mut drag = DragTracker::new();
    assert!(drag.grab(&mut world, id, Vec2::ZERO, &params));
    assert_eq!(drag.remembered(id), None);
    drag.release(&mut world, |_| ShapeClass::Default, &params, &MaterialTable::default());
    assert_eq!(world.air_friction(id), 0.08);
}

#[test]
fn drive_pulls_grab_point_toward_pointer() {
    assert_eq!(
        drive_velocity(Vec2::new(0.0, 0.0), Vec2::new(10.0, -20.0), 0.5),
        Vec2::new(5.0, -10.0)
    );

    let mut world = FakeWorld::new();
    let id = world.add_disc(Vec2::new(100.0, 100.0), 10.0, 1.0, 0.01);
    let params = DragParams::default();
    let mut drag = DragTracker::new();
    drag.grab(&mut world, id, Vec2::new(105.0, 100.0), &params);
    drag.move_to(Vec2::new(205.0, 100.0));
    for _ in 0..20 {
        drag.drive(&mut world, params.stiffness);
        world.step(1.0 / 60.0);
    }
    let pose = world.pose(id).unwrap();
    let anchor = pose.apply(drag.active().unwrap().local_anchor);
    assert!((anchor - Vec2::new(205.0, 100.0)).length() < 0.5);
}

#[test]
fn release_with_nothing_held_is_a_no_op() {
    let mut world = FakeWorld::new();
    let mut drag = DragTracker::new();
    assert_eq!(
        drag.release(&mut world, |_| ShapeClass::Default, &DragParams::default(), &MaterialTable::default()),
        None
    );
}

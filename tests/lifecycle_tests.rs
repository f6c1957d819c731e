// Host-side tests for the step clock and generation teardown.

use drift_core::{SceneGenerations, StepClock, Subscription, Teardown};
use std::cell::Cell;
use std::rc::Rc;

/// Stand-in for a DOM listener or timer: counts live registrations.
struct FakeListener {
    live: Rc<Cell<i32>>,
    active: bool,
}

impl FakeListener {
    fn register(live: &Rc<Cell<i32>>) -> Self {
        live.set(live.get() + 1);
        Self {
            live: live.clone(),
            active: true,
        }
    }
}

impl Subscription for FakeListener {
    fn cancel(&mut self) {
        if self.active {
            self.active = false;
            self.live.set(self.live.get() - 1);
        }
    }
}

fn wire_generation(gens: &mut SceneGenerations, live: &Rc<Cell<i32>>) -> u64 {
    let generation = gens.begin();
    let mut t = Teardown::new(generation);
    // scroll, wheel, pointer x4, quiet timer, frame loop
    for _ in 0..8 {
        t.push(FakeListener::register(live));
    }
    assert!(gens.install(t));
    generation
}

#[test]
fn rebuild_leaves_only_the_new_generation_live() {
    let live = Rc::new(Cell::new(0));
    let mut gens = SceneGenerations::new();
    wire_generation(&mut gens, &live);
    assert_eq!(live.get(), 8);

    for _ in 0..5 {
        wire_generation(&mut gens, &live);
        assert_eq!(live.get(), 8);
        assert_eq!(gens.live_subscriptions(), 8);
    }

    gens.teardown();
    assert_eq!(live.get(), 0);
    assert_eq!(gens.live_subscriptions(), 0);
}

#[test]
fn stale_generation_is_discarded_on_install() {
    let live = Rc::new(Cell::new(0));
    let mut gens = SceneGenerations::new();
    let old = gens.begin();
    // A resize starts a newer build before the first one finishes.
    let newer = gens.begin();
    assert!(!gens.is_current(old));

    let mut late = Teardown::new(old);
    late.push(FakeListener::register(&live));
    assert!(!gens.install(late));
    assert_eq!(live.get(), 0);

    let mut fresh = Teardown::new(newer);
    fresh.push(FakeListener::register(&live));
    assert!(gens.install(fresh));
    assert_eq!(live.get(), 1);
}

#[test]
fn teardown_runs_in_reverse_order_and_on_drop() {
    let order = Rc::new(std::cell::RefCell::new(Vec::new()));
    {
        let mut t = Teardown::new(1);
        for i in 0..3 {
            let order = order.clone();
            t.on_teardown(move || order.borrow_mut().push(i));
        }
        assert_eq!(t.len(), 3);
    }
    assert_eq!(*order.borrow(), vec![2, 1, 0]);
}

#[test]
fn shared_subscription_is_cancelled_through_the_handle() {
    let live = Rc::new(Cell::new(0));
    let shared = Rc::new(std::cell::RefCell::new(FakeListener::register(&live)));
    let mut t = Teardown::new(1);
    t.push(shared.clone());
    t.run();
    assert!(!shared.borrow().active);
    assert_eq!(live.get(), 0);
    assert!(t.is_empty());
}

#[test]
fn clock_runs_fixed_steps_and_caps_backlog() {
    let mut clock = StepClock::default();
    assert_eq!(clock.advance(1.0 / 60.0 + 1e-4), 1);
    assert_eq!(clock.advance(0.001), 0);
    // A long stall is clamped to the step cap.
    assert_eq!(clock.advance(5.0), 4);
    assert_eq!(clock.advance(0.0), 0);
    assert_eq!(clock.advance(f32::NAN), 0);
    assert_eq!(clock.advance(-1.0), 0);

    let mut steady = StepClock::new(0.01, 4, 0.25);
    let total: u32 = (0..100).map(|_| steady.advance(0.02)).sum();
    assert!((199..=200).contains(&total));
}

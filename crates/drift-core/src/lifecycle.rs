//! Ownership of everything a scene generation registers with its host:
//! event listeners, timers and the frame loop. Tearing a generation down
//! cancels all of it before the next generation starts.

use std::cell::RefCell;
use std::rc::Rc;

/// Something registered with the host that must be undone on teardown.
pub trait Subscription {
    fn cancel(&mut self);
}

impl<F: FnMut()> Subscription for Option<F> {
    fn cancel(&mut self) {
        if let Some(mut f) = self.take() {
            f();
        }
    }
}

impl<T: Subscription> Subscription for Rc<RefCell<T>> {
    fn cancel(&mut self) {
        self.borrow_mut().cancel();
    }
}

/// Subscriptions of one generation, cancelled in reverse registration order.
pub struct Teardown {
    generation: u64,
    items: Vec<Box<dyn Subscription>>,
}

impl Teardown {
    pub fn new(generation: u64) -> Self {
        Self {
            generation,
            items: Vec::new(),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn push(&mut self, item: impl Subscription + 'static) {
        self.items.push(Box::new(item));
    }

    /// Register a plain closure as the undo action.
    pub fn on_teardown(&mut self, f: impl FnMut() + 'static) {
        self.push(Some(f));
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn run(&mut self) {
        while let Some(mut item) = self.items.pop() {
            item.cancel();
        }
    }
}

impl Drop for Teardown {
    fn drop(&mut self) {
        self.run();
    }
}

/// Tracks the current scene generation. Async builds compare their
/// generation on completion and discard themselves when superseded.
#[derive(Default)]
pub struct SceneGenerations {
    current: u64,
    active: Option<Teardown>,
}

impl SceneGenerations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> u64 {
        self.current
    }

    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.current
    }

    /// Tear down the live generation and open a new one.
    pub fn begin(&mut self) -> u64 {
        self.teardown();
        self.current += 1;
        self.current
    }

    /// Hand over a finished generation's subscriptions. A stale generation is
    /// torn down immediately and `false` returned.
    pub fn install(&mut self, mut teardown: Teardown) -> bool {
        if !self.is_current(teardown.generation()) {
            log::info!(
                "[resize] discarding stale generation {} (current {})",
                teardown.generation(),
                self.current
            );
            teardown.run();
            return false;
        }
        if let Some(mut old) = self.active.replace(teardown) {
            old.run();
        }
        true
    }

    pub fn live_subscriptions(&self) -> usize {
        self.active.as_ref().map_or(0, Teardown::len)
    }

    pub fn teardown(&mut self) {
        if let Some(mut t) = self.active.take() {
            log::info!("[scene] tearing down generation {} ({} subscriptions)", t.generation(), t.len());
            t.run();
        }
    }
}

//! One scene generation: the physics world, its bodies and the controllers
//! that act on them. The page owns exactly one of these at a time.

use glam::Vec2;
use rand::Rng;

use crate::builder::{build_scene, BuiltScene};
use crate::clock::StepClock;
use crate::config::SceneConfig;
use crate::drag::DragTracker;
use crate::layout::{SceneLayout, Viewport};
use crate::mood::{apply_effects, Effect, Mood, MoodController, MoodEvent};
use crate::physics::{BodyId, PhysicsWorld, Pose};
use crate::shape::{PlacedBody, ShapeClass};
use crate::Result;

pub struct Scene<W: PhysicsWorld, R: Rng> {
    config: SceneConfig,
    world: W,
    built: BuiltScene,
    mood: MoodController<R>,
    drag: DragTracker,
    clock: StepClock,
    load_offset: f32,
}

impl<W: PhysicsWorld, R: Rng> Scene<W, R> {
    /// Build, settle and freeze. `load_offset` is the page scroll position
    /// when the scene was built.
    pub fn build(
        svg_text: &str,
        viewport: Viewport,
        config: SceneConfig,
        mut world: W,
        rng: R,
        load_offset: f32,
    ) -> Result<Self> {
        let built = build_scene(svg_text, viewport, &config, &mut world)?;
        let mood = MoodController::new(config.mood.clone(), rng);
        Ok(Self {
            config,
            world,
            built,
            mood,
            drag: DragTracker::new(),
            clock: StepClock::default(),
            load_offset,
        })
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn layout(&self) -> &SceneLayout {
        &self.built.layout
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn handles(&self) -> &[BodyId] {
        &self.built.handles
    }

    pub fn is_released(&self) -> bool {
        self.mood.is_active()
    }

    pub fn mood(&self) -> Mood {
        self.mood.mood()
    }

    pub fn mood_controller(&self) -> &MoodController<R> {
        &self.mood
    }

    pub fn drag(&self) -> &DragTracker {
        &self.drag
    }

    /// Placed bodies with their current pose.
    pub fn bodies(&self) -> impl Iterator<Item = (&PlacedBody, Pose)> + '_ {
        self.built
            .bodies
            .iter()
            .zip(self.built.handles.iter())
            .filter_map(|(b, id)| self.world.pose(*id).map(|p| (b, p)))
    }

    fn apply(&mut self, effects: Vec<Effect>) -> Vec<Effect> {
        apply_effects(&mut self.world, &effects);
        effects.into_iter().filter(Effect::is_timer).collect()
    }

    /// Release the frozen scene on the first scroll.
    pub fn release(&mut self, first_offset: f32) {
        let gravity = self.world.gravity();
        let effects = self
            .mood
            .activate(&self.built.handles, gravity, self.load_offset, first_offset);
        for b in &mut self.built.bodies {
            b.is_static = false;
        }
        self.clock.reset();
        self.apply(effects);
    }

    /// Scroll event. The first one releases the scene; later ones drive the
    /// mood. Returns the timer effects the host must schedule or cancel.
    pub fn scroll(&mut self, offset: f32) -> Vec<Effect> {
        if !self.is_released() {
            self.release(offset);
            return Vec::new();
        }
        let effects = self.mood.handle(MoodEvent::Scroll(offset), &self.built.handles);
        self.apply(effects)
    }

    /// A scheduled quiet-period timer fired.
    pub fn quiet_elapsed(&mut self, token: u64) {
        let effects = self
            .mood
            .handle(MoodEvent::QuietElapsed(token), &self.built.handles);
        if !effects.is_empty() {
            log::info!("[mood] scroll stopped; gravity reset");
        }
        self.apply(effects);
    }

    /// Grab the body under `point`, if any.
    pub fn grab(&mut self, point: Vec2) -> bool {
        match self.world.body_at(point) {
            Some(id) => self.drag.grab(&mut self.world, id, point, &self.config.drag),
            None => false,
        }
    }

    pub fn drag_to(&mut self, point: Vec2) {
        self.drag.move_to(point);
    }

    pub fn end_drag(&mut self) {
        let built = &self.built;
        let class_of = |id: BodyId| class_in(built, id);
        self.drag
            .release(&mut self.world, class_of, &self.config.drag, &self.config.materials);
    }

    /// Advance the simulation by a frame delta. Frozen scenes do not step.
    pub fn tick(&mut self, dt_seconds: f32) -> u32 {
        if !self.is_released() {
            return 0;
        }
        let steps = self.clock.advance(dt_seconds);
        for _ in 0..steps {
            self.drag.drive(&mut self.world, self.config.drag.stiffness);
            self.world.step(self.clock.step);
        }
        steps
    }

    /// Drop every body and wall. Run last when the generation is torn down;
    /// the scene draws nothing afterwards.
    pub fn dispose(&mut self) {
        if let Some(active) = self.drag.active() {
            log::info!("[drag] releasing body {:?} on teardown", active.body);
        }
        self.drag = DragTracker::new();
        self.world.clear();
        log::info!("[scene] physics world released");
    }
}

fn class_in(built: &BuiltScene, id: BodyId) -> ShapeClass {
    built
        .handles
        .iter()
        .position(|h| *h == id)
        .map_or(ShapeClass::Default, |i| built.bodies[i].class)
}

//! Scroll-driven gravity moods.
//!
//! `transition` is a pure function of the current [`MoodState`] and one
//! [`MoodEvent`]; it returns the next state plus the [`Effect`]s the caller
//! must apply. Timers are represented by tokens: the host schedules a
//! `QuietElapsed(token)` event when asked and cancels it on `CancelReset`.

use glam::Vec2;
use rand::Rng;

use crate::config::MoodParams;
use crate::physics::{BodyId, PhysicsWorld};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Mood {
    #[default]
    Neutral,
    Floating,
    FallingHard,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MoodEvent {
    Scroll(f32),
    QuietElapsed(u64),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Effect {
    SetGravity(f32),
    /// Per-tick force per unit mass; multiplied by the body's mass when applied.
    Push { body: BodyId, per_mass: Vec2 },
    SetSpin { body: BodyId, per_tick: f32 },
    SetStatic { body: BodyId, is_static: bool },
    CancelReset { token: u64 },
    ScheduleReset { token: u64, delay_ms: u32 },
}

impl Effect {
    pub fn is_timer(&self) -> bool {
        matches!(self, Effect::CancelReset { .. } | Effect::ScheduleReset { .. })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MoodState {
    pub mood: Mood,
    pub last_offset: f32,
    pub pending_reset: Option<u64>,
    /// Gravity captured at activation; restored after the quiet period.
    pub base_gravity: f32,
    next_token: u64,
}

impl MoodState {
    pub fn new(base_gravity: f32, offset: f32) -> Self {
        Self {
            mood: Mood::Neutral,
            last_offset: offset,
            pending_reset: None,
            base_gravity,
            next_token: 1,
        }
    }
}

fn float_gravity(offset: f32, params: &MoodParams) -> f32 {
    if offset.abs() > params.far_scroll_threshold {
        params.float_gravity_far
    } else {
        params.float_gravity_near
    }
}

fn push_all<R: Rng + ?Sized>(bodies: &[BodyId], params: &MoodParams, rng: &mut R, out: &mut Vec<Effect>) {
    for &body in bodies {
        let x = (rng.gen::<f32>() - 0.5) * params.float_jitter;
        out.push(Effect::Push {
            body,
            per_mass: Vec2::new(x, -params.float_push),
        });
    }
}

fn spin_all<R: Rng + ?Sized>(bodies: &[BodyId], params: &MoodParams, rng: &mut R, out: &mut Vec<Effect>) {
    for &body in bodies {
        out.push(Effect::SetSpin {
            body,
            per_tick: (rng.gen::<f32>() - 0.5) * params.spin_range,
        });
    }
}

pub fn transition<R: Rng + ?Sized>(
    state: &MoodState,
    event: MoodEvent,
    bodies: &[BodyId],
    params: &MoodParams,
    rng: &mut R,
) -> (MoodState, Vec<Effect>) {
    let mut next = state.clone();
    let mut effects = Vec::new();

    match event {
        MoodEvent::Scroll(offset) => {
            let delta = offset - state.last_offset;
            if let Some(token) = state.pending_reset {
                effects.push(Effect::CancelReset { token });
            }

            if delta > 0.0 {
                if state.mood != Mood::Floating {
                    push_all(bodies, params, rng, &mut effects);
                    next.mood = Mood::Floating;
                }
                effects.push(Effect::SetGravity(float_gravity(offset, params)));
            } else if delta < 0.0 {
                if state.mood != Mood::FallingHard || params.respin_on_reentry {
                    spin_all(bodies, params, rng, &mut effects);
                    next.mood = Mood::FallingHard;
                }
                effects.push(Effect::SetGravity(params.falling_gravity));
            }

            next.last_offset = offset;
            let token = state.next_token;
            next.next_token = token + 1;
            next.pending_reset = Some(token);
            effects.push(Effect::ScheduleReset {
                token,
                delay_ms: params.quiet_ms,
            });
        }
        MoodEvent::QuietElapsed(token) => {
            // A superseded timer that fired anyway is ignored.
            if state.pending_reset == Some(token) {
                next.pending_reset = None;
                next.mood = Mood::Neutral;
                effects.push(Effect::SetGravity(state.base_gravity));
            }
        }
    }
    (next, effects)
}

/// One-shot release: unfreeze every body and, when the page loaded scrolled
/// down and the first scroll moves back up past that point, nudge everything
/// upward once.
pub fn activation_effects(
    bodies: &[BodyId],
    load_offset: f32,
    first_offset: f32,
    params: &MoodParams,
) -> Vec<Effect> {
    let mut effects: Vec<Effect> = bodies
        .iter()
        .map(|&body| Effect::SetStatic {
            body,
            is_static: false,
        })
        .collect();
    if load_offset > 0.0 && first_offset < load_offset {
        effects.extend(bodies.iter().map(|&body| Effect::Push {
            body,
            per_mass: Vec2::new(0.0, -params.bump_push),
        }));
    }
    effects
}

/// Apply the physics effects; timer effects are left to the host.
pub fn apply_effects<W: PhysicsWorld + ?Sized>(world: &mut W, effects: &[Effect]) {
    for effect in effects {
        match *effect {
            Effect::SetGravity(g) => world.set_gravity(g),
            Effect::Push { body, per_mass } => {
                if !world.is_static(body) {
                    let m = world.mass(body);
                    world.apply_impulse(body, per_mass * m);
                }
            }
            Effect::SetSpin { body, per_tick } => {
                if !world.is_static(body) {
                    world.set_angular_velocity(body, per_tick);
                }
            }
            Effect::SetStatic { body, is_static } => world.set_static(body, is_static),
            Effect::CancelReset { .. } | Effect::ScheduleReset { .. } => {}
        }
    }
}

/// Owns the mood state for one scene generation.
pub struct MoodController<R: Rng> {
    state: Option<MoodState>,
    params: MoodParams,
    rng: R,
}

impl<R: Rng> MoodController<R> {
    pub fn new(params: MoodParams, rng: R) -> Self {
        Self {
            state: None,
            params,
            rng,
        }
    }

    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }

    pub fn state(&self) -> Option<&MoodState> {
        self.state.as_ref()
    }

    pub fn mood(&self) -> Mood {
        self.state.as_ref().map_or(Mood::Neutral, |s| s.mood)
    }

    /// Release the scene. Only the first call has any effect.
    pub fn activate(
        &mut self,
        bodies: &[BodyId],
        base_gravity: f32,
        load_offset: f32,
        first_offset: f32,
    ) -> Vec<Effect> {
        if self.state.is_some() {
            return Vec::new();
        }
        let effects = activation_effects(bodies, load_offset, first_offset, &self.params);
        if effects.len() > bodies.len() {
            log::info!("[mood] page loaded at {load_offset}, first scroll to {first_offset}: bump");
        }
        self.state = Some(MoodState::new(base_gravity, first_offset));
        log::info!("[mood] simulation released ({} bodies)", bodies.len());
        effects
    }

    /// Feed one event; returns nothing before activation.
    pub fn handle(&mut self, event: MoodEvent, bodies: &[BodyId]) -> Vec<Effect> {
        let Some(state) = self.state.as_ref() else {
            return Vec::new();
        };
        let (next, effects) = transition(state, event, bodies, &self.params, &mut self.rng);
        if next.mood != state.mood {
            log::info!("[mood] {:?} -> {:?}", state.mood, next.mood);
        }
        self.state = Some(next);
        effects
    }
}

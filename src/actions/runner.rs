//! Actions domain: the per-actor timeline state machine.
//!
//! The runner advances an elapsed clock through a variant's
//! startup/active/recovery phases, fires each scheduled motion and hitbox
//! event exactly once, manages gravity suspension, and evaluates cancel
//! eligibility. It operates on plain velocity and gravity values so the
//! whole machine is testable without a world.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;
use std::sync::Arc;

use crate::combat::events::SpawnHitbox;
use crate::content::{ActionVariantDef, GravityMode, MotionApply};
use crate::movement::GravityBody;

/// A hitbox spawn requested by a scheduled event this tick.
#[derive(Debug, Clone)]
pub struct HitboxRequest {
    pub hitbox: String,
    pub duration_override: Option<f32>,
}

#[derive(Debug, Default)]
pub struct RunnerTick {
    pub hitboxes: Vec<HitboxRequest>,
    pub finished: bool,
}

#[derive(Component, Debug, Default)]
pub struct ActionRunner {
    current: Option<Arc<ActionVariantDef>>,
    elapsed: f32,
    active_end: f32,
    total_end: f32,
    facing: Vec2,
    fired_motion: Vec<bool>,
    fired_hitboxes: Vec<bool>,
    cancel_window_open: bool,
    gravity_suspended: bool,
    saved_gravity_scale: f32,
}

impl ActionRunner {
    pub fn is_running(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&Arc<ActionVariantDef>> {
        self.current.as_ref()
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn facing(&self) -> Vec2 {
        self.facing
    }

    pub fn in_recovery_phase(&self) -> bool {
        self.is_running() && self.elapsed >= self.active_end
    }

    /// Still inside startup+active; move-key locks hold through this phase.
    pub fn before_recovery_phase(&self) -> bool {
        self.is_running() && self.elapsed < self.active_end
    }

    /// True when Idle, or when the current variant's cancel rules admit
    /// `next`: an open cancel window (declared bounds, or recovery with
    /// recovery-cancel enabled) and compatible cancel tags.
    pub fn can_enter(&self, next: &ActionVariantDef) -> bool {
        let Some(current) = &self.current else {
            return true;
        };

        let in_window = self.window_open_now()
            || (self.in_recovery_phase() && current.can_cancel_during_recovery);

        in_window && tags_compatible(&current.cancel_tags_granted, &next.cancel_tags_required)
    }

    /// Start `variant` if `can_enter` admits it. Resets the clock, snapshots
    /// facing, applies the start-of-action velocity policy and gravity
    /// suspension. Returns false when the request is dropped.
    pub fn try_start(
        &mut self,
        variant: Arc<ActionVariantDef>,
        facing: Vec2,
        velocity: &mut Vec2,
        gravity: &mut GravityBody,
    ) -> bool {
        if !self.can_enter(&variant) {
            return false;
        }

        // Cancelling into a new action must not leak the old suspension
        self.resume_gravity(gravity);

        self.elapsed = 0.0;
        self.active_end = variant.active_end();
        self.total_end = variant.total_duration();
        self.fired_motion = vec![false; variant.motion_events.len()];
        self.fired_hitboxes = vec![false; variant.hitbox_events.len()];
        self.cancel_window_open = false;
        self.facing = if facing.length_squared() > 0.01 {
            facing.normalize()
        } else {
            Vec2::X
        };

        if variant.zero_velocity_on_start {
            let vx = if variant.preserve_horizontal_momentum {
                velocity.x
            } else {
                0.0
            };
            *velocity = Vec2::new(vx, 0.0);
        }

        match variant.gravity_mode {
            GravityMode::Normal => {}
            GravityMode::SuspendZeroVertical => {
                self.suspend_gravity(gravity);
                velocity.y = 0.0;
            }
            GravityMode::SuspendKeepVertical => self.suspend_gravity(gravity),
        }

        self.current = Some(variant);
        true
    }

    /// Advance the clock and fire any events whose offsets were reached.
    pub fn advance(
        &mut self,
        dt: f32,
        velocity: &mut Vec2,
        gravity: &mut GravityBody,
    ) -> RunnerTick {
        let mut tick = RunnerTick::default();
        let Some(variant) = self.current.clone() else {
            return tick;
        };

        self.elapsed += dt;

        for (i, event) in variant.motion_events.iter().enumerate() {
            if self.elapsed >= event.time && !self.fired_motion[i] {
                let mut v = event.velocity.vec2();
                if self.facing.x < 0.0 {
                    v.x = -v.x;
                }
                match event.apply {
                    MotionApply::Set => *velocity = v,
                    MotionApply::Add => *velocity += v,
                }
                self.fired_motion[i] = true;
            }
        }

        for (i, event) in variant.hitbox_events.iter().enumerate() {
            if self.elapsed >= event.time && !self.fired_hitboxes[i] {
                tick.hitboxes.push(HitboxRequest {
                    hitbox: event.hitbox.clone(),
                    duration_override: event.duration_override,
                });
                self.fired_hitboxes[i] = true;
            }
        }

        self.cancel_window_open = self.window_open_now();

        if self.elapsed >= self.active_end {
            self.resume_gravity(gravity);
        }

        if self.elapsed >= self.total_end {
            self.clear(gravity);
            tick.finished = true;
        }

        tick
    }

    /// Immediately perform end-of-action cleanup regardless of phase. Used
    /// when an incoming hit interrupts the actor.
    pub fn force_cancel(&mut self, gravity: &mut GravityBody) {
        self.clear(gravity);
    }

    fn clear(&mut self, gravity: &mut GravityBody) {
        self.resume_gravity(gravity);
        self.current = None;
        self.elapsed = 0.0;
        self.active_end = 0.0;
        self.total_end = 0.0;
        self.fired_motion.clear();
        self.fired_hitboxes.clear();
        self.cancel_window_open = false;
    }

    fn window_open_now(&self) -> bool {
        let Some(variant) = &self.current else {
            return false;
        };
        variant.cancel_window_enabled()
            && self.elapsed >= variant.cancel_window_start
            && self.elapsed <= variant.cancel_window_end
    }

    fn suspend_gravity(&mut self, gravity: &mut GravityBody) {
        self.gravity_suspended = true;
        self.saved_gravity_scale = gravity.scale;
        gravity.scale = 0.0;
    }

    fn resume_gravity(&mut self, gravity: &mut GravityBody) {
        if !self.gravity_suspended {
            return;
        }
        gravity.scale = self.saved_gravity_scale;
        self.gravity_suspended = false;
    }
}

fn tags_compatible(granted: &[String], required: &[String]) -> bool {
    required.is_empty() || required.iter().any(|r| granted.iter().any(|g| g == r))
}

pub(crate) fn tick_action_runners(
    time: Res<Time>,
    mut query: Query<(
        Entity,
        &mut ActionRunner,
        &mut LinearVelocity,
        &mut GravityBody,
    )>,
    mut spawns: MessageWriter<SpawnHitbox>,
) {
    let dt = time.delta_secs();

    for (entity, mut runner, mut velocity, mut gravity) in &mut query {
        if !runner.is_running() {
            continue;
        }

        let facing = runner.facing();
        let tick = runner.advance(dt, &mut velocity.0, &mut gravity);

        if tick.finished {
            debug!("Action finished for {:?}", entity);
        }

        for request in tick.hitboxes {
            spawns.write(SpawnHitbox {
                owner: entity,
                hitbox: request.hitbox,
                facing,
                duration_override: request.duration_override,
            });
        }
    }
}

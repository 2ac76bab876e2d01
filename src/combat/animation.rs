//! Combat domain: explicit animation parameter bindings and callbacks.
//!
//! Bindings are a statically-typed table of (boolean source, parameter
//! name) pairs wired at construction time; no runtime type inspection.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::actions::ActionRunner;
use crate::combat::events::{
    AnimationCallback, AnimationCallbackKind, AnimationFlag, SpawnHitbox,
};
use crate::combat::hitbox::HitVolume;
use crate::movement::{GravityBody, MovementState};

const RUN_SPEED_THRESHOLD: f32 = 10.0;

/// Boolean gameplay facts the animation layer can bind to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolSource {
    Running,
    Airborne,
    WallSliding,
    Dashing,
    InAction,
}

/// The actor's binding table plus the last value sent per row, so flags
/// are only emitted on change.
#[derive(Component, Debug)]
pub struct AnimationBindings {
    table: Vec<(BoolSource, String)>,
    last: Vec<Option<bool>>,
}

impl AnimationBindings {
    pub fn new(table: Vec<(BoolSource, String)>) -> Self {
        let last = vec![None; table.len()];
        Self { table, last }
    }
}

impl Default for AnimationBindings {
    fn default() -> Self {
        Self::new(vec![
            (BoolSource::Running, "Run".to_string()),
            (BoolSource::WallSliding, "WallSlide".to_string()),
            (BoolSource::Airborne, "Airborne".to_string()),
        ])
    }
}

fn evaluate(
    source: BoolSource,
    movement: &MovementState,
    runner: &ActionRunner,
    velocity: Vec2,
) -> bool {
    match source {
        BoolSource::Running => movement.grounded && velocity.x.abs() > RUN_SPEED_THRESHOLD,
        BoolSource::Airborne => !movement.grounded,
        BoolSource::WallSliding => movement.wall_sliding,
        BoolSource::Dashing => movement.dashing,
        BoolSource::InAction => runner.is_running(),
    }
}

pub(crate) fn sync_animation_flags(
    mut query: Query<(
        Entity,
        &mut AnimationBindings,
        &MovementState,
        &ActionRunner,
        &LinearVelocity,
    )>,
    mut flags: MessageWriter<AnimationFlag>,
) {
    for (entity, mut bindings, movement, runner, velocity) in &mut query {
        for i in 0..bindings.table.len() {
            let (source, name) = &bindings.table[i];
            let value = evaluate(*source, movement, runner, velocity.0);
            if bindings.last[i] != Some(value) {
                flags.write(AnimationFlag {
                    entity,
                    name: name.clone(),
                    value,
                });
                bindings.last[i] = Some(value);
            }
        }
    }
}

/// Handle animation-authored timing callbacks. HitboxOn only fires the
/// per-variant callback hitbox, and only for variants with no scheduled
/// hitbox events — the runner's own schedule is authoritative, so the two
/// timing sources can never double-fire the same attack.
pub(crate) fn handle_animation_callbacks(
    mut callbacks: MessageReader<AnimationCallback>,
    mut actors: Query<(&mut ActionRunner, &mut GravityBody)>,
    volumes: Query<(Entity, &HitVolume)>,
    mut spawns: MessageWriter<SpawnHitbox>,
    mut commands: Commands,
) {
    for callback in callbacks.read() {
        let Ok((mut runner, mut gravity)) = actors.get_mut(callback.entity) else {
            continue;
        };

        match callback.kind {
            AnimationCallbackKind::AttackFinished => {
                if runner.is_running() {
                    runner.force_cancel(&mut gravity);
                }
            }
            AnimationCallbackKind::HitboxOn => {
                let Some(variant) = runner.current() else {
                    continue;
                };
                if !variant.hitbox_events.is_empty() {
                    continue;
                }
                if let Some(hitbox) = &variant.callback_hitbox {
                    spawns.write(SpawnHitbox {
                        owner: callback.entity,
                        hitbox: hitbox.clone(),
                        facing: runner.facing(),
                        duration_override: None,
                    });
                }
            }
            AnimationCallbackKind::HitboxOff => {
                for (entity, volume) in &volumes {
                    if volume.owner == callback.entity {
                        commands.entity(entity).despawn();
                    }
                }
            }
        }
    }
}

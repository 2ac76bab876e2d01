//! Combat domain: the high-level actor state machine and input routing.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::actions::{ActionButton, ActionRunner, classify_direction, resolve};
use crate::combat::components::{
    ActionLoadout, ActorState, CombatController, Health, RagInventory,
};
use crate::combat::events::{AnimationTrigger, DeathEvent, HitApplied};
use crate::content::{ActionContext, ContentRegistry};
use crate::movement::{GravityBody, MoveIntent, MovementInput, MovementState, MovementTuning};

/// Action-button and rag-cycle state sampled once per frame.
#[derive(Resource, Debug, Default)]
pub struct CombatInput {
    pub basic: bool,
    pub special: bool,
    pub trick: bool,
    pub rag_next: bool,
    pub rag_prev: bool,
}

pub(crate) fn read_combat_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut input: ResMut<CombatInput>,
) {
    input.basic = keyboard.just_pressed(KeyCode::KeyZ) || keyboard.just_pressed(KeyCode::KeyU);
    input.special = keyboard.just_pressed(KeyCode::KeyX) || keyboard.just_pressed(KeyCode::KeyI);
    input.trick = keyboard.just_pressed(KeyCode::KeyC) || keyboard.just_pressed(KeyCode::KeyO);
    input.rag_next = keyboard.just_pressed(KeyCode::KeyE);
    input.rag_prev = keyboard.just_pressed(KeyCode::KeyQ);
}

/// Gate raw device input into an actor intent. Dead actors accept nothing;
/// locked move keys zero the horizontal axis and swallow jump requests;
/// down+jump on the ground becomes a platform descend.
pub(crate) fn route_intent(
    controller: &mut CombatController,
    state: &MovementState,
    raw: &MovementInput,
    tuning: &MovementTuning,
) -> MoveIntent {
    let mut intent = MoveIntent::default();

    if controller.is_dead() {
        return intent;
    }

    controller.last_move = raw.axis;
    if raw.axis.x.abs() > 0.01 {
        controller.last_facing = raw.axis.x.signum();
    }

    let locked = controller.move_keys_locked;
    intent.axis = if locked {
        Vec2::new(0.0, raw.axis.y)
    } else {
        raw.axis
    };

    if raw.jump_just_pressed && !locked {
        if raw.axis.y < -0.5 && state.grounded {
            intent.descend_pressed = true;
        } else {
            intent.jump_pressed = true;
        }
    }
    intent.jump_released = raw.jump_just_released;

    if raw.dash_just_pressed && !state.dashing && (state.grounded || !tuning.ground_only_dash) {
        intent.dash_pressed = true;
    }

    intent
}

pub(crate) fn route_player_input(
    raw: Res<MovementInput>,
    tuning: Res<MovementTuning>,
    mut query: Query<(&mut CombatController, &MovementState, &mut MoveIntent)>,
) {
    for (mut controller, state, mut intent) in &mut query {
        *intent = route_intent(&mut controller, state, &raw, &tuning);
    }
}

pub(crate) fn handle_action_requests(
    input: Res<CombatInput>,
    registry: Option<Res<ContentRegistry>>,
    mut query: Query<(
        Entity,
        &mut CombatController,
        &mut RagInventory,
        &ActionLoadout,
        &mut ActionRunner,
        &mut MovementState,
        &mut LinearVelocity,
        &mut GravityBody,
    )>,
    mut triggers: MessageWriter<AnimationTrigger>,
) {
    let Some(registry) = registry else {
        return;
    };

    for (entity, mut controller, mut rags, loadout, mut runner, mut movement, mut velocity, mut gravity) in
        &mut query
    {
        if input.rag_next {
            rags.rotate_next();
        }
        if input.rag_prev {
            rags.rotate_prev();
        }

        if controller.is_dead() {
            continue;
        }

        let button = if input.basic {
            Some(ActionButton::Basic)
        } else if input.special {
            Some(ActionButton::Special)
        } else if input.trick {
            Some(ActionButton::Trick)
        } else {
            None
        };
        let Some(button) = button else {
            continue;
        };

        let direction = classify_direction(controller.last_move);
        let context = if movement.grounded {
            ActionContext::Ground
        } else {
            ActionContext::Air
        };

        let Some(variant) = resolve(&registry, loadout, &rags, button, direction, context) else {
            debug!(
                "Action request dropped: {:?} {:?} {:?} resolved to nothing",
                button, direction, context
            );
            continue;
        };

        let facing = Vec2::new(controller.last_facing, 0.0);
        if runner.try_start(variant.clone(), facing, &mut velocity.0, &mut gravity) {
            if !variant.animation_trigger.is_empty() {
                triggers.write(AnimationTrigger {
                    entity,
                    name: variant.animation_trigger.clone(),
                });
            }

            if variant.lock_facing {
                movement.lock_facing(facing.x);
                controller.facing_locked_by_action = true;
            } else if controller.facing_locked_by_action {
                movement.unlock_facing();
                controller.facing_locked_by_action = false;
            }
            controller.move_keys_locked = variant.lock_move_keys;
            movement.set_horizontal_control(!variant.lock_move_keys);
            controller.state = ActorState::Action;
        }
    }
}

/// React to hits that applied this frame. A payload requesting forced
/// cancellation, or any hit landing while no action runs, interrupts the
/// runner and enters Hitstun ahead of this tick's state evaluation.
pub(crate) fn react_to_hits(
    mut hits: MessageReader<HitApplied>,
    mut query: Query<(
        &mut CombatController,
        &mut ActionRunner,
        &mut MovementState,
        &mut GravityBody,
    )>,
    mut triggers: MessageWriter<AnimationTrigger>,
) {
    for hit in hits.read() {
        let Ok((mut controller, mut runner, mut movement, mut gravity)) = query.get_mut(hit.target)
        else {
            continue;
        };
        if controller.is_dead() {
            continue;
        }

        triggers.write(AnimationTrigger {
            entity: hit.target,
            name: "Hurt".to_string(),
        });

        if hit.context.payload.cancel_target_action || !runner.is_running() {
            runner.force_cancel(&mut gravity);
            controller.hitstun_timer = hit.context.payload.hitstun_seconds;
            controller.state = ActorState::Hitstun;
            controller.move_keys_locked = false;
            movement.set_horizontal_control(true);
            if controller.facing_locked_by_action {
                movement.unlock_facing();
                controller.facing_locked_by_action = false;
            }
        }
    }
}

pub(crate) fn handle_deaths(
    mut deaths: MessageReader<DeathEvent>,
    mut query: Query<(
        &mut CombatController,
        &mut ActionRunner,
        &mut MovementState,
        &mut GravityBody,
    )>,
    mut triggers: MessageWriter<AnimationTrigger>,
    mut commands: Commands,
) {
    for death in deaths.read() {
        if let Ok((mut controller, mut runner, mut movement, mut gravity)) =
            query.get_mut(death.entity)
        {
            runner.force_cancel(&mut gravity);
            movement.unlock_facing();
            movement.set_horizontal_control(true);
            controller.move_keys_locked = false;
            controller.facing_locked_by_action = false;
            controller.state = ActorState::Dead;
            triggers.write(AnimationTrigger {
                entity: death.entity,
                name: "Die".to_string(),
            });
            info!("Actor {:?} died", death.entity);
        } else {
            // Damageables without a controller (training dummies) just go
            commands.entity(death.entity).despawn();
        }
    }
}

/// Derive the high-level state each tick in strict priority order:
/// Dead > Hitstun > Action > Dash > WallSlide > IdleGround/IdleAir.
pub(crate) fn evaluate_actor_state(
    time: Res<Time>,
    mut query: Query<(&mut CombatController, &Health, &ActionRunner, &MovementState)>,
) {
    let dt = time.delta_secs();

    for (mut controller, health, runner, movement) in &mut query {
        if health.is_dead() || controller.state == ActorState::Dead {
            controller.state = ActorState::Dead;
            continue;
        }

        if controller.state == ActorState::Hitstun {
            controller.hitstun_timer -= dt;
            if controller.hitstun_timer <= 0.0 {
                controller.state = if movement.grounded {
                    ActorState::IdleGround
                } else {
                    ActorState::IdleAir
                };
            }
            continue;
        }

        controller.state = derive_state(runner, movement);
    }
}

/// Priority evaluation below Dead and Hitstun:
/// Action > Dash > WallSlide > IdleGround/IdleAir.
pub(crate) fn derive_state(runner: &ActionRunner, movement: &MovementState) -> ActorState {
    if runner.is_running() {
        ActorState::Action
    } else if movement.dashing {
        ActorState::Dash
    } else if movement.wall_sliding {
        ActorState::WallSlide
    } else if movement.grounded {
        ActorState::IdleGround
    } else {
        ActorState::IdleAir
    }
}

/// Late pass: once the runner leaves its pre-recovery phase the move-key
/// lock drops, and a finished runner releases the facing lock.
pub(crate) fn release_locks(
    mut query: Query<(&mut CombatController, &ActionRunner, &mut MovementState)>,
) {
    for (mut controller, runner, mut movement) in &mut query {
        if !runner.is_running() && controller.facing_locked_by_action {
            movement.unlock_facing();
            controller.facing_locked_by_action = false;
        }

        if !runner.before_recovery_phase() && controller.move_keys_locked {
            controller.move_keys_locked = false;
            movement.set_horizontal_control(true);
        }
    }
}

//! Movement domain: locomotion systems for timers and physics.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{
    Facing, GravityBody, MoveIntent, MovementState, MovementTuning, WallContact,
};

pub(crate) fn update_timers(
    time: Res<Time>,
    tuning: Res<MovementTuning>,
    mut query: Query<&mut MovementState>,
) {
    let dt = time.delta_secs();

    for mut state in &mut query {
        state.coyote_counter -= dt;
        state.jump_buffer_counter -= dt;
        state.wall_coyote_counter -= dt;
        state.wall_jump_buffer_counter -= dt;

        // Acceleration rebuilds over the wall-jump input-lock window
        if state.wall_jump_lock_timer > 0.0 {
            state.wall_jump_lock_timer -= dt;
            if tuning.wall_jump_lock_time > 0.0 {
                let t = 1.0 - state.wall_jump_lock_timer / tuning.wall_jump_lock_time;
                state.accel_scale = tuning.accel_rebuild.evaluate(t);
            }
            if state.wall_jump_lock_timer <= 0.0 {
                state.accel_scale = 1.0;
            }
        }

        if state.dashing {
            state.dash_timer -= dt;
            if state.dash_timer <= 0.0 {
                state.dashing = false;
            }
        }
    }
}

/// Which jump a buffered request resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum JumpKind {
    Ground,
    Wall,
}

/// Resolve a buffered jump request against the decaying assist windows.
/// Wall-jump coyote wins over ground coyote.
pub(crate) fn try_buffered_jump(
    state: &mut MovementState,
    velocity: &mut Vec2,
    tuning: &MovementTuning,
) -> Option<JumpKind> {
    if state.wall_jump_buffer_counter > 0.0 && state.wall_coyote_counter > 0.0 && !state.grounded {
        let away = state.last_wall.away_sign();
        *velocity = Vec2::new(away * tuning.wall_jump_horizontal, tuning.wall_jump_vertical);
        state.jump_buffer_counter = 0.0;
        state.wall_jump_buffer_counter = 0.0;
        state.wall_coyote_counter = 0.0;
        state.jumped_from_wall = true;
        state.accel_scale = 0.0;
        state.wall_jump_lock_timer = tuning.wall_jump_lock_time;
        state.wall_jump_lock_dir = away;
        return Some(JumpKind::Wall);
    }

    if state.jump_buffer_counter > 0.0 && state.coyote_counter > 0.0 {
        velocity.y = tuning.jump_impulse;
        state.jump_buffer_counter = 0.0;
        state.wall_jump_buffer_counter = 0.0;
        state.coyote_counter = 0.0;
        state.jumped_from_wall = false;
        return Some(JumpKind::Ground);
    }

    None
}

/// Cut velocity when the jump control is released while still rising.
/// Wall jumps cut both axes; ground jumps only the vertical.
pub(crate) fn apply_jump_cut(state: &MovementState, velocity: &mut Vec2, tuning: &MovementTuning) {
    if velocity.y <= 0.0 {
        return;
    }
    if state.jumped_from_wall {
        velocity.x /= tuning.wall_jump_cut_factor;
        velocity.y /= tuning.wall_jump_cut_factor;
    } else {
        velocity.y /= tuning.jump_cut_factor;
    }
}

pub(crate) fn resolve_jumps(
    tuning: Res<MovementTuning>,
    mut query: Query<(&mut MovementState, &MoveIntent, &mut LinearVelocity)>,
) {
    for (mut state, intent, mut velocity) in &mut query {
        if state.dashing {
            continue;
        }

        if intent.descend_pressed && state.grounded {
            velocity.y = tuning.descend_velocity;
        } else if intent.jump_pressed {
            state.jump_buffer_counter = tuning.jump_buffer_time;
            state.wall_jump_buffer_counter = tuning.wall_jump_buffer_time;
        }

        if let Some(kind) = try_buffered_jump(&mut state, &mut velocity.0, &tuning) {
            debug!("Jump resolved: {:?}", kind);
        }

        if intent.jump_released {
            apply_jump_cut(&state, &mut velocity.0, &tuning);
        }
    }
}

/// Steer horizontal velocity toward the input target. The approach rate is
/// the acceleration while steering, otherwise the grounded or airborne
/// deceleration.
pub(crate) fn steer_horizontal(
    state: &MovementState,
    axis_x: f32,
    velocity: &mut Vec2,
    dt: f32,
    tuning: &MovementTuning,
) {
    let target = axis_x * tuning.max_speed;
    let rate = if target.abs() > 0.01 {
        tuning.accel_rate * state.accel_scale
    } else if state.grounded {
        tuning.decel_rate
    } else {
        tuning.air_decel_rate
    };

    let alpha = (rate * dt).min(1.0);
    velocity.x += (target - velocity.x) * alpha;
}

pub(crate) fn apply_locomotion(
    time: Res<Time>,
    tuning: Res<MovementTuning>,
    mut query: Query<(&mut MovementState, &MoveIntent, &mut LinearVelocity)>,
) {
    let dt = time.delta_secs();

    for (mut state, intent, mut velocity) in &mut query {
        if state.dashing || !state.horizontal_control {
            continue;
        }

        // An opposing press releases the wall-jump input lock early
        if state.wall_jump_lock_timer > 0.0
            && intent.axis.x * state.wall_jump_lock_dir < -0.1
        {
            state.unlock_wall_jump_input();
        }

        if !state.facing_locked {
            if intent.axis.x > 0.1 {
                state.facing = Facing::Right;
            } else if intent.axis.x < -0.1 {
                state.facing = Facing::Left;
            }
        }

        steer_horizontal(&state, intent.axis.x, &mut velocity.0, dt, &tuning);
    }
}

pub(crate) fn apply_wall_slide(
    time: Res<Time>,
    tuning: Res<MovementTuning>,
    mut query: Query<(&mut MovementState, &MoveIntent, &mut LinearVelocity)>,
) {
    let dt = time.delta_secs();

    for (mut state, intent, mut velocity) in &mut query {
        let pushing = match state.wall {
            WallContact::Left => intent.axis.x < -0.1,
            WallContact::Right => intent.axis.x > 0.1,
            WallContact::None => false,
        };

        state.wall_sliding =
            !state.grounded && !state.dashing && state.wall != WallContact::None && pushing;

        if state.wall_sliding && velocity.y < 0.0 {
            velocity.y += tuning.wall_slide_upward_force * dt;
        }
    }
}

pub(crate) fn apply_dash(
    tuning: Res<MovementTuning>,
    mut query: Query<(&mut MovementState, &MoveIntent, &mut LinearVelocity)>,
) {
    for (mut state, intent, mut velocity) in &mut query {
        if intent.dash_pressed && !state.dashing {
            state.dashing = true;
            state.dash_timer = tuning.dash_time;
            state.wall_sliding = false;
        }

        if state.dashing {
            velocity.x = state.facing.sign() * tuning.dash_speed;
            velocity.y = 0.0;
        }
    }
}

/// Effective gravity scale for this tick. Wall slide zeroes it on the fall
/// branch; falling multiplies it; the two rules do not stack.
pub(crate) fn effective_gravity_scale(
    state: Option<&MovementState>,
    base: f32,
    velocity_y: f32,
    tuning: &MovementTuning,
) -> f32 {
    let Some(state) = state else {
        return base;
    };
    if state.wall_sliding && velocity_y < 0.0 {
        0.0
    } else if velocity_y < 0.0 {
        base * tuning.fall_gravity_mult
    } else {
        base
    }
}

pub(crate) fn apply_gravity(
    time: Res<Time>,
    tuning: Res<MovementTuning>,
    mut query: Query<(&GravityBody, Option<&MovementState>, &mut LinearVelocity)>,
) {
    let dt = time.delta_secs();

    for (body, state, mut velocity) in &mut query {
        if state.is_some_and(|s| s.dashing) {
            continue;
        }
        let scale = effective_gravity_scale(state, body.scale, velocity.y, &tuning);
        velocity.y -= tuning.gravity * scale * dt;
    }
}

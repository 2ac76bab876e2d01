//! Movement domain: tests for assist timers, jump resolution, and gravity.

use bevy::prelude::*;

use super::components::{Facing, MovementState, WallContact};
use super::resources::{AccelRebuild, MovementTuning};
use super::systems::movement::{
    JumpKind, apply_jump_cut, effective_gravity_scale, steer_horizontal, try_buffered_jump,
};

fn tuning() -> MovementTuning {
    MovementTuning::default()
}

fn airborne_by_wall(side: WallContact) -> MovementState {
    MovementState {
        grounded: false,
        last_wall: side,
        wall_coyote_counter: 0.05,
        jump_buffer_counter: 0.05,
        wall_jump_buffer_counter: 0.05,
        ..default()
    }
}

// -----------------------------------------------------------------------------
// Buffered jump resolution
// -----------------------------------------------------------------------------

#[test]
fn test_wall_coyote_wins_over_ground_coyote() {
    let tuning = tuning();
    let mut state = airborne_by_wall(WallContact::Right);
    state.coyote_counter = 0.05; // both windows open
    let mut velocity = Vec2::ZERO;

    let kind = try_buffered_jump(&mut state, &mut velocity, &tuning);

    assert_eq!(kind, Some(JumpKind::Wall));
    assert_eq!(
        velocity,
        Vec2::new(-tuning.wall_jump_horizontal, tuning.wall_jump_vertical)
    );
    assert!(state.jumped_from_wall);
    assert_eq!(state.accel_scale, 0.0);
    assert_eq!(state.wall_jump_lock_timer, tuning.wall_jump_lock_time);
}

#[test]
fn test_ground_jump_when_no_wall_window() {
    let tuning = tuning();
    let mut state = MovementState {
        grounded: true,
        coyote_counter: 0.05,
        jump_buffer_counter: 0.05,
        wall_jump_buffer_counter: 0.05,
        ..default()
    };
    let mut velocity = Vec2::new(120.0, -50.0);

    let kind = try_buffered_jump(&mut state, &mut velocity, &tuning);

    assert_eq!(kind, Some(JumpKind::Ground));
    assert_eq!(velocity, Vec2::new(120.0, tuning.jump_impulse));
    assert!(!state.jumped_from_wall);
}

#[test]
fn test_buffers_are_consumed_by_a_jump() {
    let tuning = tuning();
    let mut state = MovementState {
        grounded: true,
        coyote_counter: 0.05,
        jump_buffer_counter: 0.05,
        ..default()
    };
    let mut velocity = Vec2::ZERO;

    assert!(try_buffered_jump(&mut state, &mut velocity, &tuning).is_some());
    assert!(try_buffered_jump(&mut state, &mut velocity, &tuning).is_none());
}

#[test]
fn test_expired_buffer_does_not_jump() {
    let tuning = tuning();
    let mut state = MovementState {
        grounded: true,
        coyote_counter: 0.05,
        jump_buffer_counter: -0.01,
        ..default()
    };
    let mut velocity = Vec2::ZERO;

    assert!(try_buffered_jump(&mut state, &mut velocity, &tuning).is_none());
}

#[test]
fn test_wall_jump_pushes_away_from_left_wall() {
    let tuning = tuning();
    let mut state = airborne_by_wall(WallContact::Left);
    let mut velocity = Vec2::ZERO;

    try_buffered_jump(&mut state, &mut velocity, &tuning);
    assert!(velocity.x > 0.0);
}

// -----------------------------------------------------------------------------
// Jump cut
// -----------------------------------------------------------------------------

#[test]
fn test_ground_jump_cut_halves_only_vertical() {
    let tuning = tuning();
    let state = MovementState::default();
    let mut velocity = Vec2::new(200.0, 400.0);

    apply_jump_cut(&state, &mut velocity, &tuning);
    assert_eq!(velocity, Vec2::new(200.0, 200.0));
}

#[test]
fn test_wall_jump_cut_halves_both_axes() {
    let tuning = tuning();
    let state = MovementState {
        jumped_from_wall: true,
        ..default()
    };
    let mut velocity = Vec2::new(400.0, 600.0);

    apply_jump_cut(&state, &mut velocity, &tuning);
    assert_eq!(velocity, Vec2::new(200.0, 300.0));
}

#[test]
fn test_no_cut_while_falling() {
    let tuning = tuning();
    let state = MovementState::default();
    let mut velocity = Vec2::new(100.0, -50.0);

    apply_jump_cut(&state, &mut velocity, &tuning);
    assert_eq!(velocity, Vec2::new(100.0, -50.0));
}

// -----------------------------------------------------------------------------
// Locomotion steering
// -----------------------------------------------------------------------------

#[test]
fn test_steering_approaches_target_speed() {
    let tuning = tuning();
    let state = MovementState {
        grounded: true,
        ..default()
    };
    let mut velocity = Vec2::ZERO;

    for _ in 0..200 {
        steer_horizontal(&state, 1.0, &mut velocity, 1.0 / 60.0, &tuning);
    }
    assert!((velocity.x - tuning.max_speed).abs() < 1.0);
}

#[test]
fn test_grounded_deceleration_beats_air_deceleration() {
    let tuning = tuning();
    let dt = 1.0 / 60.0;

    let grounded = MovementState {
        grounded: true,
        ..default()
    };
    let airborne = MovementState::default();

    let mut ground_vel = Vec2::new(300.0, 0.0);
    let mut air_vel = Vec2::new(300.0, 0.0);
    steer_horizontal(&grounded, 0.0, &mut ground_vel, dt, &tuning);
    steer_horizontal(&airborne, 0.0, &mut air_vel, dt, &tuning);

    assert!(ground_vel.x < air_vel.x);
}

#[test]
fn test_accel_scale_slows_steering_after_wall_jump() {
    let tuning = tuning();
    let dt = 1.0 / 60.0;

    let full = MovementState {
        grounded: false,
        accel_scale: 1.0,
        ..default()
    };
    let rebuilding = MovementState {
        grounded: false,
        accel_scale: 0.25,
        ..default()
    };

    let mut full_vel = Vec2::ZERO;
    let mut rebuilding_vel = Vec2::ZERO;
    steer_horizontal(&full, 1.0, &mut full_vel, dt, &tuning);
    steer_horizontal(&rebuilding, 1.0, &mut rebuilding_vel, dt, &tuning);

    assert!(rebuilding_vel.x < full_vel.x);
}

// -----------------------------------------------------------------------------
// Gravity rules
// -----------------------------------------------------------------------------

#[test]
fn test_wall_slide_zeroes_gravity_on_fall_branch_only() {
    let tuning = tuning();
    let state = MovementState {
        wall_sliding: true,
        ..default()
    };

    assert_eq!(effective_gravity_scale(Some(&state), 3.0, -10.0, &tuning), 0.0);
    // Rising against a wall keeps normal gravity; the rules do not stack
    assert_eq!(effective_gravity_scale(Some(&state), 3.0, 10.0, &tuning), 3.0);
}

#[test]
fn test_fall_multiplier_applies_when_falling() {
    let tuning = tuning();
    let state = MovementState::default();

    assert_eq!(
        effective_gravity_scale(Some(&state), 3.0, -10.0, &tuning),
        3.0 * tuning.fall_gravity_mult
    );
    assert_eq!(effective_gravity_scale(Some(&state), 3.0, 10.0, &tuning), 3.0);
}

#[test]
fn test_stateless_bodies_use_base_scale() {
    let tuning = tuning();
    assert_eq!(effective_gravity_scale(None, 2.0, -50.0, &tuning), 2.0);
}

// -----------------------------------------------------------------------------
// Facing and lock helpers
// -----------------------------------------------------------------------------

#[test]
fn test_lock_facing_pins_requested_sign() {
    let mut state = MovementState::default();
    state.lock_facing(-1.0);
    assert_eq!(state.facing, Facing::Left);
    assert!(state.facing_locked);

    // Zero sign keeps the current facing
    let mut state = MovementState::default();
    state.facing = Facing::Left;
    state.lock_facing(0.0);
    assert_eq!(state.facing, Facing::Left);
}

#[test]
fn test_unlock_wall_jump_input_restores_acceleration() {
    let mut state = MovementState {
        wall_jump_lock_timer: 0.15,
        accel_scale: 0.3,
        ..default()
    };
    state.unlock_wall_jump_input();
    assert_eq!(state.wall_jump_lock_timer, 0.0);
    assert_eq!(state.accel_scale, 1.0);
}

// -----------------------------------------------------------------------------
// Acceleration rebuild curve
// -----------------------------------------------------------------------------

#[test]
fn test_accel_rebuild_curves() {
    assert_eq!(AccelRebuild::Linear.evaluate(0.0), 0.0);
    assert_eq!(AccelRebuild::Linear.evaluate(0.5), 0.5);
    assert_eq!(AccelRebuild::Linear.evaluate(1.0), 1.0);

    assert_eq!(AccelRebuild::Smooth.evaluate(0.0), 0.0);
    assert_eq!(AccelRebuild::Smooth.evaluate(1.0), 1.0);
    assert_eq!(AccelRebuild::Smooth.evaluate(0.5), 0.5);
    // Smooth eases in below the linear ramp early on
    assert!(AccelRebuild::Smooth.evaluate(0.2) < 0.2);

    // Out-of-range input clamps
    assert_eq!(AccelRebuild::Linear.evaluate(1.5), 1.0);
    assert_eq!(AccelRebuild::Smooth.evaluate(-0.5), 0.0);
}

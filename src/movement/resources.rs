//! Movement domain: tuning and raw input resources.

use bevy::prelude::*;

/// Shape of the acceleration rebuild after a wall jump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccelRebuild {
    #[default]
    Linear,
    Smooth,
}

impl AccelRebuild {
    /// Evaluate the rebuild fraction at normalized time `t` in `[0, 1]`.
    pub fn evaluate(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            AccelRebuild::Linear => t,
            AccelRebuild::Smooth => t * t * (3.0 - 2.0 * t),
        }
    }
}

#[derive(Resource, Debug, Clone)]
pub struct MovementTuning {
    pub max_speed: f32,
    /// Approach rates (per second) for the velocity-error controller.
    pub accel_rate: f32,
    pub decel_rate: f32,
    pub air_decel_rate: f32,

    pub jump_impulse: f32,
    /// Divisor applied to vertical velocity when jump is released early.
    pub jump_cut_factor: f32,
    /// Divisor applied to both axes when cutting a wall jump.
    pub wall_jump_cut_factor: f32,

    /// Downward acceleration at gravity scale 1.
    pub gravity: f32,
    pub default_gravity_scale: f32,
    pub fall_gravity_mult: f32,

    pub coyote_time: f32,
    pub jump_buffer_time: f32,

    pub ground_check_distance: f32,
    pub wall_check_offset: Vec2,
    pub wall_check_distance: f32,
    /// Upward acceleration counteracting fall speed during a wall slide.
    pub wall_slide_upward_force: f32,
    pub wall_jump_horizontal: f32,
    pub wall_jump_vertical: f32,
    pub wall_jump_coyote_time: f32,
    pub wall_jump_buffer_time: f32,
    pub wall_jump_lock_time: f32,
    pub accel_rebuild: AccelRebuild,

    pub dash_speed: f32,
    pub dash_time: f32,
    /// Declared but not consulted by any hit-resolution path; whether a
    /// dash grants i-frames is an open tuning question.
    pub dash_invincibility_time: f32,
    pub ground_only_dash: bool,

    /// Downward velocity applied when dropping through a platform.
    pub descend_velocity: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            max_speed: 320.0,
            accel_rate: 14.0,
            decel_rate: 10.0,
            air_decel_rate: 2.0,
            jump_impulse: 680.0,
            jump_cut_factor: 2.0,
            wall_jump_cut_factor: 2.0,
            gravity: 600.0,
            default_gravity_scale: 3.0,
            fall_gravity_mult: 1.5,
            coyote_time: 0.1,
            jump_buffer_time: 0.1,
            ground_check_distance: 4.0,
            wall_check_offset: Vec2::new(0.0, 0.0),
            wall_check_distance: 6.0,
            wall_slide_upward_force: 1200.0,
            wall_jump_horizontal: 400.0,
            wall_jump_vertical: 600.0,
            wall_jump_coyote_time: 0.1,
            wall_jump_buffer_time: 0.1,
            wall_jump_lock_time: 0.2,
            accel_rebuild: AccelRebuild::Linear,
            dash_speed: 900.0,
            dash_time: 0.16,
            dash_invincibility_time: 0.15,
            ground_only_dash: true,
            descend_velocity: -150.0,
        }
    }
}

/// Raw device state sampled once per frame. Gameplay never reads this
/// directly; the combat controller routes it into per-actor `MoveIntent`.
#[derive(Resource, Debug, Default)]
pub struct MovementInput {
    pub axis: Vec2,
    pub jump_just_pressed: bool,
    pub jump_just_released: bool,
    pub dash_just_pressed: bool,
}

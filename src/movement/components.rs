//! Movement domain: components and physics layers for locomotion.

use avian2d::prelude::*;
use bevy::prelude::*;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Ground surfaces (floors, platforms)
    Ground,
    /// Wall surfaces
    Wall,
    /// Player character
    Player,
    /// Enemy characters
    Enemy,
    /// Player hitboxes (damage enemies)
    PlayerHitbox,
    /// Enemy hitboxes (damage player)
    EnemyHitbox,
}

#[derive(Component, Debug)]
pub struct Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    pub fn from_sign(sign: f32) -> Self {
        if sign < 0.0 { Facing::Left } else { Facing::Right }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WallContact {
    #[default]
    None,
    Left,
    Right,
}

impl WallContact {
    /// Horizontal direction pointing away from the wall.
    pub fn away_sign(self) -> f32 {
        match self {
            WallContact::None => 0.0,
            WallContact::Left => 1.0,
            WallContact::Right => -1.0,
        }
    }
}

/// Locomotion state for one actor. The action runner and combat controller
/// only touch this through its mutators, never the assist timers directly.
#[derive(Component, Debug)]
pub struct MovementState {
    pub grounded: bool,
    pub wall: WallContact,
    /// Side of the most recent wall contact, kept for wall-coyote jumps
    /// after the contact itself is gone.
    pub last_wall: WallContact,
    pub wall_sliding: bool,
    pub dashing: bool,
    pub facing: Facing,
    pub facing_locked: bool,
    pub horizontal_control: bool,
    /// Set by a wall jump, cleared on landing; selects the jump-cut factor.
    pub jumped_from_wall: bool,

    pub dash_timer: f32,
    pub coyote_counter: f32,
    pub jump_buffer_counter: f32,
    pub wall_coyote_counter: f32,
    pub wall_jump_buffer_counter: f32,
    pub wall_jump_lock_timer: f32,
    /// Direction the last wall jump pushed toward; an opposing press
    /// releases the input lock early.
    pub wall_jump_lock_dir: f32,
    /// Acceleration multiplier rebuilt over the wall-jump lock window.
    pub accel_scale: f32,
}

impl Default for MovementState {
    fn default() -> Self {
        Self {
            grounded: false,
            wall: WallContact::None,
            last_wall: WallContact::None,
            wall_sliding: false,
            dashing: false,
            facing: Facing::Right,
            facing_locked: false,
            horizontal_control: true,
            jumped_from_wall: false,
            dash_timer: 0.0,
            coyote_counter: 0.0,
            jump_buffer_counter: 0.0,
            wall_coyote_counter: 0.0,
            wall_jump_buffer_counter: 0.0,
            wall_jump_lock_timer: 0.0,
            wall_jump_lock_dir: 0.0,
            accel_scale: 1.0,
        }
    }
}

impl MovementState {
    /// Pin facing to `sign` (current facing if zero) until unlocked.
    pub fn lock_facing(&mut self, sign: f32) {
        if sign != 0.0 {
            self.facing = Facing::from_sign(sign);
        }
        self.facing_locked = true;
    }

    pub fn unlock_facing(&mut self) {
        self.facing_locked = false;
    }

    pub fn set_horizontal_control(&mut self, enabled: bool) {
        self.horizontal_control = enabled;
    }

    /// Release the post-wall-jump input lock and restore full acceleration.
    pub fn unlock_wall_jump_input(&mut self) {
        if self.wall_jump_lock_timer > 0.0 {
            self.wall_jump_lock_timer = 0.0;
            self.accel_scale = 1.0;
        }
    }
}

/// Crate-owned gravity scale. Engine gravity is disabled per body
/// (`GravityScale(0.0)`) so suspension, hitstun reduction and the fall
/// multiplier compose here and round-trip exactly.
#[derive(Component, Debug, Clone, Copy)]
pub struct GravityBody {
    pub scale: f32,
}

impl GravityBody {
    pub fn new(scale: f32) -> Self {
        Self { scale }
    }
}

/// Per-actor movement intent, written by the combat controller after
/// gating (dead actors and locked move keys produce a zeroed intent) and
/// consumed by the locomotion systems.
#[derive(Component, Debug, Default)]
pub struct MoveIntent {
    pub axis: Vec2,
    pub jump_pressed: bool,
    pub jump_released: bool,
    pub dash_pressed: bool,
    pub descend_pressed: bool,
}

//! Combat domain: per-actor combat state and damageable components.

use bevy::prelude::*;

use crate::content::{HitPayloadDef, RagDef};
use crate::movement::GravityBody;

/// Team affiliation to prevent friendly fire
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Team {
    Player,
    Enemy,
}

/// Health resource with its own invulnerability window. Negative amounts
/// are rejected outright; values clamp to `[0, max]`.
#[derive(Component, Debug, Clone)]
pub struct Health {
    current: f32,
    max: f32,
    iframes_duration: f32,
    iframe_timer: f32,
}

impl Health {
    pub fn new(max: f32, iframes_duration: f32) -> Self {
        Self {
            current: max,
            max,
            iframes_duration,
            iframe_timer: 0.0,
        }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn percent(&self) -> f32 {
        self.current / self.max
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }

    pub fn iframes_active(&self) -> bool {
        self.iframe_timer > 0.0
    }

    /// Apply damage, honoring the death latch and i-frames. Returns whether
    /// any damage was applied.
    pub fn take_damage(&mut self, amount: f32, ignore_iframes: bool) -> bool {
        if amount <= 0.0 || self.is_dead() {
            return false;
        }
        if self.iframes_active() && !ignore_iframes {
            return false;
        }

        self.current = (self.current - amount).max(0.0);
        self.iframe_timer = self.iframes_duration;
        true
    }

    pub fn heal(&mut self, amount: f32) {
        if amount <= 0.0 || self.is_dead() {
            return;
        }
        self.current = (self.current + amount).min(self.max);
    }

    pub fn tick(&mut self, dt: f32) {
        if self.iframe_timer > 0.0 {
            self.iframe_timer -= dt;
        }
    }
}

/// Secondary damage-absorption pool. While positive after a hit it
/// suppresses knockback and hitstun; damage still goes to health.
#[derive(Component, Debug, Clone)]
pub struct Armor {
    pub current: f32,
    pub max: f32,
    pub infinite: bool,
    pub regen_delay: f32,
    pub regen_per_second: f32,
    time_since_hit: f32,
}

impl Armor {
    pub fn new(max: f32, regen_delay: f32, regen_per_second: f32) -> Self {
        Self {
            current: max,
            max,
            infinite: false,
            regen_delay,
            regen_per_second,
            time_since_hit: 0.0,
        }
    }

    pub fn infinite(max: f32) -> Self {
        Self {
            infinite: true,
            ..Self::new(max, 0.0, 0.0)
        }
    }

    /// Absorb an incoming break amount. Returns true when the hit is
    /// armor-blocked (armor remains positive after subtraction).
    pub fn absorb(&mut self, amount: f32) -> bool {
        self.time_since_hit = 0.0;
        if self.infinite {
            return self.current > 0.0;
        }
        if self.current <= 0.0 {
            return false;
        }
        self.current -= amount;
        self.current > 0.0
    }

    /// Regenerate after the delay, only while grounded.
    pub fn tick(&mut self, dt: f32, grounded: bool) {
        self.time_since_hit += dt;
        if self.infinite {
            return;
        }
        if grounded && self.time_since_hit >= self.regen_delay && self.current < self.max {
            self.current = (self.current + self.regen_per_second * dt).min(self.max);
        }
    }
}

/// Damageable surface: knockback weights and hitstun gravity reduction.
#[derive(Component, Debug, Clone)]
pub struct Hurtbox {
    pub weight_horizontal: f32,
    pub weight_vertical: f32,
    pub reduce_gravity_in_hitstun: bool,
    pub hitstun_gravity_factor: f32,
    hitstun_timer: f32,
    gravity_reduced: bool,
    saved_gravity_scale: f32,
}

impl Hurtbox {
    pub fn new(weight_horizontal: f32, weight_vertical: f32) -> Self {
        Self {
            weight_horizontal,
            weight_vertical,
            reduce_gravity_in_hitstun: true,
            hitstun_gravity_factor: 0.33,
            hitstun_timer: 0.0,
            gravity_reduced: false,
            saved_gravity_scale: 0.0,
        }
    }

    pub fn in_hitstun_gravity(&self) -> bool {
        self.gravity_reduced
    }

    /// Extend the hitstun timer (monotonic) and, the first time only,
    /// snapshot the gravity scale and reduce it. Applies only to hits that
    /// reset vertical velocity.
    pub fn enter_hitstun(&mut self, payload: &HitPayloadDef, gravity: &mut GravityBody) {
        if !self.reduce_gravity_in_hitstun
            || payload.hitstun_seconds <= 0.0
            || !payload.reset_vertical_velocity
        {
            return;
        }

        self.hitstun_timer = self.hitstun_timer.max(payload.hitstun_seconds);

        if !self.gravity_reduced {
            self.saved_gravity_scale = gravity.scale;
            gravity.scale = self.saved_gravity_scale * self.hitstun_gravity_factor;
            self.gravity_reduced = true;
        }
    }

    /// Count the hitstun timer down; restore exactly the snapshotted
    /// gravity scale when it elapses.
    pub fn tick(&mut self, dt: f32, gravity: &mut GravityBody) {
        if self.hitstun_timer <= 0.0 {
            return;
        }
        self.hitstun_timer -= dt;
        if self.hitstun_timer <= 0.0 {
            self.hitstun_timer = 0.0;
            if self.gravity_reduced {
                gravity.scale = self.saved_gravity_scale;
                self.gravity_reduced = false;
            }
        }
    }
}

/// High-level actor state, derived each tick in strict priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActorState {
    #[default]
    IdleGround,
    IdleAir,
    Dash,
    WallSlide,
    Action,
    Hitstun,
    Dead,
}

/// The combat controller's actor record: high-level state, the hitstun
/// countdown, and lock bookkeeping for the running action.
#[derive(Component, Debug)]
pub struct CombatController {
    pub state: ActorState,
    pub hitstun_timer: f32,
    pub facing_locked_by_action: bool,
    pub move_keys_locked: bool,
    /// Last non-zero horizontal input sign; actions face this way.
    pub last_facing: f32,
    pub last_move: Vec2,
}

impl Default for CombatController {
    fn default() -> Self {
        Self {
            state: ActorState::IdleGround,
            hitstun_timer: 0.0,
            facing_locked_by_action: false,
            move_keys_locked: false,
            last_facing: 1.0,
            last_move: Vec2::ZERO,
        }
    }
}

impl CombatController {
    pub fn is_dead(&self) -> bool {
        self.state == ActorState::Dead
    }
}

/// Which action set the Basic button resolves against for this actor.
#[derive(Component, Debug, Clone)]
pub struct ActionLoadout {
    pub basic_set: String,
}

/// One equipped costume: the action sets it contributes.
#[derive(Debug, Clone)]
pub struct RagLoadout {
    pub id: String,
    pub name: String,
    pub special_set: Option<String>,
    pub trick_set: Option<String>,
}

/// The actor's rag collection and selection cursor. Owned by the actor
/// record and handed to the resolver read-only.
#[derive(Component, Debug, Default)]
pub struct RagInventory {
    rags: Vec<RagLoadout>,
    index: usize,
}

impl RagInventory {
    pub fn from_defs(defs: &[RagDef]) -> Self {
        Self {
            rags: defs
                .iter()
                .map(|d| RagLoadout {
                    id: d.id.clone(),
                    name: d.name.clone(),
                    special_set: d.special_set.clone(),
                    trick_set: d.trick_set.clone(),
                })
                .collect(),
            index: 0,
        }
    }

    pub fn current(&self) -> Option<&RagLoadout> {
        self.rags.get(self.index)
    }

    pub fn len(&self) -> usize {
        self.rags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rags.is_empty()
    }

    pub fn add(&mut self, rag: RagLoadout) {
        if self.rags.iter().any(|r| r.id == rag.id) {
            return;
        }
        self.rags.push(rag);
    }

    pub fn rotate_next(&mut self) {
        if self.rags.len() > 1 {
            self.index = (self.index + 1) % self.rags.len();
        }
    }

    pub fn rotate_prev(&mut self) {
        if self.rags.len() > 1 {
            self.index = (self.index + self.rags.len() - 1) % self.rags.len();
        }
    }
}

//! Data definitions for all RON content files.
//!
//! These structs mirror the structure in assets/data/*.ron and are used
//! for deserialization. The ContentRegistry provides lookup by id.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

// ============================================================================
// Common wrapper for RON files with schema_version and items
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataFile<T> {
    pub schema_version: u32,
    pub items: Vec<T>,
}

/// Plain 2D vector for RON fields (glam's serde support is not enabled).
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct XY {
    pub x: f32,
    pub y: f32,
}

impl XY {
    pub fn vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

// ============================================================================
// Action sets (actions.ron)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
pub enum ActionContext {
    #[default]
    Ground,
    Air,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
pub enum ActionDirection {
    #[default]
    Neutral,
    Horizontal,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
pub enum GravityMode {
    #[default]
    Normal,
    /// Suspend gravity and zero vertical velocity when the action starts.
    SuspendZeroVertical,
    /// Suspend gravity, keeping whatever vertical velocity the actor had.
    SuspendKeepVertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
pub enum MotionApply {
    #[default]
    Set,
    Add,
}

/// A velocity change scheduled at an offset within an action timeline.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MotionEventDef {
    pub time: f32,
    pub velocity: XY,
    #[serde(default)]
    pub apply: MotionApply,
}

/// A hitbox spawn scheduled at an offset within an action timeline.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HitboxEventDef {
    pub time: f32,
    pub hitbox: String,
    #[serde(default)]
    pub duration_override: Option<f32>,
}

/// One executable timeline: startup/active/recovery phases, scheduled
/// motion and hitbox events, and the cancel rules gating follow-ups.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ActionVariantDef {
    pub id: String,
    pub context: ActionContext,
    pub direction: ActionDirection,

    pub startup: f32,
    pub active: f32,
    pub recovery: f32,

    #[serde(default)]
    pub can_cancel_during_recovery: bool,
    /// Cancel window bounds in seconds from action start. Negative disables.
    #[serde(default = "disabled_bound")]
    pub cancel_window_start: f32,
    #[serde(default = "disabled_bound")]
    pub cancel_window_end: f32,
    #[serde(default)]
    pub cancel_tags_granted: Vec<String>,
    #[serde(default)]
    pub cancel_tags_required: Vec<String>,

    #[serde(default = "yes")]
    pub zero_velocity_on_start: bool,
    #[serde(default)]
    pub preserve_horizontal_momentum: bool,
    #[serde(default = "yes")]
    pub lock_facing: bool,
    #[serde(default = "yes")]
    pub lock_move_keys: bool,
    #[serde(default)]
    pub gravity_mode: GravityMode,

    #[serde(default)]
    pub motion_events: Vec<MotionEventDef>,
    #[serde(default)]
    pub hitbox_events: Vec<HitboxEventDef>,
    /// Hitbox spawned by an animation HitboxOn callback. Only honored when
    /// `hitbox_events` is empty; scheduled events are authoritative.
    #[serde(default)]
    pub callback_hitbox: Option<String>,

    #[serde(default)]
    pub animation_trigger: String,
}

impl ActionVariantDef {
    pub fn active_end(&self) -> f32 {
        self.startup + self.active
    }

    pub fn total_duration(&self) -> f32 {
        self.startup + self.active + self.recovery
    }

    pub fn cancel_window_enabled(&self) -> bool {
        self.cancel_window_start >= 0.0 && self.cancel_window_end >= 0.0
    }
}

/// All variants an action button can resolve to, across contexts/directions.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ActionSetDef {
    pub id: String,
    pub variants: Vec<ActionVariantDef>,
}

// ============================================================================
// Hitboxes (hitboxes.ron)
// ============================================================================

/// Which side a hit volume damages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
pub enum HitTarget {
    #[default]
    Enemies,
    Players,
}

/// Data describing how a hit affects a target.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct HitPayloadDef {
    pub damage: f32,
    #[serde(default)]
    pub hitstun_seconds: f32,
    #[serde(default)]
    pub armor_break: f32,
    #[serde(default)]
    pub knockback: XY,
    #[serde(default)]
    pub reset_vertical_velocity: bool,
    #[serde(default)]
    pub inherit_source_vertical_velocity: bool,
    #[serde(default)]
    pub ignore_iframes: bool,
    #[serde(default)]
    pub cancel_target_action: bool,
    /// Authored on some payloads but consumed by no resolution path yet.
    #[serde(default)]
    pub launch_airborne_upward: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProjectileDef {
    pub speed: f32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HitboxConfigDef {
    pub id: String,
    pub payload: HitPayloadDef,
    #[serde(default)]
    pub target: HitTarget,
    #[serde(default = "default_radius")]
    pub radius: f32,
    #[serde(default)]
    pub local_offset: XY,
    #[serde(default = "yes")]
    pub flip_with_facing: bool,
    #[serde(default = "default_life")]
    pub life_seconds: f32,
    /// Present for volumes that translate along their facing each tick.
    #[serde(default)]
    pub projectile: Option<ProjectileDef>,
}

// ============================================================================
// Rag profiles (rags.ron)
// ============================================================================

/// A costume loadout: the action sets it contributes to the Special and
/// Trick buttons. The Basic button never changes with the equipped rag.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RagDef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub special_set: Option<String>,
    #[serde(default)]
    pub trick_set: Option<String>,
}

fn disabled_bound() -> f32 {
    -1.0
}

fn yes() -> bool {
    true
}

fn default_radius() -> f32 {
    12.0
}

fn default_life() -> f32 {
    0.2
}

//! Combat domain: messages passed between systems and to collaborators.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::content::HitPayloadDef;

/// A payload plus everything about the attacker at the instant of the hit.
/// Knockback direction depends on the attacker's facing, not the target's,
/// so the context travels with the payload.
#[derive(Debug, Clone)]
pub struct HitContext {
    pub payload: HitPayloadDef,
    pub source: Entity,
    pub source_position: Vec2,
    pub source_velocity: Vec2,
    /// Attacker facing, normalized.
    pub facing: Vec2,
}

/// Request to instantiate a hit volume for `owner`.
#[derive(Debug)]
pub struct SpawnHitbox {
    pub owner: Entity,
    pub hitbox: String,
    pub facing: Vec2,
    pub duration_override: Option<f32>,
}

impl Message for SpawnHitbox {}

/// A hit volume overlapped a damageable target this tick.
#[derive(Debug)]
pub struct HitDelivered {
    pub target: Entity,
    pub context: HitContext,
}

impl Message for HitDelivered {}

/// Hit resolution applied damage and knockback to the target (not dead,
/// not armor-blocked, not suppressed by i-frames).
#[derive(Debug)]
pub struct HitApplied {
    pub target: Entity,
    pub context: HitContext,
}

impl Message for HitApplied {}

#[derive(Debug)]
pub struct DeathEvent {
    pub entity: Entity,
}

impl Message for DeathEvent {}

/// Outgoing, best-effort trigger for the animation collaborator.
#[derive(Debug)]
pub struct AnimationTrigger {
    pub entity: Entity,
    pub name: String,
}

impl Message for AnimationTrigger {}

/// Outgoing boolean parameter change for the animation collaborator.
#[derive(Debug)]
pub struct AnimationFlag {
    pub entity: Entity,
    pub name: String,
    pub value: bool,
}

impl Message for AnimationFlag {}

/// Incoming animation-authored timing callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationCallbackKind {
    AttackFinished,
    HitboxOn,
    HitboxOff,
}

#[derive(Debug)]
pub struct AnimationCallback {
    pub entity: Entity,
    pub kind: AnimationCallbackKind,
}

impl Message for AnimationCallback {}

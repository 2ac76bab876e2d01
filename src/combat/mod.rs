//! Combat domain: hit resolution, actor state machine, and hit volumes.

mod animation;
mod components;
mod controller;
pub mod events;
mod hitbox;
mod knockback;
mod resolve;

pub use animation::{AnimationBindings, BoolSource};
pub use components::{
    ActionLoadout, ActorState, Armor, CombatController, Health, Hurtbox, RagInventory, RagLoadout,
    Team,
};
pub use controller::CombatInput;
pub use events::{
    AnimationCallback, AnimationCallbackKind, AnimationFlag, AnimationTrigger, DeathEvent,
    HitApplied, HitContext, HitDelivered, SpawnHitbox,
};
pub use hitbox::{HitVolume, Projectile};
pub use knockback::solve as solve_knockback;
pub use resolve::{HitOutcome, resolve_hit};

use bevy::prelude::*;

use crate::core::TickSet;

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CombatInput>()
            .add_message::<SpawnHitbox>()
            .add_message::<HitDelivered>()
            .add_message::<HitApplied>()
            .add_message::<DeathEvent>()
            .add_message::<AnimationTrigger>()
            .add_message::<AnimationFlag>()
            .add_message::<AnimationCallback>()
            .add_systems(Update, controller::read_combat_input.in_set(TickSet::Input))
            .add_systems(
                Update,
                (
                    controller::route_player_input,
                    animation::handle_animation_callbacks,
                    controller::handle_action_requests,
                )
                    .chain()
                    .in_set(TickSet::Route),
            )
            .add_systems(
                Update,
                (
                    hitbox::spawn_hitboxes,
                    hitbox::tick_hit_volumes,
                    hitbox::detect_hit_overlaps,
                )
                    .chain()
                    .in_set(TickSet::Hitbox),
            )
            .add_systems(
                Update,
                (resolve::apply_hits, resolve::tick_combat_timers)
                    .chain()
                    .in_set(TickSet::Resolve),
            )
            .add_systems(
                Update,
                (
                    controller::react_to_hits,
                    controller::handle_deaths,
                    controller::evaluate_actor_state,
                )
                    .chain()
                    .in_set(TickSet::State),
            )
            .add_systems(
                Update,
                controller::release_locks.in_set(TickSet::LateRelease),
            )
            .add_systems(
                Update,
                animation::sync_animation_flags.in_set(TickSet::Present),
            );
    }
}

//! Combat domain: hit application on a damageable target.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::components::{Armor, Health, Hurtbox};
use crate::combat::events::{DeathEvent, HitApplied, HitContext, HitDelivered};
use crate::combat::knockback;
use crate::movement::{GravityBody, MovementState};

#[derive(Debug, Default, Clone, Copy)]
pub struct HitOutcome {
    pub damaged: bool,
    pub armor_blocked: bool,
    /// Knockback and hitstun were applied.
    pub applied: bool,
}

/// Resolve one incoming hit. No-op on dead targets. Armor and health are
/// independent gates: an armor-blocked hit still attempts damage but never
/// applies knockback or hitstun, and a hit the i-frames suppressed applies
/// nothing regardless of the armor outcome.
pub fn resolve_hit(
    context: &HitContext,
    health: &mut Health,
    mut armor: Option<&mut Armor>,
    hurtbox: &mut Hurtbox,
    velocity: &mut Vec2,
    gravity: &mut GravityBody,
) -> HitOutcome {
    if health.is_dead() {
        return HitOutcome::default();
    }

    let armor_blocked = armor
        .as_deref_mut()
        .map(|a| a.absorb(context.payload.damage + context.payload.armor_break))
        .unwrap_or(false);

    let damaged = health.take_damage(context.payload.damage, context.payload.ignore_iframes);

    if armor_blocked || !damaged {
        return HitOutcome {
            damaged,
            armor_blocked,
            applied: false,
        };
    }

    if context.payload.reset_vertical_velocity {
        velocity.y = 0.0;
    }
    *velocity = knockback::solve(context, hurtbox.weight_horizontal, hurtbox.weight_vertical);
    hurtbox.enter_hitstun(&context.payload, gravity);

    HitOutcome {
        damaged,
        armor_blocked,
        applied: true,
    }
}

pub(crate) fn apply_hits(
    mut delivered: MessageReader<HitDelivered>,
    mut targets: Query<(
        &mut Health,
        Option<&mut Armor>,
        &mut Hurtbox,
        &mut LinearVelocity,
        &mut GravityBody,
    )>,
    mut applied: MessageWriter<HitApplied>,
    mut deaths: MessageWriter<DeathEvent>,
) {
    for hit in delivered.read() {
        let Ok((mut health, armor, mut hurtbox, mut velocity, mut gravity)) =
            targets.get_mut(hit.target)
        else {
            continue;
        };

        let mut armor = armor;
        let outcome = resolve_hit(
            &hit.context,
            &mut health,
            armor.as_deref_mut(),
            &mut hurtbox,
            &mut velocity.0,
            &mut gravity,
        );

        if outcome.applied {
            applied.write(HitApplied {
                target: hit.target,
                context: hit.context.clone(),
            });
        }

        if outcome.damaged && health.is_dead() {
            deaths.write(DeathEvent { entity: hit.target });
        }
    }
}

/// Per-tick upkeep: i-frame windows, grounded armor regeneration, and the
/// hitstun gravity restore.
pub(crate) fn tick_combat_timers(
    time: Res<Time>,
    mut query: Query<(
        &mut Health,
        Option<&mut Armor>,
        &mut Hurtbox,
        &mut GravityBody,
        Option<&MovementState>,
    )>,
) {
    let dt = time.delta_secs();

    for (mut health, armor, mut hurtbox, mut gravity, movement) in &mut query {
        health.tick(dt);

        if let Some(mut armor) = armor {
            let grounded = movement.map(|m| m.grounded).unwrap_or(true);
            armor.tick(dt, grounded);
        }

        hurtbox.tick(dt, &mut gravity);
    }
}

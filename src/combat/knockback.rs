//! Combat domain: knockback resolution.

use bevy::prelude::*;

use super::events::HitContext;

/// Weights below this are floored to avoid divide-by-zero.
const MIN_WEIGHT: f32 = 0.01;

/// Resolve the payload's knockback vector into a target velocity: mirror X
/// across the axis when the attacker faces left, divide by the target's
/// weights, and let `inherit_source_vertical_velocity` override Y with the
/// attacker's vertical velocity.
pub fn solve(context: &HitContext, weight_horizontal: f32, weight_vertical: f32) -> Vec2 {
    let mut kb = context.payload.knockback.vec2();

    if context.facing.x < 0.0 {
        kb.x = -kb.x;
    }

    let x = kb.x / weight_horizontal.max(MIN_WEIGHT);
    let mut y = kb.y / weight_vertical.max(MIN_WEIGHT);

    if context.payload.inherit_source_vertical_velocity {
        y = context.source_velocity.y;
    }

    Vec2::new(x, y)
}

//! Actions domain: pure lookup from (button, direction, context) to a variant.

use bevy::prelude::*;
use std::sync::Arc;

use crate::combat::{ActionLoadout, RagInventory};
use crate::content::{ActionContext, ActionDirection, ActionVariantDef, ContentRegistry};

/// The three action buttons. Basic always resolves against the actor's
/// fixed set; Special and Trick resolve against the equipped rag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionButton {
    Basic,
    Special,
    Trick,
}

/// Classify a move vector into an action direction: pushed down beats
/// horizontal, horizontal beats neutral.
pub fn classify_direction(axis: Vec2) -> ActionDirection {
    if axis.y < -0.5 {
        ActionDirection::Down
    } else if axis.x.abs() > 0.1 {
        ActionDirection::Horizontal
    } else {
        ActionDirection::Neutral
    }
}

/// Resolve an action request against the catalog. Pure lookup, no side
/// effects; `None` means the request is dropped.
///
/// If the directional slot within the matched context is empty, a Neutral
/// request falls back to the Horizontal slot and vice versa — any
/// horizontal attack also satisfies a neutral request. Down never falls
/// back.
pub fn resolve(
    registry: &ContentRegistry,
    loadout: &ActionLoadout,
    rags: &RagInventory,
    button: ActionButton,
    direction: ActionDirection,
    context: ActionContext,
) -> Option<Arc<ActionVariantDef>> {
    let set_id = match button {
        ActionButton::Basic => Some(loadout.basic_set.as_str()),
        ActionButton::Special => rags.current().and_then(|r| r.special_set.as_deref()),
        ActionButton::Trick => rags.current().and_then(|r| r.trick_set.as_deref()),
    }?;

    let set = registry.action_set(set_id)?;

    if let Some(variant) = set.slot(context, direction) {
        return Some(variant.clone());
    }

    match direction {
        ActionDirection::Neutral => set.slot(context, ActionDirection::Horizontal).cloned(),
        ActionDirection::Horizontal => set.slot(context, ActionDirection::Neutral).cloned(),
        ActionDirection::Down => None,
    }
}

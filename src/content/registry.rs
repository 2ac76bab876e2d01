//! ContentRegistry resource providing lookups for all loaded content.

use bevy::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;

use super::data::*;
use super::validation::{ValidationError, validate_hitbox, validate_rag, validate_variant};

/// A loaded action set with its variants wrapped in `Arc` so the action
/// runner can hold a reference to the executing timeline by identity.
#[derive(Debug, Default)]
pub struct ActionSet {
    pub variants: Vec<Arc<ActionVariantDef>>,
}

impl ActionSet {
    /// Exact (context, direction) slot lookup. Fallback rules live in the
    /// resolver, not here.
    pub fn slot(
        &self,
        context: ActionContext,
        direction: ActionDirection,
    ) -> Option<&Arc<ActionVariantDef>> {
        self.variants
            .iter()
            .find(|v| v.context == context && v.direction == direction)
    }
}

/// Central registry for all loaded game content, read-only after startup.
#[derive(Resource, Default)]
pub struct ContentRegistry {
    pub action_sets: HashMap<String, ActionSet>,
    pub hitboxes: HashMap<String, Arc<HitboxConfigDef>>,
    pub rags: Vec<RagDef>,
}

impl ContentRegistry {
    /// Build a registry from raw definitions, dropping any definition that
    /// fails validation. Returned errors describe what was dropped.
    pub fn from_defs(
        sets: Vec<ActionSetDef>,
        hitboxes: Vec<HitboxConfigDef>,
        rags: Vec<RagDef>,
    ) -> (Self, Vec<ValidationError>) {
        let mut registry = ContentRegistry::default();
        let mut errors = Vec::new();

        for hitbox in hitboxes {
            match validate_hitbox(&hitbox) {
                Ok(()) => {
                    registry
                        .hitboxes
                        .insert(hitbox.id.clone(), Arc::new(hitbox));
                }
                Err(e) => errors.push(e),
            }
        }

        for set in sets {
            let mut entry = ActionSet::default();
            for variant in set.variants {
                match validate_variant(&set.id, &variant, &registry.hitboxes) {
                    Ok(()) => entry.variants.push(Arc::new(variant)),
                    Err(e) => errors.push(e),
                }
            }
            registry.action_sets.insert(set.id, entry);
        }

        for rag in rags {
            match validate_rag(&rag, &registry.action_sets) {
                Ok(()) => registry.rags.push(rag),
                Err(e) => errors.push(e),
            }
        }

        (registry, errors)
    }

    pub fn action_set(&self, id: &str) -> Option<&ActionSet> {
        self.action_sets.get(id)
    }

    pub fn hitbox(&self, id: &str) -> Option<&Arc<HitboxConfigDef>> {
        self.hitboxes.get(id)
    }

    /// Returns a summary of loaded content counts for logging.
    pub fn summary(&self) -> String {
        let variant_count: usize = self.action_sets.values().map(|s| s.variants.len()).sum();
        format!(
            "ContentRegistry loaded: {} action sets ({} variants), {} hitboxes, {} rags",
            self.action_sets.len(),
            variant_count,
            self.hitboxes.len(),
            self.rags.len(),
        )
    }
}

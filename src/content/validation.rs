//! Validation for loaded content definitions.
//!
//! Invalid definitions are dropped rather than aborting the load; the
//! returned errors say what was rejected and why.

use std::collections::HashMap;
use std::sync::Arc;

use super::data::{ActionVariantDef, HitboxConfigDef, RagDef};
use super::registry::ActionSet;

#[derive(Debug)]
pub struct ValidationError {
    pub source_type: &'static str,
    pub source_id: String,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} '{}' rejected: {}",
            self.source_type, self.source_id, self.message
        )
    }
}

fn err(source_type: &'static str, source_id: &str, message: impl Into<String>) -> ValidationError {
    ValidationError {
        source_type,
        source_id: source_id.to_string(),
        message: message.into(),
    }
}

/// Timeline phases must be non-negative and every scheduled event must
/// reference a known hitbox and land inside the timeline.
pub fn validate_variant(
    set_id: &str,
    variant: &ActionVariantDef,
    hitboxes: &HashMap<String, Arc<HitboxConfigDef>>,
) -> Result<(), ValidationError> {
    let id = format!("{}/{}", set_id, variant.id);

    if variant.startup < 0.0 || variant.active < 0.0 || variant.recovery < 0.0 {
        return Err(err(
            "ActionVariant",
            &id,
            format!(
                "negative timeline phase (startup={}, active={}, recovery={})",
                variant.startup, variant.active, variant.recovery
            ),
        ));
    }

    let total = variant.total_duration();
    for event in &variant.hitbox_events {
        if !hitboxes.contains_key(&event.hitbox) {
            return Err(err(
                "ActionVariant",
                &id,
                format!("references missing hitbox '{}'", event.hitbox),
            ));
        }
        if event.time < 0.0 || event.time > total {
            return Err(err(
                "ActionVariant",
                &id,
                format!("hitbox event at {}s falls outside the timeline", event.time),
            ));
        }
    }
    for event in &variant.motion_events {
        if event.time < 0.0 || event.time > total {
            return Err(err(
                "ActionVariant",
                &id,
                format!("motion event at {}s falls outside the timeline", event.time),
            ));
        }
    }

    if let Some(callback) = &variant.callback_hitbox {
        if !hitboxes.contains_key(callback) {
            return Err(err(
                "ActionVariant",
                &id,
                format!("references missing callback hitbox '{}'", callback),
            ));
        }
        if !variant.hitbox_events.is_empty() {
            return Err(err(
                "ActionVariant",
                &id,
                "declares both scheduled hitbox events and a callback hitbox",
            ));
        }
    }

    Ok(())
}

pub fn validate_hitbox(hitbox: &HitboxConfigDef) -> Result<(), ValidationError> {
    if hitbox.radius <= 0.0 {
        return Err(err(
            "Hitbox",
            &hitbox.id,
            format!("non-positive radius {}", hitbox.radius),
        ));
    }
    if hitbox.life_seconds <= 0.0 {
        return Err(err(
            "Hitbox",
            &hitbox.id,
            format!("non-positive lifetime {}", hitbox.life_seconds),
        ));
    }
    if hitbox.payload.damage < 0.0 {
        return Err(err(
            "Hitbox",
            &hitbox.id,
            format!("negative damage {}", hitbox.payload.damage),
        ));
    }
    Ok(())
}

pub fn validate_rag(
    rag: &RagDef,
    action_sets: &HashMap<String, ActionSet>,
) -> Result<(), ValidationError> {
    for set_id in [&rag.special_set, &rag.trick_set].into_iter().flatten() {
        if !action_sets.contains_key(set_id) {
            return Err(err(
                "Rag",
                &rag.id,
                format!("references missing action set '{}'", set_id),
            ));
        }
    }
    Ok(())
}

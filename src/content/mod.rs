//! Content domain: RON definitions, loading, and the runtime registry.

pub mod data;
mod loader;
mod registry;
#[cfg(test)]
mod tests;
mod validation;

pub use data::{
    ActionContext, ActionDirection, ActionSetDef, ActionVariantDef, GravityMode, HitPayloadDef,
    HitTarget, HitboxConfigDef, MotionApply, RagDef, XY,
};
pub use registry::{ActionSet, ContentRegistry};

use bevy::prelude::*;
use std::path::Path;

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_content);
    }
}

fn load_content(mut commands: Commands) {
    let (registry, load_errors, validation_errors) =
        loader::load_all_content(Path::new("assets/data"));

    for e in &load_errors {
        error!("{}", e);
    }
    for e in &validation_errors {
        warn!("{}", e);
    }
    info!("{}", registry.summary());

    commands.insert_resource(registry);
}

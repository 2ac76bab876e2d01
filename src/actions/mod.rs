//! Actions domain: catalog resolution and the timeline runner.

mod resolver;
mod runner;

pub use resolver::{ActionButton, classify_direction, resolve};
pub use runner::ActionRunner;

use bevy::prelude::*;

use crate::core::TickSet;

pub struct ActionsPlugin;

impl Plugin for ActionsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            runner::tick_action_runners.in_set(TickSet::Action),
        );
    }
}

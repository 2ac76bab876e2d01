//! Movement domain: locomotion controller, assists, and physics probes.

mod bootstrap;
mod components;
mod resources;
mod systems;
#[cfg(test)]
mod tests;

pub use bootstrap::BASIC_ACTION_SET;
pub use components::{
    Facing, GameLayer, GravityBody, MoveIntent, MovementState, Player, WallContact,
};
pub use resources::{AccelRebuild, MovementInput, MovementTuning};

use bevy::prelude::*;

use crate::core::TickSet;

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementTuning>()
            .init_resource::<MovementInput>()
            .add_systems(Startup, bootstrap::spawn_arena)
            .add_systems(PostStartup, bootstrap::spawn_player)
            .add_systems(Update, systems::read_input.in_set(TickSet::Input))
            .add_systems(
                Update,
                (systems::detect_ground, systems::detect_walls)
                    .chain()
                    .in_set(TickSet::Probe),
            )
            .add_systems(
                Update,
                (
                    systems::update_timers,
                    systems::apply_dash,
                    systems::resolve_jumps,
                    systems::apply_locomotion,
                    systems::apply_wall_slide,
                    systems::apply_gravity,
                )
                    .chain()
                    .in_set(TickSet::Locomotion),
            );
    }
}

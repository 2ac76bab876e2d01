//! Core domain: deterministic tick ordering, camera, and presentation sync.

use bevy::prelude::*;

use crate::movement::{Facing, MovementState};

/// Fixed per-frame ordering for every gameplay system. One chained pass:
/// sample input, probe the world, route intent, move, advance action
/// timelines, run hit volumes, resolve hits, evaluate actor state, release
/// locks, then sync presentation. Hits detected in a frame are fully
/// resolved before that frame's state evaluation.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickSet {
    Input,
    Probe,
    Route,
    Locomotion,
    Action,
    Hitbox,
    Resolve,
    State,
    LateRelease,
    Present,
}

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                TickSet::Input,
                TickSet::Probe,
                TickSet::Route,
                TickSet::Locomotion,
                TickSet::Action,
                TickSet::Hitbox,
                TickSet::Resolve,
                TickSet::State,
                TickSet::LateRelease,
                TickSet::Present,
            )
                .chain(),
        )
        .add_systems(Startup, setup_camera)
        .add_systems(Update, sync_sprite_facing.in_set(TickSet::Present));
    }
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

fn sync_sprite_facing(mut query: Query<(&MovementState, &mut Sprite)>) {
    for (state, mut sprite) in &mut query {
        sprite.flip_x = state.facing == Facing::Left;
    }
}

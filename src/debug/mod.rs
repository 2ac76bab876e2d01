//! Debug tools for fast iteration (dev-tools feature).
//!
//! - F1 spawns an unarmored training dummy near the player
//! - F2 spawns an armored one
//! - actor state transitions are logged

use avian2d::prelude::*;
use bevy::prelude::*;
use rand::Rng;

use crate::combat::{ActorState, Armor, CombatController, Health, Hurtbox, Team};
use crate::core::TickSet;
use crate::movement::{GameLayer, GravityBody, MovementTuning, Player};

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (spawn_training_dummies, log_state_transitions).in_set(TickSet::Present),
        );
    }
}

fn spawn_training_dummies(
    keyboard: Res<ButtonInput<KeyCode>>,
    tuning: Res<MovementTuning>,
    players: Query<&Transform, With<Player>>,
    mut commands: Commands,
) {
    let armored = keyboard.just_pressed(KeyCode::F2);
    if !keyboard.just_pressed(KeyCode::F1) && !armored {
        return;
    }
    let Ok(player) = players.single() else {
        return;
    };

    let offset = rand::rng().random_range(60.0..120.0);
    let x = player.translation.x + offset;

    let mut dummy = commands.spawn((
        Team::Enemy,
        Health::new(100.0, 0.0),
        Hurtbox::new(1.0, 1.0),
        GravityBody::new(tuning.default_gravity_scale),
        Sprite {
            color: if armored {
                Color::srgb(0.6, 0.6, 0.75)
            } else {
                Color::srgb(0.8, 0.4, 0.4)
            },
            custom_size: Some(Vec2::new(28.0, 52.0)),
            ..default()
        },
        Transform::from_xyz(x, 60.0, 0.0),
        (
            RigidBody::Dynamic,
            Collider::rectangle(28.0, 52.0),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            GravityScale(0.0),
            Friction::new(0.0),
            CollisionEventsEnabled,
            CollisionLayers::new(
                GameLayer::Enemy,
                [GameLayer::Ground, GameLayer::Wall, GameLayer::PlayerHitbox],
            ),
        ),
    ));

    if armored {
        dummy.insert(Armor::new(20.0, 1.5, 5.0));
    }

    info!("Spawned {} dummy at x={:.0}", if armored { "armored" } else { "plain" }, x);
}

fn log_state_transitions(
    query: Query<(Entity, &CombatController)>,
    mut last: Local<Vec<(Entity, ActorState)>>,
) {
    for (entity, controller) in &query {
        match last.iter_mut().find(|(e, _)| *e == entity) {
            Some((_, state)) if *state != controller.state => {
                debug!("{:?}: {:?} -> {:?}", entity, *state, controller.state);
                *state = controller.state;
            }
            Some(_) => {}
            None => last.push((entity, controller.state)),
        }
    }
}

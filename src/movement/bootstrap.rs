//! Movement domain: player and arena bootstrap.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::actions::ActionRunner;
use crate::combat::{
    ActionLoadout, AnimationBindings, CombatController, Health, Hurtbox, RagInventory, Team,
};
use crate::content::ContentRegistry;
use crate::movement::{GameLayer, GravityBody, MoveIntent, MovementState, MovementTuning, Player};

/// Action set the Basic button always resolves against.
pub const BASIC_ACTION_SET: &str = "set_basic";

pub(crate) fn spawn_player(
    mut commands: Commands,
    tuning: Res<MovementTuning>,
    registry: Option<Res<ContentRegistry>>,
    existing: Query<Entity, With<Player>>,
) {
    if !existing.is_empty() {
        return;
    }

    let rags = registry
        .map(|r| RagInventory::from_defs(&r.rags))
        .unwrap_or_default();

    commands.spawn((
        // Identity & movement
        (
            Player,
            MovementState::default(),
            MoveIntent::default(),
            GravityBody::new(tuning.default_gravity_scale),
        ),
        // Combat
        (
            Team::Player,
            Health::new(100.0, 0.3),
            Hurtbox::new(1.0, 1.0),
            ActionRunner::default(),
            ActionLoadout {
                basic_set: BASIC_ACTION_SET.to_string(),
            },
            rags,
            CombatController::default(),
            AnimationBindings::default(),
        ),
        // Rendering
        Sprite {
            color: Color::srgb(0.9, 0.85, 0.6),
            custom_size: Some(Vec2::new(24.0, 48.0)),
            ..default()
        },
        Transform::from_xyz(0.0, 60.0, 0.0),
        // Physics
        (
            RigidBody::Dynamic,
            Collider::rectangle(24.0, 48.0),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            GravityScale(0.0), // gravity is integrated by the movement systems
            Friction::new(0.0),
            CollisionEventsEnabled,
            CollisionLayers::new(
                GameLayer::Player,
                [GameLayer::Ground, GameLayer::Wall, GameLayer::EnemyHitbox],
            ),
        ),
    ));
}

pub(crate) fn spawn_arena(mut commands: Commands) {
    let ground_color = Color::srgb(0.25, 0.25, 0.3);

    // Floor
    commands.spawn((
        Sprite {
            color: ground_color,
            custom_size: Some(Vec2::new(2000.0, 40.0)),
            ..default()
        },
        Transform::from_xyz(0.0, -20.0, 0.0),
        RigidBody::Static,
        Collider::rectangle(2000.0, 40.0),
        CollisionLayers::new(GameLayer::Ground, [GameLayer::Player, GameLayer::Enemy]),
    ));

    // Side walls
    for x in [-600.0, 600.0] {
        commands.spawn((
            Sprite {
                color: ground_color,
                custom_size: Some(Vec2::new(40.0, 800.0)),
                ..default()
            },
            Transform::from_xyz(x, 360.0, 0.0),
            RigidBody::Static,
            Collider::rectangle(40.0, 800.0),
            CollisionLayers::new(GameLayer::Wall, [GameLayer::Player, GameLayer::Enemy]),
        ));
    }

    // A platform to test descend and air actions
    commands.spawn((
        Sprite {
            color: ground_color,
            custom_size: Some(Vec2::new(240.0, 16.0)),
            ..default()
        },
        Transform::from_xyz(-160.0, 120.0, 0.0),
        RigidBody::Static,
        Collider::rectangle(240.0, 16.0),
        CollisionLayers::new(GameLayer::Ground, [GameLayer::Player, GameLayer::Enemy]),
    ));
}

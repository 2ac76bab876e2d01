//! Combat domain: hit volumes and projectiles.
//!
//! Volumes are sensor circles with a finite lifetime. The first qualifying
//! overlap delivers a HitContext to the target and despawns the volume;
//! projectile variants also translate along their facing each tick.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::components::Hurtbox;
use crate::combat::events::{HitContext, HitDelivered, SpawnHitbox};
use crate::content::{ContentRegistry, HitPayloadDef, HitTarget};
use crate::movement::GameLayer;

#[derive(Component, Debug)]
pub struct HitVolume {
    pub payload: HitPayloadDef,
    pub owner: Entity,
    pub facing: Vec2,
    pub life_timer: f32,
    consumed: bool,
}

#[derive(Component, Debug)]
pub struct Projectile {
    pub speed: f32,
}

pub(crate) fn spawn_hitboxes(
    mut requests: MessageReader<SpawnHitbox>,
    registry: Option<Res<ContentRegistry>>,
    owners: Query<&Transform>,
    mut commands: Commands,
) {
    let Some(registry) = registry else {
        return;
    };

    for request in requests.read() {
        let Some(config) = registry.hitbox(&request.hitbox) else {
            warn!("SpawnHitbox: unknown hitbox '{}'", request.hitbox);
            continue;
        };
        let Ok(owner_transform) = owners.get(request.owner) else {
            continue;
        };

        let mut offset = config.local_offset.vec2();
        if config.flip_with_facing && request.facing.x < 0.0 {
            offset.x = -offset.x;
        }
        let position = owner_transform.translation.truncate() + offset;

        let (layer, targets, color) = match config.target {
            HitTarget::Enemies => (
                GameLayer::PlayerHitbox,
                GameLayer::Enemy,
                Color::srgba(1.0, 1.0, 0.0, 0.4),
            ),
            HitTarget::Players => (
                GameLayer::EnemyHitbox,
                GameLayer::Player,
                Color::srgba(1.0, 0.3, 0.3, 0.4),
            ),
        };

        let mut entity = commands.spawn((
            HitVolume {
                payload: config.payload.clone(),
                owner: request.owner,
                facing: request.facing,
                life_timer: request.duration_override.unwrap_or(config.life_seconds),
                consumed: false,
            },
            Sprite {
                color,
                custom_size: Some(Vec2::splat(config.radius * 2.0)),
                ..default()
            },
            Transform::from_xyz(position.x, position.y, 1.0),
            Collider::circle(config.radius),
            Sensor,
            CollisionEventsEnabled,
            CollisionLayers::new(layer, [targets]),
        ));

        if let Some(projectile) = &config.projectile {
            entity.insert(Projectile {
                speed: projectile.speed,
            });
        }
    }
}

pub(crate) fn tick_hit_volumes(
    time: Res<Time>,
    mut query: Query<(Entity, &mut HitVolume, Option<&Projectile>, &mut Transform)>,
    mut commands: Commands,
) {
    let dt = time.delta_secs();

    for (entity, mut volume, projectile, mut transform) in &mut query {
        if let Some(projectile) = projectile {
            let step = volume.facing * projectile.speed * dt;
            transform.translation += step.extend(0.0);
        }

        volume.life_timer -= dt;
        if volume.life_timer <= 0.0 {
            commands.entity(entity).despawn();
        }
    }
}

pub(crate) fn detect_hit_overlaps(
    mut collisions: MessageReader<CollisionStart>,
    mut volumes: Query<(&mut HitVolume, &Transform)>,
    hurtboxes: Query<(), With<Hurtbox>>,
    sources: Query<(&Transform, Option<&LinearVelocity>)>,
    mut delivered: MessageWriter<HitDelivered>,
    mut commands: Commands,
) {
    for event in collisions.read() {
        let pairs = [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ];

        for (volume_entity, target) in pairs {
            let Ok((mut volume, volume_transform)) = volumes.get_mut(volume_entity) else {
                continue;
            };
            if volume.consumed || volume.owner == target {
                continue;
            }
            if hurtboxes.get(target).is_err() {
                continue;
            }

            let (source_position, source_velocity) = match sources.get(volume.owner) {
                Ok((transform, velocity)) => (
                    transform.translation.truncate(),
                    velocity.map(|v| v.0).unwrap_or(Vec2::ZERO),
                ),
                Err(_) => (volume_transform.translation.truncate(), Vec2::ZERO),
            };

            volume.consumed = true;
            delivered.write(HitDelivered {
                target,
                context: HitContext {
                    payload: volume.payload.clone(),
                    source: volume.owner,
                    source_position,
                    source_velocity,
                    facing: volume.facing,
                },
            });
            commands.entity(volume_entity).despawn();
        }
    }
}

//! Movement domain: ground and wall detection probes.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{GameLayer, MovementState, MovementTuning, Player, WallContact};

pub(crate) fn detect_ground(
    spatial_query: SpatialQuery,
    tuning: Res<MovementTuning>,
    mut query: Query<(&Transform, &Collider, &mut MovementState), With<Player>>,
) {
    let ground_filter = SpatialQueryFilter::from_mask(GameLayer::Ground);

    for (transform, collider, mut state) in &mut query {
        let was_grounded = state.grounded;

        // Cast a short ray downward from the actor's feet
        let half_height = match collider.shape_scaled().as_cuboid() {
            Some(c) => c.half_extents.y,
            None => 24.0,
        };

        let ray_origin = transform.translation.truncate() - Vec2::new(0.0, half_height);
        let hit = spatial_query.cast_ray(
            ray_origin,
            Dir2::NEG_Y,
            tuning.ground_check_distance,
            true,
            &ground_filter,
        );

        state.grounded = hit.is_some();

        if state.grounded {
            // Grounded contact keeps the coyote window armed
            state.coyote_counter = tuning.coyote_time;
            state.jumped_from_wall = false;
        }

        if state.grounded && !was_grounded {
            debug!("Landed");
        }
    }
}

pub(crate) fn detect_walls(
    spatial_query: SpatialQuery,
    tuning: Res<MovementTuning>,
    mut query: Query<(&Transform, &Collider, &mut MovementState), With<Player>>,
) {
    let wall_filter = SpatialQueryFilter::from_mask(GameLayer::Wall);

    for (transform, collider, mut state) in &mut query {
        let half_width = match collider.shape_scaled().as_cuboid() {
            Some(c) => c.half_extents.x,
            None => 12.0,
        };

        let origin = transform.translation.truncate() + tuning.wall_check_offset;
        let reach = half_width + tuning.wall_check_distance;

        let left_hit = spatial_query.cast_ray(origin, Dir2::NEG_X, reach, true, &wall_filter);
        let right_hit = spatial_query.cast_ray(origin, Dir2::X, reach, true, &wall_filter);

        state.wall = match (left_hit.is_some(), right_hit.is_some()) {
            (true, false) => WallContact::Left,
            (false, true) => WallContact::Right,
            _ => WallContact::None,
        };

        // Touching a wall while airborne arms the wall-jump coyote window
        if state.wall != WallContact::None && !state.grounded {
            state.last_wall = state.wall;
            state.wall_coyote_counter = tuning.wall_jump_coyote_time;
        }
    }
}

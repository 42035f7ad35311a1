/*
 * Copyright (C) Oscar Shrimpton 2020
 *
 * This program is free software: you can redistribute it and/or modify it
 * under the terms of the GNU General Public License as published by the Free
 * Software Foundation, either version 3 of the License, or (at your option)
 * any later version.
 *
 * This program is distributed in the hope that it will be useful, but WITHOUT
 * ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or
 * FITNESS FOR A PARTICULAR PURPOSE.  See the GNU General Public License for
 * more details.
 *
 * You should have received a copy of the GNU General Public License along
 * with this program.  If not, see <http://www.gnu.org/licenses/>.
 */

use serde::{Deserialize, Serialize};

/// Everything that tunes how movers move.
///
/// Loadable with serde. Unset fields take their default, so a config file
/// only needs to mention what it changes:
///
/// ```
/// use stockton_physics::movement::MovementParamsBuilder;
///
/// let params = MovementParamsBuilder::default()
///     .gravity(400.0)
///     .build()
///     .unwrap();
///
/// assert_eq!(params.gravity, 400.0);
/// assert_eq!(params.max_speed, 320.0);
/// ```
#[derive(Builder, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[builder(default)]
#[serde(default)]
pub struct MovementParams {
    /// Downwards acceleration, in units/s².
    pub gravity: f32,

    /// Friction treats anything slower than this as this speed.
    /// Grounded walkers slower than this with no input just stop.
    pub stop_speed: f32,

    /// Fastest a walker can make itself go.
    pub max_speed: f32,

    /// Fastest a flying mover can make itself go.
    pub spectator_max_speed: f32,

    pub accelerate: f32,
    pub air_accelerate: f32,
    pub friction: f32,

    /// Multiplier on `gravity`.
    pub entity_gravity: f32,

    /// Tallest ledge a walker can climb without jumping.
    pub step_height: f32,

    /// Surfaces with a normal less upright than this are too steep to stand on.
    pub min_ground_normal: f32,

    /// How far below a mover to look for ground.
    pub ground_probe: f32,

    /// Movers going up faster than this are never on the ground.
    pub ground_release_speed: f32,

    /// Cap on wished speed while airborne.
    pub air_speed_cap: f32,

    /// Friction multiplier when there's no ground just ahead.
    pub edge_friction: f32,
}

impl Default for MovementParams {
    fn default() -> Self {
        MovementParams {
            gravity: 800.0,
            stop_speed: 100.0,
            max_speed: 320.0,
            spectator_max_speed: 500.0,
            accelerate: 10.0,
            air_accelerate: 10.0,
            friction: 4.0,
            entity_gravity: 1.0,
            step_height: 18.0,
            min_ground_normal: 0.7,
            ground_probe: 1.0,
            ground_release_speed: 180.0,
            air_speed_cap: 30.0,
            edge_friction: 2.0,
        }
    }
}

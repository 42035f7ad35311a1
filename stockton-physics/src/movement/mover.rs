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
use stockton_levels::Vector3;

/// What a mover is trying to do this tick, in units/s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MoveCommand {
    /// Along the view direction. Negative is backwards.
    pub forward: f32,

    /// To the right of the view direction. Negative is left.
    pub side: f32,

    /// Straight up. Only used when flying.
    pub up: f32,
}

impl MoveCommand {
    pub fn new(forward: f32, side: f32, up: f32) -> Self {
        MoveCommand { forward, side, up }
    }

    /// No forward or sideways intent.
    pub fn is_idle(&self) -> bool {
        self.forward == 0.0 && self.side == 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveMode {
    /// Affected by gravity, sticks to the ground and climbs steps.
    Walk,

    /// Moves freely in 3D, but still collides.
    Fly,
}

impl Default for MoveMode {
    fn default() -> Self {
        MoveMode::Walk
    }
}

/// Something that moves around a level, like a player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mover {
    pub origin: Vector3,
    pub velocity: Vector3,

    /// Pitch, yaw and roll, in degrees.
    pub angles: Vector3,

    /// Bounding box, relative to `origin`.
    pub mins: Vector3,
    pub maxs: Vector3,

    /// Set by the last movement step.
    pub on_ground: bool,

    pub mode: MoveMode,
    pub cmd: MoveCommand,
}

impl Mover {
    pub fn new(origin: Vector3, mins: Vector3, maxs: Vector3) -> Self {
        Mover {
            origin,
            velocity: Vector3::zeros(),
            angles: Vector3::zeros(),
            mins,
            maxs,
            on_ground: false,
            mode: MoveMode::default(),
            cmd: MoveCommand::default(),
        }
    }

    /// A mover with a standing player's bounding box.
    pub fn player(origin: Vector3) -> Self {
        Mover::new(
            origin,
            Vector3::new(-16.0, -16.0, -24.0),
            Vector3::new(16.0, 16.0, 32.0),
        )
    }

    /// Length of the velocity, ignoring the vertical part.
    pub fn horizontal_speed(&self) -> f32 {
        self.velocity.xy().norm()
    }
}

/// The forward, right and up vectors for some view angles (pitch, yaw, roll
/// in degrees). Yaw 0 looks down +X, yaw 90 down +Y, positive pitch looks down.
pub fn angle_vectors(angles: &Vector3) -> (Vector3, Vector3, Vector3) {
    let (sp, cp) = angles.x.to_radians().sin_cos();
    let (sy, cy) = angles.y.to_radians().sin_cos();
    let (sr, cr) = angles.z.to_radians().sin_cos();

    let forward = Vector3::new(cp * cy, cp * sy, -sp);
    let right = Vector3::new(
        -sr * sp * cy + cr * sy,
        -sr * sp * sy - cr * cy,
        -sr * cp,
    );
    let up = Vector3::new(cr * sp * cy + sr * sy, cr * sp * sy - sr * cy, cr * cp);

    (forward, right, up)
}

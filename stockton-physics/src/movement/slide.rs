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

//! Moving along a velocity, sliding off whatever gets in the way.

use arrayvec::ArrayVec;
use log::warn;
use stockton_levels::prelude::*;
use stockton_levels::Vector3;

use super::{Mover, MovementParams};
use crate::trace::Tracer;

/// Most times a slide can be redirected in one move.
pub const MAX_BUMPS: usize = 4;

/// Most surfaces a slide can be touching at once.
pub const MAX_CLIP_PLANES: usize = 5;

/// Velocity components smaller than this after clipping become 0.
pub const STOP_EPSILON: f32 = 0.1;

bitflags! {
    /// What a slide ran into.
    #[derive(Default)]
    pub struct BlockedFlags: u8 {
        /// Something walkable.
        const FLOOR = 0x1;

        /// A vertical wall, or something steppable.
        const WALL = 0x2;

        /// Started inside something solid, so didn't move at all.
        const STUCK = 0x4;
    }
}

/// Remove the part of `vel` going into a surface with the given `normal`.
/// `overbounce` above 1 pushes back out a little.
pub fn clip_velocity(vel: &Vector3, normal: &Vector3, overbounce: f32) -> Vector3 {
    let backoff = vel.dot(normal) * overbounce;

    (vel - normal * backoff).map(|c| if c.abs() < STOP_EPSILON { 0.0 } else { c })
}

/// Move `mover` along its velocity for `dt` seconds, sliding along anything it
/// hits. Velocity is updated to what's left after the collisions.
pub fn slide_move<L: MinCollisionFeatures + ?Sized>(
    tracer: &mut Tracer<'_, L>,
    mover: &mut Mover,
    params: &MovementParams,
    dt: f32,
) -> BlockedFlags {
    let mut blocked = BlockedFlags::empty();
    let mut planes: ArrayVec<Vector3, MAX_CLIP_PLANES> = ArrayVec::new();

    let primal_velocity = mover.velocity;
    let original_velocity = mover.velocity;
    let mut time_left = dt;

    for _ in 0..MAX_BUMPS {
        let end = mover.origin + mover.velocity * time_left;
        let trace = tracer.trace(&mover.origin, &end, &mover.mins, &mover.maxs);

        if trace.start_solid || trace.all_solid {
            warn!("Mover stuck in solid at {:?}", mover.origin);
            mover.velocity = Vector3::zeros();
            return BlockedFlags::STUCK;
        }

        if trace.fraction > 0.0 {
            mover.origin = trace.end_pos;
            planes.clear();
        }

        let normal = match trace.plane {
            Some(plane) if trace.hit() => plane.normal,
            _ => break,
        };

        if normal.z > params.min_ground_normal {
            blocked |= BlockedFlags::FLOOR;
        }
        if normal.z == 0.0 {
            blocked |= BlockedFlags::WALL;
        }

        time_left -= time_left * trace.fraction;

        if planes.try_push(normal).is_err() {
            mover.velocity = Vector3::zeros();
            break;
        }

        // Find a velocity that doesn't go into any of the planes
        let parallel = planes.iter().find_map(|plane| {
            let vel = clip_velocity(&original_velocity, plane, 1.0);
            let fits = planes
                .iter()
                .filter(|other| *other != plane)
                .all(|other| vel.dot(other) >= 0.0);

            if fits {
                Some(vel)
            } else {
                None
            }
        });

        mover.velocity = match parallel {
            Some(vel) => vel,
            None if planes.len() == 2 => {
                // Go along the crease
                let dir = planes[0].cross(&planes[1]);
                let dir = dir.try_normalize(f32::EPSILON).unwrap_or_else(Vector3::zeros);
                dir * dir.dot(&mover.velocity)
            }
            None => {
                mover.velocity = Vector3::zeros();
                break;
            }
        };

        // Turned back on ourselves, so stop before we start oscillating
        if mover.velocity.dot(&primal_velocity) <= 0.0 {
            mover.velocity = Vector3::zeros();
            break;
        }
    }

    blocked
}

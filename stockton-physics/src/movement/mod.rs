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

//! Moving players around, one fixed tick at a time.
//!
//! Each tick: check for ground, apply friction, accelerate towards what the
//! mover wants to do, apply gravity, then move, sliding along walls and
//! climbing steps. Finally check for ground again.

use log::trace;
use stockton_levels::prelude::*;
use stockton_levels::Vector3;

use crate::trace::{TraceResult, Tracer};

mod mover;
mod params;
mod slide;

pub use mover::{angle_vectors, MoveCommand, MoveMode, Mover};
pub use params::{MovementParams, MovementParamsBuilder};
pub use slide::{clip_velocity, slide_move, BlockedFlags, MAX_BUMPS, MAX_CLIP_PLANES, STOP_EPSILON};

/// Below this horizontal speed, friction just stops the mover.
const MIN_SPEED: f32 = 1.0;

/// How far ahead to look for a ledge.
const EDGE_LOOKAHEAD: f32 = 16.0;

/// How far below the feet a ledge has to drop to count.
const EDGE_DROP: f32 = 34.0;

/// Advance `mover` by `dt` seconds through `level`.
pub fn step_movement<L: MinCollisionFeatures + ?Sized>(
    level: &L,
    mover: &mut Mover,
    params: &MovementParams,
    dt: f32,
) {
    step_movement_with(&mut Tracer::new(level), mover, params, dt)
}

/// [`step_movement`], reusing an existing tracer.
pub fn step_movement_with<L: MinCollisionFeatures + ?Sized>(
    tracer: &mut Tracer<'_, L>,
    mover: &mut Mover,
    params: &MovementParams,
    dt: f32,
) {
    let (forward, right, up) = angle_vectors(&mover.angles);

    mover.on_ground = check_ground(tracer, mover, params);
    apply_friction(tracer, mover, params, dt);

    match mover.mode {
        MoveMode::Walk => walk_move(tracer, mover, params, dt, forward, right),
        MoveMode::Fly => fly_move(tracer, mover, params, dt, forward, right, up),
    }

    mover.on_ground = check_ground(tracer, mover, params);

    trace!(
        "Moved to {:?}, velocity {:?}, on ground: {}",
        mover.origin,
        mover.velocity,
        mover.on_ground
    );
}

/// Whether there's walkable ground just below the mover.
fn check_ground<L: MinCollisionFeatures + ?Sized>(
    tracer: &mut Tracer<'_, L>,
    mover: &Mover,
    params: &MovementParams,
) -> bool {
    // Just jumped or got launched
    if mover.velocity.z > params.ground_release_speed {
        return false;
    }

    let end = mover.origin - Vector3::new(0.0, 0.0, params.ground_probe);
    let res = tracer.trace(&mover.origin, &end, &mover.mins, &mover.maxs);

    res.hit() && res.normal_z() >= params.min_ground_normal
}

fn apply_friction<L: MinCollisionFeatures + ?Sized>(
    tracer: &mut Tracer<'_, L>,
    mover: &mut Mover,
    params: &MovementParams,
    dt: f32,
) {
    let flying = mover.mode == MoveMode::Fly;
    let speed = if flying {
        mover.velocity.norm()
    } else {
        mover.horizontal_speed()
    };

    if speed < MIN_SPEED {
        if flying {
            mover.velocity = Vector3::zeros();
        } else {
            mover.velocity.x = 0.0;
            mover.velocity.y = 0.0;
        }
        return;
    }

    if !flying && !mover.on_ground {
        return;
    }

    // Nothing's pushing, so don't creep to a halt
    if !flying && mover.cmd.is_idle() && speed < params.stop_speed {
        mover.velocity.x = 0.0;
        mover.velocity.y = 0.0;
        return;
    }

    let mut friction = params.friction;
    if mover.on_ground && !ground_ahead(tracer, mover) {
        friction *= params.edge_friction;
    }

    let control = speed.max(params.stop_speed);
    let new_speed = (speed - control * friction * dt).max(0.0);
    let scale = new_speed / speed;

    if flying {
        mover.velocity *= scale;
    } else {
        mover.velocity.x *= scale;
        mover.velocity.y *= scale;
    }
}

/// Whether there's anything to stand on a little way ahead of the mover's feet.
fn ground_ahead<L: MinCollisionFeatures + ?Sized>(
    tracer: &mut Tracer<'_, L>,
    mover: &Mover,
) -> bool {
    let dir = flatten(mover.velocity);
    let start = Vector3::new(
        mover.origin.x + dir.x * EDGE_LOOKAHEAD,
        mover.origin.y + dir.y * EDGE_LOOKAHEAD,
        mover.origin.z + mover.mins.z,
    );
    let end = start - Vector3::new(0.0, 0.0, EDGE_DROP);

    tracer
        .trace(&start, &end, &Vector3::zeros(), &Vector3::zeros())
        .hit()
}

/// Add velocity along `wish_dir` until it reaches `wish_speed`, by at most
/// `accel * dt * wish_speed`.
fn accelerate(mover: &mut Mover, wish_dir: &Vector3, wish_speed: f32, accel: f32, dt: f32) {
    let add_speed = wish_speed - mover.velocity.dot(wish_dir);
    if add_speed <= 0.0 {
        return;
    }

    let accel_speed = (accel * dt * wish_speed).min(add_speed);
    mover.velocity += wish_dir * accel_speed;
}

/// Like [`accelerate`], but only up to `air_speed_cap` along `wish_dir`.
fn air_accelerate(
    mover: &mut Mover,
    params: &MovementParams,
    wish_dir: &Vector3,
    wish_speed: f32,
    dt: f32,
) {
    let capped = wish_speed.min(params.air_speed_cap);
    let add_speed = capped - mover.velocity.dot(wish_dir);
    if add_speed <= 0.0 {
        return;
    }

    let accel_speed = (params.air_accelerate * dt * wish_speed).min(add_speed);
    mover.velocity += wish_dir * accel_speed;
}

/// Direction and speed of `wish_vel`, with the speed clamped to `max_speed`.
fn wish(wish_vel: Vector3, max_speed: f32) -> (Vector3, f32) {
    let speed = wish_vel.norm();
    if speed == 0.0 {
        return (Vector3::zeros(), 0.0);
    }

    (wish_vel / speed, speed.min(max_speed))
}

fn flatten(v: Vector3) -> Vector3 {
    Vector3::new(v.x, v.y, 0.0)
        .try_normalize(f32::EPSILON)
        .unwrap_or_else(Vector3::zeros)
}

fn walk_move<L: MinCollisionFeatures + ?Sized>(
    tracer: &mut Tracer<'_, L>,
    mover: &mut Mover,
    params: &MovementParams,
    dt: f32,
    forward: Vector3,
    right: Vector3,
) {
    let wish_vel = flatten(forward) * mover.cmd.forward + flatten(right) * mover.cmd.side;
    let (wish_dir, wish_speed) = wish(wish_vel, params.max_speed);
    let gravity = params.entity_gravity * params.gravity * dt;

    if mover.on_ground {
        mover.velocity.z = 0.0;
        accelerate(mover, &wish_dir, wish_speed, params.accelerate, dt);
        mover.velocity.z -= gravity;
        ground_move(tracer, mover, params, dt);
    } else {
        air_accelerate(mover, params, &wish_dir, wish_speed, dt);
        mover.velocity.z -= gravity;
        slide_move(tracer, mover, params, dt);
    }
}

fn fly_move<L: MinCollisionFeatures + ?Sized>(
    tracer: &mut Tracer<'_, L>,
    mover: &mut Mover,
    params: &MovementParams,
    dt: f32,
    forward: Vector3,
    right: Vector3,
    up: Vector3,
) {
    let cmd = mover.cmd;
    let wish_vel = forward * cmd.forward + right * cmd.side + up * cmd.up;
    let (wish_dir, wish_speed) = wish(wish_vel, params.spectator_max_speed);

    accelerate(mover, &wish_dir, wish_speed, params.accelerate, dt);
    slide_move(tracer, mover, params, dt);
}

/// Move along the ground, climbing anything up to `step_height` tall.
fn ground_move<L: MinCollisionFeatures + ?Sized>(
    tracer: &mut Tracer<'_, L>,
    mover: &mut Mover,
    params: &MovementParams,
    dt: f32,
) {
    mover.velocity.z = 0.0;
    if mover.velocity.x == 0.0 && mover.velocity.y == 0.0 {
        return;
    }

    // Try going straight there first
    let dest = mover.origin + mover.velocity * dt;
    let direct = tracer.trace(&mover.origin, &dest, &mover.mins, &mover.maxs);
    if !direct.hit() {
        mover.origin = direct.end_pos;
        return;
    }

    let original_origin = mover.origin;
    let original_velocity = mover.velocity;

    // Slide along whatever's in the way
    slide_move(tracer, mover, params, dt);
    let down_origin = mover.origin;
    let down_velocity = mover.velocity;

    // Or step up, slide, then step back down
    mover.origin = original_origin;
    mover.velocity = original_velocity;

    let step_up = mover.origin + Vector3::new(0.0, 0.0, params.step_height);
    let res = tracer.trace(&mover.origin, &step_up, &mover.mins, &mover.maxs);
    if !res.start_solid && !res.all_solid {
        mover.origin = res.end_pos;
    }

    slide_move(tracer, mover, params, dt);

    let step_down = mover.origin - Vector3::new(0.0, 0.0, params.step_height);
    let res = tracer.trace(&mover.origin, &step_down, &mover.mins, &mover.maxs);
    if !landed(&res, params) {
        mover.origin = down_origin;
        mover.velocity = down_velocity;
        return;
    }

    if !res.start_solid && !res.all_solid {
        mover.origin = res.end_pos;
    }

    let down_dist = (down_origin - original_origin).xy().norm_squared();
    let up_dist = (mover.origin - original_origin).xy().norm_squared();

    if down_dist > up_dist {
        mover.origin = down_origin;
        mover.velocity = down_velocity;
    } else {
        mover.velocity.z = down_velocity.z;
    }
}

/// Whether a downwards trace ended on something walkable.
fn landed(res: &TraceResult, params: &MovementParams) -> bool {
    res.hit() && res.normal_z() >= params.min_ground_normal
}

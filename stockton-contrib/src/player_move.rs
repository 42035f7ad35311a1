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

use legion::system;
use stockton_levels::CollisionLevel;
use stockton_physics::movement::step_movement_with;
use stockton_physics::{MovementParams, Mover, Tracer};

use crate::delta_time::FixedTicks;

/// Run every due tick of movement for each mover.
#[system(for_each)]
pub fn player_move(
    #[resource] level: &CollisionLevel,
    #[resource] params: &MovementParams,
    #[resource] ticks: &FixedTicks,
    mover: &mut Mover,
) {
    if ticks.ticks == 0 {
        return;
    }

    let mut tracer = Tracer::new(level);
    for _ in 0..ticks.ticks {
        step_movement_with(&mut tracer, mover, params, ticks.tick_length);
    }
}

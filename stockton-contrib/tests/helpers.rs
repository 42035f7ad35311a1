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

#![allow(dead_code)]

use simplelog::{Config, LevelFilter, TestLogger};
use stockton_contrib::player_move::player_move_system;
use stockton_contrib::Session;
use stockton_levels::{BoxLevelBuilder, Vector3};
use stockton_physics::MovementParams;

pub const TICK: f32 = 1.0 / 60.0;

pub fn init_logging() {
    let _ = TestLogger::init(LevelFilter::Debug, Config::default());
}

/// A session over a big floor with its top at z = 0, stepped by hand.
pub fn floor_session() -> Session {
    init_logging();

    let level = BoxLevelBuilder::new()
        .solid(
            Vector3::new(-1024.0, -1024.0, -64.0),
            Vector3::new(1024.0, 1024.0, 0.0),
        )
        .build()
        .unwrap();

    Session::new(level, MovementParams::default(), TICK, |schedule| {
        schedule.add_system(player_move_system());
    })
}

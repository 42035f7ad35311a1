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

//! Collision queries and movement for things moving around a level.
//!
//! [`trace()`] sweeps a box through a level's BSP tree and reports how far it
//! got. [`movement`] uses that to move players around each tick: friction,
//! acceleration, gravity, climbing steps and sliding along walls.

#[macro_use]
extern crate bitflags;

#[macro_use]
extern crate derive_builder;

pub mod movement;
pub mod trace;

pub use movement::{step_movement, MoveCommand, MoveMode, Mover, MovementParams};
pub use trace::{trace, TraceResult, Tracer};

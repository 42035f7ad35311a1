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

//! Glue for running stockton physics inside a legion ECS.
//!
//! Frame timing turns into a whole number of fixed ticks, and each tick every
//! [`Mover`](stockton_physics::Mover) component gets one movement step.

#[cfg(feature = "delta_time")]
pub mod delta_time;

#[cfg(feature = "player_move")]
pub mod player_move;

#[cfg(feature = "player_move")]
pub mod session;

#[cfg(feature = "player_move")]
pub use session::Session;

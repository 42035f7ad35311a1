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

//! Collision data for levels: half-space planes, the BSP tree over them, and
//! the convex brushes the tree's leaves reference.
//!
//! Levels are built once, from flat arrays handed over by a map loader
//! (see [`lumps`]), validated at that boundary, and read-only afterwards.

extern crate nalgebra as na;

#[macro_use]
extern crate bitflags;

pub mod builder;
pub mod level;
pub mod lumps;
pub mod prelude;
pub mod traits;
pub mod types;

pub use builder::BoxLevelBuilder;
pub use level::CollisionLevel;

/// Alias for convenience
pub type Vector3 = na::Vector3<f32>;

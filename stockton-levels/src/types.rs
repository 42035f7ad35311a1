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

//! Error types

use thiserror::Error;

/// An error encountered while turning raw level records into a `CollisionLevel`.
/// Each variant carries the index of the offending record.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LevelError {
    #[error("Level has no leafs")]
    Empty,

    #[error("Plane {0} has a non-unit normal or a non-finite distance")]
    DenormalPlane(usize),

    #[error("Node {node} references plane {plane}, which doesn't exist")]
    NodePlane { node: usize, plane: i32 },

    #[error("Node {node} has child {child}, which doesn't exist")]
    NodeChild { node: usize, child: i32 },

    #[error("Node {0} is reachable more than once from the root")]
    NodeRevisited(usize),

    #[error("Leaf {0} has an invalid leaf-brush range")]
    LeafBrushRange(usize),

    #[error("Leaf brush {index} references brush {brush}, which doesn't exist")]
    LeafBrush { index: usize, brush: i32 },

    #[error("Brush {0} has an invalid brush-side range")]
    BrushSideRange(usize),

    #[error("Brush {brush} references texture {texture}, which doesn't exist")]
    BrushTexture { brush: usize, texture: i32 },

    #[error("Brush side {side} references plane {plane}, which doesn't exist")]
    SidePlane { side: usize, plane: i32 },

    #[error("Box {0} has a minimum greater than its maximum")]
    InvertedBox(usize),
}

/// Standard result type.
pub type Result<T> = std::result::Result<T, LevelError>;

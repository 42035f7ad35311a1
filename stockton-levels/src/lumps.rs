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

//! Raw records, as a map loader hands them over.
//!
//! These mirror the on-disk lumps of a Q3 bsp: indices are still signed,
//! child references still use the negative-leaf encoding, and nothing has
//! been checked yet. `CollisionLevel::from_lumps` does the checking.

use crate::traits::planes::Plane;

/// Found at lump index 3 in a q3 bsp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawNode {
    pub plane: i32,

    /// Front, back. Negative values are leafs, stored as `-(leaf + 1)`.
    pub children: [i32; 2],
}

/// Found at lump index 4 in a q3 bsp. Bounds and area are left out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawLeaf {
    /// Negative for leafs outside the level or inside solid.
    pub cluster: i32,
    pub first_leaf_face: i32,
    pub num_leaf_faces: i32,
    pub first_leaf_brush: i32,
    pub num_leaf_brushes: i32,
}

/// Found at lump index 8 in a q3 bsp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawBrush {
    pub first_side: i32,
    pub num_sides: i32,
    pub texture: i32,
}

/// Found at lump index 9 in a q3 bsp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawBrushSide {
    pub plane: i32,
    pub texture: i32,
}

/// All the arrays a level's collision data is made from.
#[derive(Debug, Clone, Copy)]
pub struct LevelLumps<'a> {
    pub planes: &'a [Plane],
    pub nodes: &'a [RawNode],
    pub leafs: &'a [RawLeaf],

    /// Brush indices, referenced by ranges in `leafs`.
    pub leaf_brushes: &'a [i32],
    pub brushes: &'a [RawBrush],
    pub brush_sides: &'a [RawBrushSide],

    /// The contents flags of each texture, in texture order.
    pub texture_contents: &'a [u32],
}

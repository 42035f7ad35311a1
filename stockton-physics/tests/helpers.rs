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

//! Levels and checks shared by the integration tests.

#![allow(dead_code)]

use stockton_levels::lumps::*;
use stockton_levels::traits::brushes::ContentsFlags;
use stockton_levels::traits::planes::Plane;
use stockton_levels::{BoxLevelBuilder, CollisionLevel, Vector3};

/// Height a standing player's origin rests at above a floor at z = 0.
pub const PLAYER_REST_Z: f32 = 24.125;

pub fn v(x: f32, y: f32, z: f32) -> Vector3 {
    Vector3::new(x, y, z)
}

pub fn assert_close(actual: f32, expected: f32, epsilon: f32) {
    assert!(
        (actual - expected).abs() <= epsilon,
        "expected {} to be within {} of {}",
        actual,
        epsilon,
        expected
    );
}

/// A big floor with its top at z = 0.
pub fn floor() -> BoxLevelBuilder {
    BoxLevelBuilder::new().solid(v(-1024.0, -1024.0, -64.0), v(1024.0, 1024.0, 0.0))
}

/// A slab occupying z in [-50, 50].
pub fn slab_level() -> CollisionLevel {
    BoxLevelBuilder::new()
        .solid(v(-1000.0, -1000.0, -50.0), v(1000.0, 1000.0, 50.0))
        .build()
        .unwrap()
}

/// A floor, with a wall whose face is at x = 64.
pub fn wall_level() -> CollisionLevel {
    floor()
        .solid(v(64.0, -1024.0, 0.0), v(128.0, 1024.0, 256.0))
        .build()
        .unwrap()
}

/// A floor, with walls facing -x at x = 64 and -y at y = 64.
pub fn corner_level() -> CollisionLevel {
    floor()
        .solid(v(64.0, -1024.0, 0.0), v(128.0, 1024.0, 128.0))
        .solid(v(-1024.0, 64.0, 0.0), v(1024.0, 128.0, 128.0))
        .build()
        .unwrap()
}

/// A floor, with a raised platform from x = 64 onwards.
pub fn step_level(height: f32) -> CollisionLevel {
    floor()
        .solid(v(64.0, -1024.0, 0.0), v(1024.0, 1024.0, height))
        .build()
        .unwrap()
}

/// A wedge whose top is the plane z = x, in a tree that's just one leaf.
pub fn wedge_level() -> CollisionLevel {
    let slope = Vector3::new(-1.0, 0.0, 1.0).normalize();
    let planes = [
        Plane::new(slope, 0.0),
        Plane::new(v(0.0, 0.0, -1.0), 100.0),
        Plane::new(v(1.0, 0.0, 0.0), 1000.0),
        Plane::new(v(0.0, 1.0, 0.0), 1000.0),
        Plane::new(v(0.0, -1.0, 0.0), 1000.0),
    ];
    let brush_sides: Vec<_> = (0..planes.len() as i32)
        .map(|plane| RawBrushSide { plane, texture: 0 })
        .collect();

    CollisionLevel::from_lumps(LevelLumps {
        planes: &planes,
        nodes: &[],
        leafs: &[RawLeaf {
            cluster: 0,
            first_leaf_face: 0,
            num_leaf_faces: 0,
            first_leaf_brush: 0,
            num_leaf_brushes: 1,
        }],
        leaf_brushes: &[0],
        brushes: &[RawBrush {
            first_side: 0,
            num_sides: brush_sides.len() as i32,
            texture: 0,
        }],
        brush_sides: &brush_sides,
        texture_contents: &[ContentsFlags::SOLID.bits()],
    })
    .unwrap()
}

/// A slab occupying z in [-50, 0], under a root node whose plane faces down.
pub fn downward_node_level() -> CollisionLevel {
    let planes = [
        Plane::new(v(0.0, 0.0, -1.0), 0.0),
        Plane::new(v(0.0, 0.0, 1.0), 0.0),
        Plane::new(v(0.0, 0.0, -1.0), 50.0),
        Plane::new(v(1.0, 0.0, 0.0), 1000.0),
        Plane::new(v(-1.0, 0.0, 0.0), 1000.0),
        Plane::new(v(0.0, 1.0, 0.0), 1000.0),
        Plane::new(v(0.0, -1.0, 0.0), 1000.0),
    ];
    let brush_sides: Vec<_> = (1..planes.len() as i32)
        .map(|plane| RawBrushSide { plane, texture: 0 })
        .collect();

    let empty = RawLeaf {
        cluster: 0,
        first_leaf_face: 0,
        num_leaf_faces: 0,
        first_leaf_brush: 0,
        num_leaf_brushes: 0,
    };
    let solid = RawLeaf {
        cluster: -1,
        num_leaf_brushes: 1,
        ..empty
    };

    CollisionLevel::from_lumps(LevelLumps {
        planes: &planes,
        // Below the plane is in front
        nodes: &[RawNode {
            plane: 0,
            children: [-2, -1],
        }],
        leafs: &[empty, solid],
        leaf_brushes: &[0],
        brushes: &[RawBrush {
            first_side: 0,
            num_sides: brush_sides.len() as i32,
            texture: 0,
        }],
        brush_sides: &brush_sides,
        texture_contents: &[ContentsFlags::SOLID.bits()],
    })
    .unwrap()
}

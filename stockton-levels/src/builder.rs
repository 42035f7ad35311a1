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

//! Compiles a set of axis-aligned boxes into a level.
//!
//! Useful for procedurally generated levels and for test fixtures. The tree is
//! split along box faces until no face lies strictly inside a leaf's region, so
//! each leaf is either wholly inside some boxes or wholly outside them.

use log::{debug, warn};

use crate::level::CollisionLevel;
use crate::lumps::*;
use crate::traits::brushes::ContentsFlags;
use crate::traits::planes::Plane;
use crate::types::{LevelError, Result};
use crate::Vector3;

/// Half the width of the region the tree covers.
const WORLD_EXTENT: f32 = 65536.0;

/// Deepest the compiled tree is allowed to get.
const MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq)]
struct BoxBrush {
    mins: Vector3,
    maxs: Vector3,
    contents: ContentsFlags,
}

impl BoxBrush {
    fn contains_region(&self, mins: &Vector3, maxs: &Vector3) -> bool {
        (0..3).all(|i| self.mins[i] <= mins[i] && self.maxs[i] >= maxs[i])
    }
}

/// Builds a [`CollisionLevel`] out of boxes.
///
/// ```
/// use stockton_levels::{BoxLevelBuilder, Vector3};
/// use stockton_levels::prelude::*;
///
/// let level = BoxLevelBuilder::new()
///     .solid(Vector3::new(-512.0, -512.0, -16.0), Vector3::new(512.0, 512.0, 0.0))
///     .build()
///     .unwrap();
///
/// assert!(level.cluster_for_point(&Vector3::new(0.0, 0.0, -8.0)).is_none());
/// assert!(level.cluster_for_point(&Vector3::new(0.0, 0.0, 8.0)).is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct BoxLevelBuilder {
    boxes: Vec<BoxBrush>,
}

impl BoxLevelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a solid box.
    pub fn solid(self, mins: Vector3, maxs: Vector3) -> Self {
        self.with_contents(mins, maxs, ContentsFlags::SOLID)
    }

    /// Add a box with the given contents.
    pub fn with_contents(mut self, mins: Vector3, maxs: Vector3, contents: ContentsFlags) -> Self {
        self.boxes.push(BoxBrush {
            mins,
            maxs,
            contents,
        });
        self
    }

    pub fn build(&self) -> Result<CollisionLevel> {
        for (i, b) in self.boxes.iter().enumerate() {
            if (0..3).any(|axis| b.mins[axis] > b.maxs[axis]) {
                return Err(LevelError::InvertedBox(i));
            }
        }

        let mut out = Compiled::default();
        out.add_brushes(&self.boxes);

        let region = (
            Vector3::repeat(-WORLD_EXTENT),
            Vector3::repeat(WORLD_EXTENT),
        );
        let all: Vec<usize> = (0..self.boxes.len()).collect();
        let root = out.compile(&self.boxes, region, all, 0);

        // A tree that's just one leaf has no nodes at all
        debug_assert!(out.nodes.is_empty() || root == 0);

        debug!(
            "Compiled {} boxes into {} nodes and {} leafs",
            self.boxes.len(),
            out.nodes.len(),
            out.leafs.len()
        );

        CollisionLevel::from_lumps(LevelLumps {
            planes: &out.planes,
            nodes: &out.nodes,
            leafs: &out.leafs,
            leaf_brushes: &out.leaf_brushes,
            brushes: &out.brushes,
            brush_sides: &out.brush_sides,
            texture_contents: &out.texture_contents,
        })
    }
}

/// Raw records, before they're checked and turned into a level.
#[derive(Debug, Default)]
struct Compiled {
    planes: Vec<Plane>,
    nodes: Vec<RawNode>,
    leafs: Vec<RawLeaf>,
    leaf_brushes: Vec<i32>,
    brushes: Vec<RawBrush>,
    brush_sides: Vec<RawBrushSide>,
    texture_contents: Vec<u32>,
    next_cluster: i32,
}

impl Compiled {
    fn add_brushes(&mut self, boxes: &[BoxBrush]) {
        for b in boxes {
            let texture = self.texture_for(b.contents);
            let first_side = self.brush_sides.len() as i32;

            for axis in 0..3 {
                let mut normal = Vector3::zeros();

                normal[axis] = 1.0;
                self.push_side(Plane::new(normal, b.maxs[axis]), texture);

                normal[axis] = -1.0;
                self.push_side(Plane::new(normal, -b.mins[axis]), texture);
            }

            self.brushes.push(RawBrush {
                first_side,
                num_sides: 6,
                texture,
            });
        }
    }

    /// One texture per distinct set of contents.
    fn texture_for(&mut self, contents: ContentsFlags) -> i32 {
        let bits = contents.bits();
        match self.texture_contents.iter().position(|c| *c == bits) {
            Some(i) => i as i32,
            None => {
                self.texture_contents.push(bits);
                self.texture_contents.len() as i32 - 1
            }
        }
    }

    fn push_side(&mut self, plane: Plane, texture: i32) {
        self.brush_sides.push(RawBrushSide {
            plane: self.planes.len() as i32,
            texture,
        });
        self.planes.push(plane);
    }

    /// Compile the subtree covering `region`, returning its raw child reference.
    fn compile(
        &mut self,
        boxes: &[BoxBrush],
        region: (Vector3, Vector3),
        inside: Vec<usize>,
        depth: usize,
    ) -> i32 {
        let (mins, maxs) = region;
        let split = find_split(boxes, &inside, &mins, &maxs);

        let (axis, dist) = match split {
            Some(_) if depth >= MAX_DEPTH => {
                warn!("Box level is deeper than {}, making a leaf early", MAX_DEPTH);
                return self.push_leaf(boxes, &mins, &maxs, &inside);
            }
            Some(split) => split,
            None => return self.push_leaf(boxes, &mins, &maxs, &inside),
        };

        // Reserve our slot before the children take theirs, so the root is 0
        let node_idx = self.nodes.len();
        let mut normal = Vector3::zeros();
        normal[axis] = 1.0;
        self.nodes.push(RawNode {
            plane: self.planes.len() as i32,
            children: [0, 0],
        });
        self.planes.push(Plane::new(normal, dist));

        let (front, back): (Vec<usize>, Vec<usize>) = (
            inside
                .iter()
                .copied()
                .filter(|&i| boxes[i].maxs[axis] >= dist)
                .collect(),
            inside
                .iter()
                .copied()
                .filter(|&i| boxes[i].mins[axis] <= dist)
                .collect(),
        );

        let mut front_mins = mins;
        front_mins[axis] = dist;
        let mut back_maxs = maxs;
        back_maxs[axis] = dist;

        let front = self.compile(boxes, (front_mins, maxs), front, depth + 1);
        let back = self.compile(boxes, (mins, back_maxs), back, depth + 1);
        self.nodes[node_idx].children = [front, back];

        node_idx as i32
    }

    fn push_leaf(
        &mut self,
        boxes: &[BoxBrush],
        mins: &Vector3,
        maxs: &Vector3,
        inside: &[usize],
    ) -> i32 {
        let in_solid = inside.iter().any(|&i| {
            boxes[i].contents.contains(ContentsFlags::SOLID) && boxes[i].contains_region(mins, maxs)
        });

        let cluster = if in_solid {
            -1
        } else {
            self.next_cluster += 1;
            self.next_cluster - 1
        };

        self.leafs.push(RawLeaf {
            cluster,
            first_leaf_face: 0,
            num_leaf_faces: 0,
            first_leaf_brush: self.leaf_brushes.len() as i32,
            num_leaf_brushes: inside.len() as i32,
        });
        self.leaf_brushes.extend(inside.iter().map(|&i| i as i32));

        -(self.leafs.len() as i32)
    }
}

/// The first box face lying strictly inside the region, as `(axis, dist)`.
fn find_split(
    boxes: &[BoxBrush],
    inside: &[usize],
    mins: &Vector3,
    maxs: &Vector3,
) -> Option<(usize, f32)> {
    for &i in inside {
        let b = &boxes[i];
        for axis in 0..3 {
            for &c in &[b.mins[axis], b.maxs[axis]] {
                if c > mins[axis] && c < maxs[axis] {
                    return Some((axis, c));
                }
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;
    use crate::traits::tree::NodeRef;

    fn v(x: f32, y: f32, z: f32) -> Vector3 {
        Vector3::new(x, y, z)
    }

    #[test]
    fn empty_level_is_one_leaf() {
        let level = BoxLevelBuilder::new().build().unwrap();

        assert_eq!(level.root(), NodeRef::Leaf(0));
        assert!(level.brushes().is_empty());
        assert_eq!(level.cluster_for_point(&v(0.0, 0.0, 0.0)), Some(0));
    }

    #[test]
    fn single_box() {
        let level = BoxLevelBuilder::new()
            .solid(v(-10.0, -10.0, -10.0), v(10.0, 10.0, 10.0))
            .build()
            .unwrap();

        assert_eq!(level.root(), NodeRef::Node(0));
        assert_eq!(level.brushes().len(), 1);

        let brush = level.get_brush(0);
        assert_eq!(brush.sides.len(), 6);
        for side in brush.sides.iter() {
            // Every corner of the box is on or behind every side
            let plane = level.get_plane(side.plane_idx);
            assert!(plane.distance_to(&v(10.0, -10.0, 10.0)) <= 0.0);
            assert!(plane.distance_to(&v(-10.0, 10.0, -10.0)) <= 0.0);
        }

        assert_eq!(level.cluster_for_point(&v(0.0, 0.0, 0.0)), None);
        assert!(level.cluster_for_point(&v(0.0, 0.0, 20.0)).is_some());
        assert!(level.cluster_for_point(&v(-30.0, 0.0, 0.0)).is_some());

        let inside = level.leaf_for_point(&v(1.0, 2.0, 3.0));
        assert_eq!(&*inside.brushes_idx, &[0]);
    }

    #[test]
    fn every_leaf_reachable() {
        let level = BoxLevelBuilder::new()
            .solid(v(-100.0, -100.0, -10.0), v(100.0, 100.0, 0.0))
            .solid(v(0.0, -100.0, 0.0), v(10.0, 100.0, 50.0))
            .solid(v(50.0, 50.0, 0.0), v(60.0, 60.0, 8.0))
            .build()
            .unwrap();

        let mut stack = vec![level.root()];
        let mut leafs = 0;
        while let Some(node) = stack.pop() {
            match node {
                NodeRef::Leaf(_) => leafs += 1,
                NodeRef::Node(i) => stack.extend_from_slice(&level.get_node(i).children),
            }
        }

        assert_eq!(leafs, level.leafs_len());
        assert_eq!(level.nodes_len() + 1, level.leafs_len());
    }

    #[test]
    fn non_solid_contents() {
        let level = BoxLevelBuilder::new()
            .with_contents(v(0.0, 0.0, 0.0), v(8.0, 8.0, 8.0), ContentsFlags::TRIGGER)
            .solid(v(20.0, 0.0, 0.0), v(28.0, 8.0, 8.0))
            .build()
            .unwrap();

        assert_eq!(level.get_brush(0).contents, ContentsFlags::TRIGGER);
        assert!(!level.get_brush(0).contents.blocks_movement());
        assert_ne!(level.get_brush(0).texture_idx, level.get_brush(1).texture_idx);

        // A trigger doesn't make its leaf solid
        assert!(level.cluster_for_point(&v(4.0, 4.0, 4.0)).is_some());
        assert!(level.cluster_for_point(&v(24.0, 4.0, 4.0)).is_none());
    }

    #[test]
    fn rejects_inverted_box() {
        let err = BoxLevelBuilder::new()
            .solid(v(0.0, 0.0, 0.0), v(1.0, 1.0, 1.0))
            .solid(v(0.0, 5.0, 0.0), v(1.0, 1.0, 1.0))
            .build()
            .unwrap_err();

        assert_eq!(err, LevelError::InvertedBox(1));
    }
}

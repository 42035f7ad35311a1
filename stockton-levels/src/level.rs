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

//! A level's collision data, checked and decoded from raw records

use log::{debug, warn};
use std::ops::Range;

use crate::lumps::*;
use crate::traits::brushes::*;
use crate::traits::planes::*;
use crate::traits::tree::*;
use crate::types::{LevelError, Result};

/// How far a plane normal's length may stray from 1.
const NORMAL_TOLERANCE: f32 = 0.001;

/// Planes, BSP tree and brushes for one level.
/// Immutable once built, so it can be shared between threads freely.
#[derive(Debug, Clone)]
pub struct CollisionLevel {
    pub(crate) planes: Box<[Plane]>,
    pub(crate) nodes: Box<[BspNode]>,
    pub(crate) leafs: Box<[BspLeaf]>,
    pub(crate) brushes: Box<[Brush]>,
}

impl CollisionLevel {
    /// Check `lumps` for anything that would send a tree walk out of bounds or
    /// round in circles, and decode it.
    pub fn from_lumps(lumps: LevelLumps<'_>) -> Result<CollisionLevel> {
        if lumps.leafs.is_empty() {
            return Err(LevelError::Empty);
        }

        let planes = check_planes(lumps.planes)?;
        let nodes = nodes_from_raw(lumps.nodes, planes.len(), lumps.leafs.len())?;
        let leafs = leafs_from_raw(lumps.leafs, lumps.leaf_brushes, lumps.brushes.len())?;
        let brushes = brushes_from_raw(
            lumps.brushes,
            lumps.brush_sides,
            lumps.texture_contents,
            planes.len(),
        )?;

        let level = CollisionLevel {
            planes,
            nodes,
            leafs,
            brushes,
        };
        level.check_tree()?;

        debug!(
            "Loaded collision level: {} planes, {} nodes, {} leafs, {} brushes",
            level.planes.len(),
            level.nodes.len(),
            level.leafs.len(),
            level.brushes.len()
        );

        Ok(level)
    }

    pub fn nodes_len(&self) -> usize {
        self.nodes.len()
    }

    pub fn leafs_len(&self) -> usize {
        self.leafs.len()
    }

    /// Walk the whole tree from the root, making sure no node is reached twice.
    /// A node reached twice means a cycle or a shared subtree.
    fn check_tree(&self) -> Result<()> {
        let mut seen_nodes = vec![false; self.nodes.len()];
        let mut seen_leafs = vec![false; self.leafs.len()];
        let mut stack = vec![self.root()];

        while let Some(node) = stack.pop() {
            match node {
                NodeRef::Leaf(idx) => seen_leafs[idx as usize] = true,
                NodeRef::Node(idx) => {
                    let seen = &mut seen_nodes[idx as usize];
                    if *seen {
                        return Err(LevelError::NodeRevisited(idx as usize));
                    }
                    *seen = true;

                    stack.extend_from_slice(&self.nodes[idx as usize].children);
                }
            }
        }

        let unreachable = seen_leafs.iter().filter(|seen| !**seen).count();
        if unreachable > 0 {
            warn!("{} leafs can't be reached from the root", unreachable);
        }

        Ok(())
    }
}

fn check_planes(planes: &[Plane]) -> Result<Box<[Plane]>> {
    for (i, plane) in planes.iter().enumerate() {
        // Written so NaNs fail too
        let unit = (plane.normal.norm() - 1.0).abs() <= NORMAL_TOLERANCE;
        if !unit || !plane.dist.is_finite() {
            return Err(LevelError::DenormalPlane(i));
        }
    }

    Ok(planes.into())
}

fn nodes_from_raw(raw: &[RawNode], n_planes: usize, n_leafs: usize) -> Result<Box<[BspNode]>> {
    let mut nodes = Vec::with_capacity(raw.len());
    for (i, node) in raw.iter().enumerate() {
        if node.plane < 0 || node.plane as usize >= n_planes {
            return Err(LevelError::NodePlane {
                node: i,
                plane: node.plane,
            });
        }

        let mut children = [NodeRef::Leaf(0); 2];
        for (child, &raw_child) in children.iter_mut().zip(node.children.iter()) {
            *child = NodeRef::from_raw(raw_child);
            let valid = match *child {
                NodeRef::Node(idx) => (idx as usize) < raw.len(),
                NodeRef::Leaf(idx) => (idx as usize) < n_leafs,
            };

            if !valid {
                return Err(LevelError::NodeChild {
                    node: i,
                    child: raw_child,
                });
            }
        }

        nodes.push(BspNode {
            plane_idx: node.plane as u32,
            children,
        });
    }

    Ok(nodes.into_boxed_slice())
}

fn leafs_from_raw(
    raw: &[RawLeaf],
    leaf_brushes: &[i32],
    n_brushes: usize,
) -> Result<Box<[BspLeaf]>> {
    let mut leafs = Vec::with_capacity(raw.len());
    for (i, leaf) in raw.iter().enumerate() {
        let range = checked_range(leaf.first_leaf_brush, leaf.num_leaf_brushes, leaf_brushes.len())
            .ok_or(LevelError::LeafBrushRange(i))?;

        let mut brushes_idx = Vec::with_capacity(range.len());
        for index in range {
            let brush = leaf_brushes[index];
            if brush < 0 || brush as usize >= n_brushes {
                return Err(LevelError::LeafBrush { index, brush });
            }

            brushes_idx.push(brush as u32);
        }

        let faces_start = leaf.first_leaf_face.max(0) as u32;
        let faces_len = leaf.num_leaf_faces.max(0) as u32;

        leafs.push(BspLeaf {
            cluster_id: if leaf.cluster < 0 {
                None
            } else {
                Some(leaf.cluster as ClusterId)
            },
            faces_idx: faces_start..faces_start.saturating_add(faces_len),
            brushes_idx: brushes_idx.into_boxed_slice(),
        });
    }

    Ok(leafs.into_boxed_slice())
}

fn brushes_from_raw(
    raw: &[RawBrush],
    sides: &[RawBrushSide],
    texture_contents: &[u32],
    n_planes: usize,
) -> Result<Box<[Brush]>> {
    let mut brushes = Vec::with_capacity(raw.len());
    for (i, brush) in raw.iter().enumerate() {
        if brush.texture < 0 || brush.texture as usize >= texture_contents.len() {
            return Err(LevelError::BrushTexture {
                brush: i,
                texture: brush.texture,
            });
        }

        let range = checked_range(brush.first_side, brush.num_sides, sides.len())
            .ok_or(LevelError::BrushSideRange(i))?;

        let mut brush_sides = Vec::with_capacity(range.len());
        for side_idx in range {
            let side = &sides[side_idx];
            if side.plane < 0 || side.plane as usize >= n_planes {
                return Err(LevelError::SidePlane {
                    side: side_idx,
                    plane: side.plane,
                });
            }

            brush_sides.push(BrushSide {
                plane_idx: side.plane as u32,
                texture_idx: side.texture.max(0) as u32,
            });
        }

        brushes.push(Brush {
            sides: brush_sides.into_boxed_slice(),
            texture_idx: brush.texture as u32,
            contents: ContentsFlags::from_bits_truncate(texture_contents[brush.texture as usize]),
        });
    }

    Ok(brushes.into_boxed_slice())
}

/// `first..first + len`, if it's non-negative and fits in `available`.
fn checked_range(first: i32, len: i32, available: usize) -> Option<Range<usize>> {
    if first < 0 || len < 0 {
        return None;
    }

    let start = first as usize;
    let end = start.checked_add(len as usize)?;
    if end > available {
        return None;
    }

    Some(start..end)
}

impl HasPlanes for CollisionLevel {
    fn planes(&self) -> &[Plane] {
        &self.planes
    }
}

impl HasBspTree for CollisionLevel {
    fn root(&self) -> NodeRef {
        if self.nodes.is_empty() {
            NodeRef::Leaf(0)
        } else {
            NodeRef::Node(0)
        }
    }

    fn get_node(&self, idx: u32) -> &BspNode {
        &self.nodes[idx as usize]
    }

    fn get_leaf(&self, idx: u32) -> &BspLeaf {
        &self.leafs[idx as usize]
    }
}

impl HasBrushes for CollisionLevel {
    fn brushes(&self) -> &[Brush] {
        &self.brushes
    }
}

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

//! The BSP tree, and finding which leaf a point is in

use na::Vector3;
use std::ops::Range;

use super::HasPlanes;

pub type ClusterId = u32;

/// A reference to a child of a node.
/// On disk these are a single i32, with leafs stored as `-(leaf + 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRef {
    Node(u32),
    Leaf(u32),
}

impl NodeRef {
    /// Decode the on-disk child encoding.
    pub fn from_raw(raw: i32) -> NodeRef {
        if raw >= 0 {
            NodeRef::Node(raw as u32)
        } else {
            NodeRef::Leaf((-1 - raw) as u32)
        }
    }

    /// Encode back to the on-disk child encoding.
    pub fn to_raw(self) -> i32 {
        match self {
            NodeRef::Node(i) => i as i32,
            NodeRef::Leaf(i) => -1 - i as i32,
        }
    }
}

/// A node in a BSP tree.
#[derive(Debug, Clone, PartialEq)]
pub struct BspNode {
    pub plane_idx: u32,

    /// Front (on or in front of the plane), then back.
    pub children: [NodeRef; 2],
}

/// A leaf in a BSP tree.
#[derive(Debug, Clone, PartialEq)]
pub struct BspLeaf {
    /// Visibility cluster. `None` for leafs the camera can't be in.
    pub cluster_id: Option<ClusterId>,

    /// Range into the loader's leaf-face list. Only the renderer uses this.
    pub faces_idx: Range<u32>,

    /// Brushes that overlap this leaf.
    pub brushes_idx: Box<[u32]>,
}

pub trait HasBspTree: HasPlanes {
    fn root(&self) -> NodeRef;
    fn get_node(&self, idx: u32) -> &BspNode;
    fn get_leaf(&self, idx: u32) -> &BspLeaf;

    /// Index of the leaf `point` lies in.
    /// Every point is in some leaf, even ones outside the level.
    fn leaf_index_for_point(&self, point: &Vector3<f32>) -> u32 {
        let mut node = self.root();
        loop {
            match node {
                NodeRef::Leaf(idx) => return idx,
                NodeRef::Node(idx) => {
                    let node_data = self.get_node(idx);
                    let plane = self.get_plane(node_data.plane_idx);

                    node = if plane.distance_to(point) >= 0.0 {
                        node_data.children[0]
                    } else {
                        node_data.children[1]
                    };
                }
            }
        }
    }

    fn leaf_for_point(&self, point: &Vector3<f32>) -> &BspLeaf {
        self.get_leaf(self.leaf_index_for_point(point))
    }

    /// Get the viscluster `point` lies in
    fn cluster_for_point(&self, point: &Vector3<f32>) -> Option<ClusterId> {
        self.leaf_for_point(point).cluster_id
    }
}

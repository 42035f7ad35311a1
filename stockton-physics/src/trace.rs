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

//! Sweeping boxes through a level.
//!
//! Rather than testing the box against each brush directly, the box's extents
//! are pushed into each brush side's plane, so the box becomes a point and each
//! side becomes a slightly bigger half-space. Which corner of the box to push
//! by depends on which way the plane faces.

use stockton_levels::prelude::*;
use stockton_levels::traits::brushes::Brush;
use stockton_levels::traits::planes::Plane;
use stockton_levels::traits::tree::NodeRef;
use stockton_levels::Vector3;

/// How far traces stop short of the surface they hit.
pub const TRACE_EPSILON: f32 = 0.125;

/// How far either side of a non-axial node plane a box trace counts as touching it.
const NON_AXIAL_OFFSET: f32 = 2048.0;

/// The result of a trace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceResult {
    /// How much of the move could be made, from 0 to 1.
    pub fraction: f32,

    /// Where the box ended up. Exactly the requested end if nothing was hit.
    pub end_pos: Vector3,

    /// The surface that stopped the move. Only set if `fraction < 1`.
    pub plane: Option<Plane>,

    /// The box started inside a solid brush.
    pub start_solid: bool,

    /// The box never left solid at all.
    pub all_solid: bool,
}

impl TraceResult {
    /// Whether anything got in the way.
    #[inline]
    pub fn hit(&self) -> bool {
        self.fraction < 1.0
    }

    /// Z component of the blocking plane's normal, or 0 if nothing blocked.
    #[inline]
    pub fn normal_z(&self) -> f32 {
        self.plane.map(|p| p.normal.z).unwrap_or(0.0)
    }
}

/// Traces against one level, remembering which brushes were already tested
/// during the current trace.
///
/// Each tracer has its own bookkeeping, so any number of them can work on the
/// same level at once. Keep one around to avoid reallocating between traces.
pub struct Tracer<'l, L: ?Sized> {
    level: &'l L,

    /// The generation each brush was last tested in.
    checked: Vec<u32>,
    generation: u32,

    brush_tests: usize,
}

/// Per-trace state, threaded through the tree walk.
struct TraceWork {
    start: Vector3,
    end: Vector3,

    /// Corner of the box to test against a plane, indexed by the plane's sign bits.
    offsets: [Vector3; 8],
    extents: Vector3,
    is_point: bool,

    fraction: f32,
    plane: Option<Plane>,
    start_solid: bool,
    all_solid: bool,
}

impl<'l, L: MinCollisionFeatures + ?Sized> Tracer<'l, L> {
    pub fn new(level: &'l L) -> Self {
        Tracer {
            level,
            checked: vec![0; level.brushes().len()],
            generation: 0,
            brush_tests: 0,
        }
    }

    pub fn level(&self) -> &'l L {
        self.level
    }

    /// Number of brushes clipped against over this tracer's lifetime.
    pub fn brush_tests(&self) -> usize {
        self.brush_tests
    }

    /// Sweep the box `mins..maxs` (relative to its origin) from `start` to `end`.
    /// A zero-size box gives a point trace. If `start == end`, this just tests
    /// whether the box overlaps anything solid.
    pub fn trace(
        &mut self,
        start: &Vector3,
        end: &Vector3,
        mins: &Vector3,
        maxs: &Vector3,
    ) -> TraceResult {
        self.next_generation();

        // Centre the box on its origin, so extents are symmetric
        let centre = (mins + maxs) * 0.5;
        let size = [mins - centre, maxs - centre];

        let mut offsets = [Vector3::zeros(); 8];
        for (i, offset) in offsets.iter_mut().enumerate() {
            *offset = Vector3::new(
                size[i & 1].x,
                size[(i >> 1) & 1].y,
                size[(i >> 2) & 1].z,
            );
        }

        let is_point = size[0] == Vector3::zeros();
        let mut work = TraceWork {
            start: start + centre,
            end: end + centre,
            offsets,
            extents: if is_point { Vector3::zeros() } else { size[1] },
            is_point,
            fraction: 1.0,
            plane: None,
            start_solid: false,
            all_solid: false,
        };

        let (tstart, tend) = (work.start, work.end);
        self.recurse(&mut work, self.level.root(), 0.0, 1.0, tstart, tend);

        let fraction = work.fraction.max(0.0).min(1.0);
        TraceResult {
            fraction,
            end_pos: if fraction == 1.0 {
                *end
            } else {
                start + (end - start) * fraction
            },
            plane: if fraction < 1.0 { work.plane } else { None },
            start_solid: work.start_solid,
            all_solid: work.all_solid,
        }
    }

    fn next_generation(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Stale marks could now match, so forget them all
            self.checked.iter_mut().for_each(|c| *c = 0);
            self.generation = 1;
        }
    }

    /// Walk the part of the segment from `start_frac` to `end_frac` (`start` to `end`)
    /// through the subtree at `node`, nearest side first.
    fn recurse(
        &mut self,
        work: &mut TraceWork,
        node: NodeRef,
        start_frac: f32,
        end_frac: f32,
        start: Vector3,
        end: Vector3,
    ) {
        // Already hit something before this part of the segment
        if work.fraction <= start_frac {
            return;
        }

        let node_idx = match node {
            NodeRef::Leaf(idx) => return self.clip_leaf(work, idx),
            NodeRef::Node(idx) => idx,
        };

        let level = self.level;
        let node = level.get_node(node_idx);
        let plane = level.get_plane(node.plane_idx);

        let (dot1, dot2, offset) = match plane.axis() {
            Some(axis) => (
                start[axis] - plane.dist,
                end[axis] - plane.dist,
                work.extents[axis],
            ),
            None => (
                plane.distance_to(&start),
                plane.distance_to(&end),
                if work.is_point { 0.0 } else { NON_AXIAL_OFFSET },
            ),
        };

        if dot1 >= offset + 1.0 && dot2 >= offset + 1.0 {
            return self.recurse(work, node.children[0], start_frac, end_frac, start, end);
        }
        if dot1 < -offset - 1.0 && dot2 < -offset - 1.0 {
            return self.recurse(work, node.children[1], start_frac, end_frac, start, end);
        }

        // Split the segment where the box starts and stops touching the plane
        let (side, frac1, frac2) = if dot1 < dot2 {
            let idist = 1.0 / (dot1 - dot2);
            (
                1,
                (dot1 - offset + TRACE_EPSILON) * idist,
                (dot1 + offset + TRACE_EPSILON) * idist,
            )
        } else if dot1 > dot2 {
            let idist = 1.0 / (dot1 - dot2);
            (
                0,
                (dot1 + offset + TRACE_EPSILON) * idist,
                (dot1 - offset - TRACE_EPSILON) * idist,
            )
        } else {
            (0, 1.0, 0.0)
        };

        let frac1 = frac1.max(0.0).min(1.0);
        let mid_frac = start_frac + (end_frac - start_frac) * frac1;
        let mid = start + (end - start) * frac1;
        self.recurse(work, node.children[side], start_frac, mid_frac, start, mid);

        let frac2 = frac2.max(0.0).min(1.0);
        let mid_frac = start_frac + (end_frac - start_frac) * frac2;
        let mid = start + (end - start) * frac2;
        self.recurse(work, node.children[side ^ 1], mid_frac, end_frac, mid, end);
    }

    fn clip_leaf(&mut self, work: &mut TraceWork, leaf_idx: u32) {
        let level = self.level;
        let leaf = level.get_leaf(leaf_idx);

        for &brush_idx in leaf.brushes_idx.iter() {
            let mark = &mut self.checked[brush_idx as usize];
            if *mark == self.generation {
                continue;
            }
            *mark = self.generation;

            let brush = level.get_brush(brush_idx);
            if brush.sides.is_empty() || !brush.contents.blocks_movement() {
                continue;
            }

            self.brush_tests += 1;
            clip_brush(level, work, brush);

            if work.fraction == 0.0 {
                return;
            }
        }
    }
}

/// Clip the trace against one convex brush, updating `work` if it's hit sooner.
fn clip_brush<L: MinCollisionFeatures + ?Sized>(level: &L, work: &mut TraceWork, brush: &Brush) {
    let mut enter_frac = -1.0;
    let mut exit_frac = 1.0;
    let mut clip_plane = None;

    let mut start_out = false;
    let mut get_out = false;

    for side in brush.sides.iter() {
        let plane = level.get_plane(side.plane_idx);

        // Push the plane out by the corner of the box that would touch it first
        let dist = plane.dist - work.offsets[plane.sign_bits()].dot(&plane.normal);
        let dist1 = work.start.dot(&plane.normal) - dist;
        let dist2 = work.end.dot(&plane.normal) - dist;

        if dist2 > 0.0 {
            get_out = true;
        }
        // Touching a side counts as outside it
        if dist1 >= 0.0 {
            start_out = true;
        }

        // Starts in front of this side and never gets meaningfully behind it
        if dist1 > 0.0 && (dist2 >= TRACE_EPSILON || dist2 >= dist1) {
            return;
        }

        // Resting on this side and moving along it or away
        if dist1 == 0.0 && dist2 >= 0.0 {
            return;
        }

        // Behind this side the whole way
        if dist1 < 0.0 && dist2 <= 0.0 {
            continue;
        }

        if dist1 > dist2 {
            // Entering
            let frac = ((dist1 - TRACE_EPSILON) / (dist1 - dist2)).max(0.0);
            if frac > enter_frac {
                enter_frac = frac;
                clip_plane = Some(*plane);
            }
        } else {
            // Leaving
            let frac = ((dist1 + TRACE_EPSILON) / (dist1 - dist2)).min(1.0);
            if frac < exit_frac {
                exit_frac = frac;
            }
        }
    }

    if !start_out {
        work.start_solid = true;
        if !get_out {
            work.all_solid = true;
            work.fraction = 0.0;
        }
        return;
    }

    if enter_frac < exit_frac && enter_frac > -1.0 && enter_frac < work.fraction {
        work.fraction = enter_frac.max(0.0);
        if clip_plane.is_some() {
            work.plane = clip_plane;
        }
    }
}

/// Trace once against `level`. See [`Tracer::trace`].
pub fn trace<L: MinCollisionFeatures + ?Sized>(
    level: &L,
    start: &Vector3,
    end: &Vector3,
    mins: &Vector3,
    maxs: &Vector3,
) -> TraceResult {
    Tracer::new(level).trace(start, end, mins, maxs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockton_levels::BoxLevelBuilder;

    fn v(x: f32, y: f32, z: f32) -> Vector3 {
        Vector3::new(x, y, z)
    }

    #[test]
    fn corner_offsets() {
        let level = BoxLevelBuilder::new().build().unwrap();
        let mut tracer = Tracer::new(&level);

        // An off-centre box is traced from its centre
        let res = tracer.trace(
            &v(0.0, 0.0, 0.0),
            &v(10.0, 0.0, 0.0),
            &v(-2.0, -4.0, 0.0),
            &v(6.0, 4.0, 10.0),
        );
        assert_eq!(res.fraction, 1.0);
        assert_eq!(res.end_pos, v(10.0, 0.0, 0.0));
    }

    #[test]
    fn reuses_marks_between_traces() {
        let level = BoxLevelBuilder::new()
            .solid(v(-64.0, -64.0, -16.0), v(64.0, 64.0, 0.0))
            .build()
            .unwrap();
        let mut tracer = Tracer::new(&level);

        let first = tracer.trace(
            &v(0.0, 0.0, 32.0),
            &v(0.0, 0.0, -32.0),
            &Vector3::zeros(),
            &Vector3::zeros(),
        );
        let tests = tracer.brush_tests();
        assert_eq!(tests, 1);

        // The brush spans several leafs, but is only clipped once per trace
        let second = tracer.trace(
            &v(0.0, 0.0, 32.0),
            &v(0.0, 0.0, -32.0),
            &Vector3::zeros(),
            &Vector3::zeros(),
        );
        assert_eq!(tracer.brush_tests(), 2);
        assert_eq!(first, second);
    }

    #[test]
    fn generation_wraps() {
        let level = BoxLevelBuilder::new()
            .solid(v(-64.0, -64.0, -16.0), v(64.0, 64.0, 0.0))
            .build()
            .unwrap();
        let mut tracer = Tracer::new(&level);
        let (start, end) = (v(0.0, 0.0, 32.0), v(0.0, 0.0, -32.0));

        let before = tracer.trace(&start, &end, &Vector3::zeros(), &Vector3::zeros());

        // The brush was marked with generation 1, which is what the wrap resets to
        tracer.generation = u32::MAX;
        let after = tracer.trace(&start, &end, &Vector3::zeros(), &Vector3::zeros());

        assert_eq!(tracer.generation, 1);
        assert!(tracer.checked.iter().all(|&c| c <= 1));
        assert_eq!(before, after);
        assert!(after.hit());
    }

    #[test]
    fn clamps_to_epsilon() {
        let level = BoxLevelBuilder::new()
            .solid(v(-64.0, -64.0, -16.0), v(64.0, 64.0, 0.0))
            .build()
            .unwrap();

        let res = trace(
            &level,
            &v(0.0, 0.0, 10.0),
            &v(0.0, 0.0, -10.0),
            &Vector3::zeros(),
            &Vector3::zeros(),
        );

        let expected = (10.0 - TRACE_EPSILON) / 20.0;
        assert!((res.fraction - expected).abs() < 1e-6);
        assert!((res.end_pos.z - TRACE_EPSILON).abs() < 1e-4);
        assert_eq!(res.normal_z(), 1.0);
        assert!(!res.start_solid);
    }

    #[test]
    fn ignores_non_blocking_brushes() {
        use stockton_levels::traits::brushes::ContentsFlags;

        let level = BoxLevelBuilder::new()
            .with_contents(
                v(-64.0, -64.0, -16.0),
                v(64.0, 64.0, 0.0),
                ContentsFlags::WATER | ContentsFlags::TRIGGER,
            )
            .build()
            .unwrap();
        let mut tracer = Tracer::new(&level);

        let res = tracer.trace(
            &v(0.0, 0.0, 10.0),
            &v(0.0, 0.0, -10.0),
            &Vector3::zeros(),
            &Vector3::zeros(),
        );
        assert_eq!(res.fraction, 1.0);
        assert_eq!(tracer.brush_tests(), 0);
    }
}

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

use stockton_levels::prelude::*;
use stockton_levels::{BoxLevelBuilder, Vector3};

const BOXES: &[([f32; 3], [f32; 3])] = &[
    ([-512.0, -512.0, -32.0], [512.0, 512.0, 0.0]),
    ([-512.0, -512.0, 0.0], [-480.0, 512.0, 256.0]),
    ([100.0, -40.0, 0.0], [164.0, 40.0, 24.0]),
    ([0.0, 200.0, 64.0], [32.0, 232.0, 96.0]),
];

fn inside_any(p: &Vector3) -> bool {
    BOXES
        .iter()
        .any(|(mins, maxs)| (0..3).all(|i| p[i] > mins[i] && p[i] < maxs[i]))
}

/// Points inside a solid box are in a leaf with no cluster, and everywhere else
/// is in one with a cluster.
#[test]
fn clusters_match_solidity() {
    let level = BOXES
        .iter()
        .fold(BoxLevelBuilder::new(), |builder, (mins, maxs)| {
            builder.solid(Vector3::from(*mins), Vector3::from(*maxs))
        })
        .build()
        .unwrap();

    for x in (-600..600).step_by(37) {
        for y in (-600..600).step_by(41) {
            for z in (-60..300).step_by(13) {
                let p = Vector3::new(x as f32 + 0.5, y as f32 + 0.5, z as f32 + 0.5);

                assert_eq!(
                    level.cluster_for_point(&p).is_none(),
                    inside_any(&p),
                    "wrong cluster for {:?}",
                    p
                );
            }
        }
    }
}

/// Any point at all lands in some leaf.
#[test]
fn far_away_points() {
    let level = BoxLevelBuilder::new()
        .solid(Vector3::new(-8.0, -8.0, -8.0), Vector3::new(8.0, 8.0, 8.0))
        .build()
        .unwrap();

    for &p in &[
        Vector3::new(1.0e7, 0.0, 0.0),
        Vector3::new(-1.0e7, -1.0e7, 1.0e7),
        Vector3::new(0.0, 0.0, f32::MAX),
    ] {
        let leaf = level.leaf_for_point(&p);
        assert!(leaf.cluster_id.is_some());
    }
}

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

use na::Vector3;
use serde::{Deserialize, Serialize};

/// Generic plane, referenced by nodes & brushsides
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    /// Plane normal. Unit length.
    pub normal: Vector3<f32>,

    /// Distance from origin to plane along normal
    pub dist: f32,
}

impl Plane {
    pub fn new(normal: Vector3<f32>, dist: f32) -> Plane {
        Plane { normal, dist }
    }

    /// Signed distance from the plane to `point`. Zero or above is in front.
    #[inline]
    pub fn distance_to(&self, point: &Vector3<f32>) -> f32 {
        self.normal.dot(point) - self.dist
    }

    /// The axis this plane faces down, if its normal is a positive unit axis.
    #[inline]
    pub fn axis(&self) -> Option<usize> {
        (0..3).find(|&i| self.normal[i] == 1.0)
    }

    /// Bit `i` is set when component `i` of the normal is negative.
    #[inline]
    pub fn sign_bits(&self) -> usize {
        (0..3)
            .filter(|&i| self.normal[i] < 0.0)
            .fold(0, |bits, i| bits | (1 << i))
    }
}

pub trait HasPlanes {
    fn planes(&self) -> &[Plane];

    fn get_plane(&self, idx: u32) -> &Plane {
        &self.planes()[idx as usize]
    }
}

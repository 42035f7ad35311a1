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

//! Brushes: convex volumes used for collision detection

bitflags!(
    /// Extracted from the Q3 arena engine code.
    /// https://github.com/id-Software/Quake-III-Arena/blob/master/code/game/surfaceflags.h
    pub struct ContentsFlags: u32 {
        // an eye is never valid in a solid
        const SOLID = 0x1;
        const LAVA = 0x8;
        const SLIME = 0x10;
        const WATER = 0x20;
        const FOG = 0x40;

        const AREA_PORTAL = 0x80_00;

        /// blocks players, but not missiles or the camera
        const PLAYER_CLIP = 0x01_00_00;

        /// bot specific contents type
        const MONSTER_CLIP = 0x02_00_00;

        const TELEPORTER = 0x04_00_00;
        const JUMP_PAD = 0x08_00_00;
        const BOT_CLIP = 0x40_00_00;
        const MOVER = 0x80_00_00;

        /// brush not used for the bsp
        const DETAIL = 0x08_00_00_00;

        /// brushes used for the bsp
        const STRUCTURAL = 0x10_00_00_00;

        const TRIGGER = 0x40_00_00_00;

        /// don't leave bodies or items (death fog, lava)
        const NODROP = 0x80_00_00_00;
    }
);

impl ContentsFlags {
    /// True if a moving player should be stopped by this.
    pub fn blocks_movement(self) -> bool {
        self.intersects(ContentsFlags::SOLID | ContentsFlags::PLAYER_CLIP)
    }
}

/// One brush record. Used for collision detection.
/// "Each brush describes a convex volume as defined by its surrounding surfaces."
/// The volume is everything behind every side.
#[derive(Debug, Clone, PartialEq)]
pub struct Brush {
    pub sides: Box<[BrushSide]>,
    pub texture_idx: u32,

    /// Contents of the brush's texture.
    pub contents: ContentsFlags,
}

/// Bounding surface for brush.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushSide {
    pub plane_idx: u32,
    pub texture_idx: u32,
}

pub trait HasBrushes {
    fn brushes(&self) -> &[Brush];

    fn get_brush(&self, index: u32) -> &Brush {
        &self.brushes()[index as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocking_contents() {
        assert!(ContentsFlags::SOLID.blocks_movement());
        assert!(ContentsFlags::PLAYER_CLIP.blocks_movement());
        assert!((ContentsFlags::SOLID | ContentsFlags::DETAIL).blocks_movement());

        assert!(!ContentsFlags::TRIGGER.blocks_movement());
        assert!(!ContentsFlags::WATER.blocks_movement());
        assert!(!ContentsFlags::empty().blocks_movement());
    }
}

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

//! A level, the things moving around it, and the systems moving them.

use legion::systems::Builder;
use legion::*;
use stockton_levels::CollisionLevel;
use stockton_physics::{MovementParams, Mover};

use crate::delta_time::{FixedTicks, Timing};

/// A loaded level with movers in it.
pub struct Session {
    pub world: World,
    pub resources: Resources,
    schedule: Schedule,
}

impl Session {
    /// Create a new session for `level`, ticking every `tick_length` seconds.
    ///
    /// `add_systems` decides what runs on each update. For real time, add
    /// `update_deltatime_system` and `update_fixed_ticks_system` before
    /// `player_move_system`. To step manually, add only `player_move_system`
    /// and use [`Session::advance`].
    pub fn new<S: FnOnce(&mut Builder)>(
        level: CollisionLevel,
        params: MovementParams,
        tick_length: f32,
        add_systems: S,
    ) -> Session {
        let world = World::default();

        let mut resources = Resources::default();
        resources.insert(level);
        resources.insert(params);
        resources.insert(Timing::default());
        resources.insert(FixedTicks::new(tick_length));

        let mut schedule = Schedule::builder();
        add_systems(&mut schedule);
        let schedule = schedule.build();

        Session {
            world,
            resources,
            schedule,
        }
    }

    pub fn spawn_mover(&mut self, mover: Mover) -> Entity {
        self.world.push((mover,))
    }

    /// The current state of a mover, if `entity` is one.
    pub fn mover(&self, entity: Entity) -> Option<&Mover> {
        self.world
            .entry_ref(entity)
            .ok()?
            .into_component::<Mover>()
            .ok()
    }

    /// Count `delta` seconds as passed, then update.
    /// Returns how many ticks were run.
    pub fn advance(&mut self, delta: f32) -> u32 {
        let ticks = match self.resources.get_mut::<FixedTicks>() {
            Some(mut ticks) => ticks.advance(delta),
            None => 0,
        };

        self.do_update();

        ticks
    }

    pub fn do_update(&mut self) {
        self.schedule.execute(&mut self.world, &mut self.resources);
    }
}

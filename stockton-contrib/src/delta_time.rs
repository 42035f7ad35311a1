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

//! Frame timing, and splitting it into fixed-length ticks.

use legion::system;
use log::warn;
use std::time::Instant;

/// Most ticks to run in a single frame. Any more are dropped, so a long stall
/// doesn't make every following frame slower too.
pub const MAX_TICKS_PER_FRAME: u32 = 8;

#[derive(Debug, Clone)]
pub struct Timing {
    pub delta_time: f32,

    pub(crate) last_frame_start: Instant,
}

impl Timing {
    /// Start a new frame at `now`.
    pub fn update(&mut self, now: Instant) {
        self.delta_time = now
            .saturating_duration_since(self.last_frame_start)
            .as_secs_f32();
        self.last_frame_start = now;
    }
}

impl Default for Timing {
    fn default() -> Self {
        Timing {
            delta_time: 0.0,

            last_frame_start: Instant::now(),
        }
    }
}

#[system]
pub fn update_deltatime(#[resource] timing: &mut Timing) {
    timing.update(Instant::now());
}

/// How many fixed-length ticks to simulate this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedTicks {
    /// Length of a tick, in seconds.
    pub tick_length: f32,

    /// Ticks due this frame.
    pub ticks: u32,

    /// Time not yet simulated.
    accumulator: f32,
}

impl FixedTicks {
    pub fn new(tick_length: f32) -> Self {
        FixedTicks {
            tick_length,
            ticks: 0,
            accumulator: 0.0,
        }
    }

    /// Add `delta` seconds, returning how many whole ticks are now due.
    pub fn advance(&mut self, delta: f32) -> u32 {
        if self.tick_length <= 0.0 {
            self.ticks = 0;
            return 0;
        }

        self.accumulator += delta.max(0.0);
        let due = (self.accumulator / self.tick_length).floor();

        if due > MAX_TICKS_PER_FRAME as f32 {
            warn!(
                "Running {} ticks behind, skipping {}",
                due,
                due - MAX_TICKS_PER_FRAME as f32
            );
            self.ticks = MAX_TICKS_PER_FRAME;
            self.accumulator = 0.0;
        } else {
            self.ticks = due as u32;
            self.accumulator -= due * self.tick_length;
        }

        self.ticks
    }

    /// Time carried over to the next frame.
    pub fn leftover(&self) -> f32 {
        self.accumulator
    }
}

#[system]
pub fn update_fixed_ticks(#[resource] timing: &Timing, #[resource] ticks: &mut FixedTicks) {
    ticks.advance(timing.delta_time);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn frame_delta() {
        let mut timing = Timing::default();
        let start = timing.last_frame_start;

        timing.update(start + Duration::from_millis(250));
        assert!((timing.delta_time - 0.25).abs() < 1e-6);

        // Time going backwards is just no time
        timing.update(start);
        assert_eq!(timing.delta_time, 0.0);
    }

    #[test]
    fn accumulates_partial_ticks() {
        let mut ticks = FixedTicks::new(0.1);

        assert_eq!(ticks.advance(0.05), 0);
        assert_eq!(ticks.advance(0.07), 1);
        assert!((ticks.leftover() - 0.02).abs() < 1e-5);

        assert_eq!(ticks.advance(0.3), 3);
        assert_eq!(ticks.ticks, 3);
    }

    #[test]
    fn drops_backlog() {
        let mut ticks = FixedTicks::new(0.01);

        assert_eq!(ticks.advance(5.0), MAX_TICKS_PER_FRAME);
        assert_eq!(ticks.leftover(), 0.0);

        assert_eq!(ticks.advance(0.0), 0);
    }
}

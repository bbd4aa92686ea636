//! Physical LED layout of the tree
//!
//! The strip is wired as a tree base (the root), a circular player path and
//! seven radial lanes. Every lane runs from the outer edge, where enemies
//! spawn, to the LED on the player path it connects to.

use crate::geometry::{LedIndex, LedRange, led_index_from_range};

/// Number of radial lanes on the tree
pub const LANE_COUNT: usize = 7;

/// One radial arm of the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lane {
    /// Outer end, where enemies spawn
    pub start: LedIndex,
    /// Inner end, next to the player path
    pub end: LedIndex,
    /// Position of the inner end on the player path (0 = path start)
    pub path_led_index: u16,
}

impl Lane {
    pub const fn new(start: LedIndex, end: LedIndex, path_led_index: u16) -> Self {
        Self {
            start,
            end,
            path_led_index,
        }
    }

    /// Number of LEDs in the lane
    pub const fn count(self) -> u16 {
        self.start.abs_diff(self.end) + 1
    }

    /// LED index for a normalized lane position (0 = outer end)
    pub fn led_index(self, lane_position: f32) -> i32 {
        led_index_from_range(i32::from(self.start), i32::from(self.end), lane_position)
    }

    /// Ascending range covering the whole lane
    pub const fn range(self) -> LedRange {
        LedRange::between(self.start, self.end)
    }
}

/// LED index ranges of the whole installation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeLayout {
    pub base_start: LedIndex,
    pub base_end: LedIndex,
    pub path_start: LedIndex,
    pub path_end: LedIndex,
    pub lanes: [Lane; LANE_COUNT],
}

impl TreeLayout {
    /// Wiring of the installed tree
    pub const DEFAULT: Self = Self {
        base_start: 0,
        base_end: 25,
        path_start: 30,
        path_end: 59,
        lanes: [
            Lane::new(215, 195, 0),
            Lane::new(170, 190, 5),
            Lane::new(170, 150, 10),
            Lane::new(125, 145, 15),
            Lane::new(125, 105, 20),
            Lane::new(80, 100, 25),
            Lane::new(80, 60, 29),
        ],
    };

    pub const fn base_range(&self) -> LedRange {
        LedRange::between(self.base_start, self.base_end)
    }

    pub const fn path_range(&self) -> LedRange {
        LedRange::between(self.path_start, self.path_end)
    }

    /// Number of LEDs on the player path
    pub const fn path_count(&self) -> u16 {
        self.path_start.abs_diff(self.path_end) + 1
    }

    /// Frame buffer length needed to address every LED of the layout
    pub fn led_count(&self) -> usize {
        let lanes_end = self
            .lanes
            .iter()
            .map(|lane| lane.range().end())
            .max()
            .unwrap_or(0);
        lanes_end
            .max(self.base_range().end())
            .max(self.path_range().end())
    }

    /// Range from the first LED to the last addressed one
    #[allow(clippy::cast_possible_truncation)]
    pub fn tree_range(&self) -> LedRange {
        LedRange::new(0, self.led_count() as u16)
    }

    /// Normalized path position (0.0..=1.0) of a lane's inner end
    pub fn path_position_of(&self, lane: Lane) -> f32 {
        let last = self.path_count().saturating_sub(1).max(1);
        f32::from(lane.path_led_index) / f32::from(last)
    }

    /// LED index on the path for a normalized path position
    pub fn path_led(&self, path_position: f32) -> i32 {
        led_index_from_range(
            i32::from(self.path_start),
            i32::from(self.path_end),
            path_position,
        )
    }

    /// Ranges of every lane
    pub fn lane_ranges(&self) -> [LedRange; LANE_COUNT] {
        self.lanes.map(Lane::range)
    }
}

impl Default for TreeLayout {
    fn default() -> Self {
        Self::DEFAULT
    }
}

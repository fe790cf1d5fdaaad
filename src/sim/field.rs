//! Field and goal geometry
//!
//! Field-local coordinates: origin at the top-left corner, +x right, +y down.
//! Goal mouths sit on the short edges, horizontally centred:
//! - width: `GOAL_WIDTH_FRACTION` of the field width
//! - height: `GOAL_HEIGHT_FRACTION` of the field height

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{GOAL_HEIGHT_FRACTION, GOAL_WIDTH_FRACTION};
use crate::field_center;

/// An axis-aligned goal mouth rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalRect {
    /// Top-left corner
    pub min: Vec2,
    /// Bottom-right corner (exclusive)
    pub max: Vec2,
}

impl GoalRect {
    pub fn new(top_left: Vec2, size: Vec2) -> Self {
        Self {
            min: top_left,
            max: top_left + size,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Half-open containment: left/top edges are inside, right/bottom are not
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x < self.max.x && point.y >= self.min.y && point.y < self.max.y
    }

    /// Whether two rectangles share any interior area
    pub fn overlaps(&self, other: &GoalRect) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

/// Field size plus the derived goal mouths
///
/// Rebuilt from scratch whenever the layout changes; never mutated in place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldGeometry {
    pub width: f32,
    pub height: f32,
    pub top_goal: GoalRect,
    pub bottom_goal: GoalRect,
}

impl FieldGeometry {
    pub fn new(width: f32, height: f32) -> Self {
        let goal_size = Vec2::new(width * GOAL_WIDTH_FRACTION, height * GOAL_HEIGHT_FRACTION);
        let goal_left = (width - goal_size.x) / 2.0;

        Self {
            width,
            height,
            top_goal: GoalRect::new(Vec2::new(goal_left, 0.0), goal_size),
            bottom_goal: GoalRect::new(Vec2::new(goal_left, height - goal_size.y), goal_size),
        }
    }

    /// Ball spawn point
    #[inline]
    pub fn center(&self) -> Vec2 {
        field_center(self.width, self.height)
    }

    /// Check whether the field covers the same area as `width` x `height`
    pub fn same_size(&self, width: f32, height: f32) -> bool {
        self.width == width && self.height == height
    }
}

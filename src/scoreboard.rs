//! Match score
//!
//! Two goal counters fed by engine step results. Owned by the caller, never by
//! the engine.

use serde::{Deserialize, Serialize};

use crate::sim::StepResult;

/// Which end of the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Top,
    Bottom,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Top => "Top",
            Side::Bottom => "Bottom",
        }
    }
}

/// Goals counted per goal mouth
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBoard {
    /// Goals scored into the top goal
    pub top: u32,
    /// Goals scored into the bottom goal
    pub bottom: u32,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the goal events of one step
    pub fn record(&mut self, result: &StepResult) {
        if result.top_goal_scored {
            self.top = self.top.saturating_add(1);
        }
        if result.bottom_goal_scored {
            self.bottom = self.bottom.saturating_add(1);
        }
    }

    pub fn total(&self) -> u64 {
        u64::from(self.top) + u64::from(self.bottom)
    }

    /// Side with more goals, None on a tie
    pub fn leader(&self) -> Option<Side> {
        match self.top.cmp(&self.bottom) {
            std::cmp::Ordering::Greater => Some(Side::Top),
            std::cmp::Ordering::Less => Some(Side::Bottom),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// One-line score for logs
    pub fn label(&self) -> String {
        format!("Top: {} | Bottom: {}", self.top, self.bottom)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

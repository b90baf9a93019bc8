//! Plain data view of the simulator state at one decision point.
//!
//! The episode runner assembles a snapshot from simulator queries; the
//! encoders read it without touching the simulator boundary, which keeps
//! them pure and directly testable.

use std::collections::HashMap;

/// One vehicle observed on the approach to the intersection.
#[derive(Clone, Debug, PartialEq)]
pub struct VehicleObs {
    /// Edge (road) the vehicle is currently on — the simulator's own id.
    pub edge: String,
    /// Distance from the vehicle's front bumper to the stop line, metres.
    pub dist_to_stop: f64,
}

/// Raw per-decision-point observations.
///
/// Produced fresh at every decision point and owned by the caller; the
/// encoders only borrow it.
#[derive(Clone, Debug, Default)]
pub struct IntersectionSnapshot {
    /// Halted-vehicle count per lane id (speed ≈ 0).
    pub halting_by_lane: HashMap<String, u32>,
    /// Per-vehicle observations, for the positional encoding.
    pub vehicles: Vec<VehicleObs>,
}

impl IntersectionSnapshot {
    /// Halting count for `lane`, zero if the lane was not reported.
    #[inline]
    pub fn halting(&self, lane: &str) -> u32 {
        self.halting_by_lane.get(lane).copied().unwrap_or(0)
    }
}

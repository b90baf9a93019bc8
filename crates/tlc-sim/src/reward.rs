//! Reward strategies.
//!
//! Two reward formulas exist in the field calibration of this system: the
//! signed change in cumulative waiting time between decision points, and
//! the signed change in total queue length.  They are not equivalent, so
//! both are first-class and the choice is explicit configuration.

use tlc_core::Topology;

use crate::{SimResult, TrafficSim, WaitingTimeTracker};

/// Which per-decision-point metric the reward delta is computed from.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum RewardKind {
    /// `old_total_wait − current_total_wait` over cars on incoming roads.
    #[default]
    WaitingDelta,
    /// `old_queue_length − current_queue_length` over incoming roads.
    QueueDelta,
}

impl RewardKind {
    /// The metric at the current decision point.  The reward for the
    /// previous action is `old_metric − this`.
    pub fn metric<S: TrafficSim>(
        self,
        sim:      &S,
        topology: &Topology,
        tracker:  &mut WaitingTimeTracker,
    ) -> SimResult<f64> {
        match self {
            RewardKind::WaitingDelta => tracker.collect(sim, topology),
            RewardKind::QueueDelta => Ok(f64::from(queue_length(sim, topology)?)),
        }
    }
}

/// Total halted vehicles across all incoming roads.
pub fn queue_length<S: TrafficSim>(sim: &S, topology: &Topology) -> SimResult<u32> {
    let mut total = 0;
    for road in &topology.roads {
        total += sim.edge_halting_count(road)?;
    }
    Ok(total)
}

//! The `StateEncoder` trait and its two implementations.

use std::collections::HashMap;

use tlc_core::Topology;

use crate::{IntersectionSnapshot, StateError, StateResult};

/// Distance-to-stop-line bucket boundaries, metres.  Non-uniform: fine near
/// the stop line where queue growth matters, coarse far away.  Vehicles
/// beyond the last boundary fall into the last bucket.
pub const BUCKET_BOUNDARIES_M: [f64; 9] = [7.0, 14.0, 21.0, 28.0, 40.0, 60.0, 100.0, 160.0, 250.0];

/// Buckets per lane group: the nine boundaries plus the catch-all.
pub const BUCKET_COUNT: usize = BUCKET_BOUNDARIES_M.len() + 1;

/// Converts a raw snapshot into the fixed-length feature vector.
///
/// Implementations fix `state_dim` at construction; `encode` always returns
/// a vector of exactly that length.
pub trait StateEncoder {
    /// Length of every vector this encoder produces.
    fn state_dim(&self) -> usize;

    /// Encode one snapshot.  Infallible: unrecognized lanes and edges are
    /// dropped (sensor-coverage gaps, not defects).
    fn encode(&self, snapshot: &IntersectionSnapshot) -> Vec<f64>;
}

// ── Aggregate occupancy ───────────────────────────────────────────────────────

/// One feature slot per lane group; value = halted vehicles summed across
/// the group's lanes.
pub struct AggregateEncoder {
    lane_groups: Vec<Vec<String>>,
}

impl AggregateEncoder {
    /// Fails if the statically declared dimension does not equal the number
    /// of lane groups.
    pub fn new(topology: &Topology, declared_dim: usize) -> StateResult<AggregateEncoder> {
        if declared_dim != topology.group_count() {
            return Err(StateError::DimensionMismatch {
                declared: declared_dim,
                actual:   topology.group_count(),
            });
        }
        Ok(AggregateEncoder {
            lane_groups: topology.lane_groups.clone(),
        })
    }
}

impl StateEncoder for AggregateEncoder {
    fn state_dim(&self) -> usize {
        self.lane_groups.len()
    }

    fn encode(&self, snapshot: &IntersectionSnapshot) -> Vec<f64> {
        self.lane_groups
            .iter()
            .map(|group| {
                group
                    .iter()
                    .map(|lane| snapshot.halting(lane) as f64)
                    .sum()
            })
            .collect()
    }
}

// ── Fine-grained positional ───────────────────────────────────────────────────

/// Binary occupancy grid over (lane group × distance bucket) cells.
///
/// Cell index = `group * BUCKET_COUNT + bucket`.  A cell is 1.0 if at least
/// one vehicle occupies it — multiple vehicles collapse to one flag.
/// Vehicles on edges outside the lookup contribute nothing.
#[derive(Debug)]
pub struct PositionalEncoder {
    edge_to_group: HashMap<String, usize>,
    group_count:   usize,
}

impl PositionalEncoder {
    /// `edge_to_group` maps simulator edge ids to lane-group indices in
    /// `[0, group_count)`.  Fails if the declared dimension does not equal
    /// `group_count * BUCKET_COUNT` or if any mapped group is out of range.
    pub fn new(
        edge_to_group: HashMap<String, usize>,
        group_count:   usize,
        declared_dim:  usize,
    ) -> StateResult<PositionalEncoder> {
        let actual = group_count * BUCKET_COUNT;
        if declared_dim != actual {
            return Err(StateError::DimensionMismatch {
                declared: declared_dim,
                actual,
            });
        }
        if let Some(&bad) = edge_to_group.values().find(|&&g| g >= group_count) {
            return Err(StateError::GroupOutOfRange {
                group: bad,
                group_count,
            });
        }
        Ok(PositionalEncoder {
            edge_to_group,
            group_count,
        })
    }

    /// Bucket index for a distance to the stop line.
    fn bucket(dist: f64) -> usize {
        BUCKET_BOUNDARIES_M
            .iter()
            .position(|&b| dist <= b)
            .unwrap_or(BUCKET_COUNT - 1)
    }
}

impl StateEncoder for PositionalEncoder {
    fn state_dim(&self) -> usize {
        self.group_count * BUCKET_COUNT
    }

    fn encode(&self, snapshot: &IntersectionSnapshot) -> Vec<f64> {
        let mut state = vec![0.0; self.state_dim()];
        for veh in &snapshot.vehicles {
            // The valid-car gate: edges outside the lookup are coverage
            // gaps and contribute nothing.
            let Some(&group) = self.edge_to_group.get(&veh.edge) else {
                continue;
            };
            let cell = group * BUCKET_COUNT + Self::bucket(veh.dist_to_stop);
            state[cell] = 1.0;
        }
        state
    }
}

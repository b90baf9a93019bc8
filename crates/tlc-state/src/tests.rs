//! Unit tests for the state encoders.

use std::collections::HashMap;

use tlc_core::{Junction, Topology};

use crate::encoder::BUCKET_COUNT;
use crate::{
    AggregateEncoder, IntersectionSnapshot, PositionalEncoder, StateEncoder, StateError,
    VehicleObs,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn topology_with_groups(groups: Vec<Vec<&str>>) -> Topology {
    Topology::new(
        vec![Junction { id: "j".into(), phase_count: 2 }],
        vec![],
        groups
            .into_iter()
            .map(|g| g.into_iter().map(String::from).collect())
            .collect(),
    )
    .unwrap()
}

fn snapshot_with_halting(counts: &[(&str, u32)]) -> IntersectionSnapshot {
    IntersectionSnapshot {
        halting_by_lane: counts
            .iter()
            .map(|&(lane, n)| (lane.to_string(), n))
            .collect(),
        vehicles: vec![],
    }
}

fn vehicle(edge: &str, dist: f64) -> VehicleObs {
    VehicleObs {
        edge:         edge.to_string(),
        dist_to_stop: dist,
    }
}

// ── Aggregate encoder ─────────────────────────────────────────────────────────

#[cfg(test)]
mod aggregate {
    use super::*;

    #[test]
    fn sums_halting_counts_per_group() {
        let topo = topology_with_groups(vec![vec!["a_0", "a_1"], vec!["b_0"]]);
        let enc = AggregateEncoder::new(&topo, 2).unwrap();
        let snap = snapshot_with_halting(&[("a_0", 2), ("a_1", 1), ("b_0", 0)]);
        assert_eq!(enc.encode(&snap), vec![3.0, 0.0]);
    }

    #[test]
    fn unreported_lanes_count_as_zero() {
        let topo = topology_with_groups(vec![vec!["a_0"], vec!["b_0"]]);
        let enc = AggregateEncoder::new(&topo, 2).unwrap();
        let snap = snapshot_with_halting(&[("b_0", 4)]);
        assert_eq!(enc.encode(&snap), vec![0.0, 4.0]);
    }

    #[test]
    fn lanes_outside_groups_are_ignored() {
        let topo = topology_with_groups(vec![vec!["a_0"]]);
        let enc = AggregateEncoder::new(&topo, 1).unwrap();
        let snap = snapshot_with_halting(&[("a_0", 1), ("z_0", 99)]);
        assert_eq!(enc.encode(&snap), vec![1.0]);
    }

    #[test]
    fn dimension_mismatch_is_fatal() {
        let topo = topology_with_groups(vec![vec!["a_0"], vec!["b_0"]]);
        assert!(AggregateEncoder::new(&topo, 3).is_err());
    }
}

// ── Positional encoder ────────────────────────────────────────────────────────

#[cfg(test)]
mod positional {
    use super::*;

    fn two_group_encoder() -> PositionalEncoder {
        let lookup: HashMap<String, usize> =
            [("gneE4".to_string(), 0), ("gneE5".to_string(), 1)].into();
        PositionalEncoder::new(lookup, 2, 2 * BUCKET_COUNT).unwrap()
    }

    #[test]
    fn bucket_boundaries() {
        let enc = two_group_encoder();

        // 5 m → bucket 0; exactly 7 m still bucket 0; 7.5 m → bucket 1.
        let snap = IntersectionSnapshot {
            halting_by_lane: HashMap::new(),
            vehicles: vec![vehicle("gneE4", 5.0)],
        };
        let state = enc.encode(&snap);
        assert_eq!(state[0], 1.0);
        assert_eq!(state.iter().filter(|&&v| v != 0.0).count(), 1);

        let snap = IntersectionSnapshot {
            halting_by_lane: HashMap::new(),
            vehicles: vec![vehicle("gneE4", 7.0), vehicle("gneE5", 7.5)],
        };
        let state = enc.encode(&snap);
        assert_eq!(state[0], 1.0);                  // group 0, bucket 0
        assert_eq!(state[BUCKET_COUNT + 1], 1.0);   // group 1, bucket 1
    }

    #[test]
    fn beyond_last_boundary_gets_last_bucket() {
        let enc = two_group_encoder();
        let snap = IntersectionSnapshot {
            halting_by_lane: HashMap::new(),
            vehicles: vec![vehicle("gneE4", 400.0)],
        };
        let state = enc.encode(&snap);
        assert_eq!(state[BUCKET_COUNT - 1], 1.0);
    }

    #[test]
    fn multiple_vehicles_in_one_cell_collapse_to_one_flag() {
        let enc = two_group_encoder();
        let snap = IntersectionSnapshot {
            halting_by_lane: HashMap::new(),
            vehicles: vec![
                vehicle("gneE4", 3.0),
                vehicle("gneE4", 4.0),
                vehicle("gneE4", 6.9),
            ],
        };
        let state = enc.encode(&snap);
        assert_eq!(state[0], 1.0);
        assert_eq!(state.iter().sum::<f64>(), 1.0);
    }

    #[test]
    fn unrecognized_edges_are_dropped() {
        let enc = two_group_encoder();
        let snap = IntersectionSnapshot {
            halting_by_lane: HashMap::new(),
            vehicles: vec![vehicle("offgrid", 3.0)],
        };
        assert!(enc.encode(&snap).iter().all(|&v| v == 0.0));
    }

    #[test]
    fn dimension_mismatch_is_fatal() {
        let lookup: HashMap<String, usize> = [("gneE4".to_string(), 0)].into();
        assert!(PositionalEncoder::new(lookup, 1, 11).is_err());
    }

    #[test]
    fn out_of_range_group_mapping_is_fatal() {
        let lookup: HashMap<String, usize> = [("gneE4".to_string(), 2)].into();
        let err = PositionalEncoder::new(lookup, 2, 2 * BUCKET_COUNT).unwrap_err();
        assert!(matches!(
            err,
            StateError::GroupOutOfRange { group: 2, group_count: 2 }
        ));
    }

    #[test]
    fn state_dim_matches_grid() {
        let enc = two_group_encoder();
        assert_eq!(enc.state_dim(), 20);
        assert_eq!(enc.encode(&IntersectionSnapshot::default()).len(), 20);
    }
}

//! Static intersection topology, loaded once per run.
//!
//! # JSON format
//!
//! ```json
//! {
//!   "junctions":   [ { "id": "gneJ6", "phase_count": 3 },
//!                    { "id": "gneJ7", "phase_count": 3 } ],
//!   "roads":       [ "gneE4", "-gneE4", "gneE5", "gneE6", "gneE8", "gneE9" ],
//!   "lane_groups": [ ["gneE4_0", "gneE4_1"], ["gneE5_0"], ["gneE5_1"] ]
//! }
//! ```
//!
//! Declaration order is significant everywhere: junction order fixes the
//! action-enumeration order, and lane-group order fixes which slot of the
//! state vector each group feeds.  Identifiers are the external simulator's
//! own strings and are immutable for the lifetime of a run.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::{GroupId, TlcError, TlcResult};

/// One signal-controlled junction and its number of green phases.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Junction {
    /// Simulator-issued junction identifier (e.g. `"gneJ6"`).
    pub id: String,
    /// Number of green phases.  Phase codes are the even integers
    /// `0, 2, …, 2*(phase_count-1)`; odd codes are the yellows.
    pub phase_count: u32,
}

#[derive(Deserialize)]
struct TopologyDoc {
    junctions:   Vec<Junction>,
    roads:       Vec<String>,
    lane_groups: Vec<Vec<String>>,
}

/// The validated static topology: junctions, incoming roads, lane groups.
#[derive(Clone, Debug)]
pub struct Topology {
    /// Signal-controlled junctions, in declaration order.
    pub junctions: Vec<Junction>,
    /// Incoming road (edge) identifiers.
    pub roads: Vec<String>,
    /// Ordered lane groups; group `i` feeds slot `i` of the aggregate state
    /// vector.  Every lane belongs to exactly one group.
    pub lane_groups: Vec<Vec<String>>,
}

impl Topology {
    /// Load and validate a topology from a JSON file.
    pub fn load(path: &Path) -> TlcResult<Topology> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Like [`load`](Self::load) but accepts any `Read` source.  Useful for
    /// testing (pass a `std::io::Cursor`).
    pub fn from_reader<R: Read>(reader: R) -> TlcResult<Topology> {
        let doc: TopologyDoc =
            serde_json::from_reader(reader).map_err(|e| TlcError::Parse(e.to_string()))?;
        Self::new(doc.junctions, doc.roads, doc.lane_groups)
    }

    /// Build a topology from already-parsed parts, running all validation.
    pub fn new(
        junctions:   Vec<Junction>,
        roads:       Vec<String>,
        lane_groups: Vec<Vec<String>>,
    ) -> TlcResult<Topology> {
        if junctions.is_empty() {
            return Err(TlcError::Config("topology declares no junctions".into()));
        }
        for j in &junctions {
            if j.phase_count == 0 {
                return Err(TlcError::Config(format!(
                    "junction {:?} has zero phases",
                    j.id
                )));
            }
        }

        let mut seen: HashSet<&str> = HashSet::new();
        for (i, group) in lane_groups.iter().enumerate() {
            if group.is_empty() {
                return Err(TlcError::Config(format!("lane group {i} is empty")));
            }
            for lane in group {
                if !seen.insert(lane.as_str()) {
                    return Err(TlcError::Config(format!(
                        "lane {lane:?} appears in more than one group"
                    )));
                }
            }
        }

        Ok(Topology {
            junctions,
            roads,
            lane_groups,
        })
    }

    /// Number of lane groups — the aggregate state-vector length.
    #[inline]
    pub fn group_count(&self) -> usize {
        self.lane_groups.len()
    }

    /// Find the group a lane belongs to, or `None` for lanes outside the
    /// declared coverage.
    pub fn group_of_lane(&self, lane: &str) -> Option<GroupId> {
        self.lane_groups
            .iter()
            .position(|g| g.iter().any(|l| l == lane))
            .map(|i| GroupId(i as u16))
    }

    /// `true` if `road` is one of the declared incoming roads.
    #[inline]
    pub fn is_incoming_road(&self, road: &str) -> bool {
        self.roads.iter().any(|r| r == road)
    }
}

//! The route-choice probability graph.
//!
//! # JSON format
//!
//! ```json
//! {
//!   "start": [
//!     { "edge": "gneE4",  "probability": 0.35 },
//!     { "edge": "-gneE4", "probability": 0.70 },
//!     { "edge": "gneE5",  "probability": 1.00 }
//!   ],
//!   "branches": {
//!     "gneE4": [
//!       { "edge": "gneE8", "probability": 0.25 },
//!       { "edge": "gneE9", "probability": 0.80 }
//!     ]
//!   }
//! }
//! ```
//!
//! `start` is an ordered cumulative distribution over entry edges: a route
//! begins at the first entry whose probability is ≥ the uniform draw (the
//! last entry is the fallback).  Branch lists are sorted ascending by
//! probability at load time; during the walk the first branch whose
//! probability exceeds the draw wins, with the last branch as the
//! catch-all regardless of its value.  Edges absent from `branches` are
//! exits — reaching one ends the route, which is a valid terminal state,
//! not an error.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use tlc_core::SimRng;

use crate::{DemandError, DemandResult};

/// One weighted continuation.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Branch {
    pub edge:        String,
    pub probability: f64,
}

#[derive(Deserialize)]
struct GraphDoc {
    start:    Vec<Branch>,
    branches: HashMap<String, Vec<Branch>>,
}

/// Loaded route-choice graph.  Read-only after construction.
#[derive(Clone, Debug)]
pub struct DemandGraph {
    start:    Vec<Branch>,
    branches: HashMap<String, Vec<Branch>>,
}

impl DemandGraph {
    /// Load and validate a graph from a JSON file.
    pub fn load(path: &Path) -> DemandResult<DemandGraph> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Like [`load`](Self::load) but accepts any `Read` source.
    pub fn from_reader<R: Read>(reader: R) -> DemandResult<DemandGraph> {
        let doc: GraphDoc =
            serde_json::from_reader(reader).map_err(|e| DemandError::Parse(e.to_string()))?;
        Self::new(doc.start, doc.branches)
    }

    /// Build from parsed parts: sorts every branch list ascending by
    /// probability (ties keep their input order).
    pub fn new(
        start:        Vec<Branch>,
        mut branches: HashMap<String, Vec<Branch>>,
    ) -> DemandResult<DemandGraph> {
        if start.is_empty() {
            return Err(DemandError::EmptyStartDistribution);
        }
        // An edge mapped to an empty list is an exit, same as an absent one.
        branches.retain(|_, list| !list.is_empty());
        for list in branches.values_mut() {
            list.sort_by(|a, b| a.probability.total_cmp(&b.probability));
        }
        Ok(DemandGraph { start, branches })
    }

    /// Draw an entry edge from the start distribution.
    pub fn choose_start(&self, rng: &mut SimRng) -> &str {
        let draw = rng.random::<f64>();
        for entry in &self.start {
            if draw <= entry.probability {
                return &entry.edge;
            }
        }
        // Catch-all: a start list whose last cumulative probability is
        // below 1.0 still always produces a route.
        &self.start[self.start.len() - 1].edge
    }

    /// Sample a full route: entry edge, then repeated branch draws until an
    /// edge with no outgoing branches is reached.
    pub fn generate_path(&self, rng: &mut SimRng) -> Vec<String> {
        let mut edge = self.choose_start(rng).to_string();
        let mut path = vec![edge.clone()];

        while let Some(nexts) = self.branches.get(&edge) {
            let draw = rng.random::<f64>();
            let mut chosen = &nexts[nexts.len() - 1];
            for branch in nexts {
                if draw < branch.probability {
                    chosen = branch;
                    break;
                }
            }
            edge = chosen.edge.clone();
            path.push(edge.clone());
        }

        path
    }

    /// Branch list for an edge, sorted ascending by probability.  `None`
    /// for exit edges.
    pub fn branches_of(&self, edge: &str) -> Option<&[Branch]> {
        self.branches.get(edge).map(Vec::as_slice)
    }
}

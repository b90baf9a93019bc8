//! Per-episode waiting-time tracking.
//!
//! The tracked map holds the accumulated waiting time of every car
//! currently on an incoming road; a car that clears the intersection is
//! dropped from it, so the sum reflects the cars the controller can still
//! influence.  The tracker is owned by the episode context and cleared at
//! episode start — never ambient state.

use std::collections::HashMap;

use tlc_core::Topology;

use crate::{SimResult, TrafficSim};

#[derive(Default)]
pub struct WaitingTimeTracker {
    /// Cars currently on an incoming road → accumulated waiting seconds.
    tracked: HashMap<String, f64>,
    /// Every car ever seen on an incoming road → last known waiting
    /// seconds.  Kept for end-of-run reporting.
    all_cars: HashMap<String, f64>,
}

impl WaitingTimeTracker {
    pub fn new() -> WaitingTimeTracker {
        Self::default()
    }

    /// Refresh the map from the simulator and return the total waiting
    /// time over cars currently on incoming roads.
    pub fn collect<S: TrafficSim>(&mut self, sim: &S, topology: &Topology) -> SimResult<f64> {
        for car in sim.vehicle_ids()? {
            let road = sim.vehicle_road(&car)?;
            if topology.is_incoming_road(&road) {
                let wait = sim.accumulated_waiting_time(&car)?;
                self.all_cars.insert(car.clone(), wait);
                self.tracked.insert(car, wait);
            } else {
                // A tracked car has cleared the intersection.
                self.tracked.remove(&car);
            }
        }
        Ok(self.tracked.values().sum())
    }

    /// Number of cars currently tracked on incoming roads.
    pub fn tracked_count(&self) -> usize {
        self.tracked.len()
    }

    /// Final waiting time of every car that ever entered an incoming road.
    pub fn all_waiting_times(&self) -> Vec<f64> {
        self.all_cars.values().copied().collect()
    }

    /// Reset both maps for a fresh episode.
    pub fn clear(&mut self) {
        self.tracked.clear();
        self.all_cars.clear();
    }
}

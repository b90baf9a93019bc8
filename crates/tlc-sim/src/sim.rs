//! The external-simulator boundary.

use crate::SimResult;

/// One opaque stepped traffic simulation.
///
/// The production implementation speaks to a microscopic simulator over
/// its remote-control protocol; tests use in-memory models.  The framework
/// touches nothing beyond this query/command surface, and every call is
/// synchronous — one `step` advances the simulator's internal model
/// atomically, and no other operation interleaves with it.
pub trait TrafficSim {
    /// Advance the simulation by one step (one simulated second).
    fn step(&mut self) -> SimResult<()>;

    /// Set a junction's signal program to the given phase code.
    fn set_phase(&mut self, junction: &str, phase_code: u32) -> SimResult<()>;

    /// Tear down the connection.  Called once at episode end.
    fn close(&mut self) -> SimResult<()>;

    // ── Queries ───────────────────────────────────────────────────────────

    /// Ids of all vehicles currently in the network.
    fn vehicle_ids(&self) -> SimResult<Vec<String>>;

    /// Seconds this vehicle has spent waiting since it spawned.
    fn accumulated_waiting_time(&self, vehicle: &str) -> SimResult<f64>;

    /// The road (edge) the vehicle is currently on.
    fn vehicle_road(&self, vehicle: &str) -> SimResult<String>;

    /// The vehicle's edge and its distance to the stop line, metres.
    fn vehicle_position(&self, vehicle: &str) -> SimResult<(String, f64)>;

    /// Vehicles with speed ≈ 0 on a lane.
    fn lane_halting_count(&self, lane: &str) -> SimResult<u32>;

    /// Vehicles with speed ≈ 0 on an edge.
    fn edge_halting_count(&self, edge: &str) -> SimResult<u32>;

    /// CO2 emitted on an edge during the last step, milligrams.
    fn edge_co2(&self, edge: &str) -> SimResult<f64>;

    /// Fuel consumed on an edge during the last step, millilitres.
    fn edge_fuel(&self, edge: &str) -> SimResult<f64>;
}

//! `tlc-demand` — vehicle-arrival synthesis for the rust_tlc framework.
//!
//! Each episode is driven by a freshly generated arrival stream: per-second
//! arrival counts drawn from a Poisson distribution at the configured mean
//! rate, with each vehicle's route sampled by a random walk over a
//! calibrated route-choice graph.  Generation is fully deterministic in the
//! seed — the training session reuses the episode index as the seed so any
//! episode can be replayed bit-identically.
//!
//! The generated stream is written as a SUMO-compatible `.rou.xml` routes
//! document, valid input to the simulator's own route-loading stage.

pub mod error;
pub mod generator;
pub mod graph;
pub mod route_file;


pub use error::{DemandError, DemandResult};
pub use generator::{TrafficGenerator, VehicleClass, VehicleSpawnEvent};
pub use graph::{Branch, DemandGraph};
pub use route_file::{write_route_file, write_routes};

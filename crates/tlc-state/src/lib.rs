//! `tlc-state` — intersection-state encoding for the rust_tlc framework.
//!
//! A [`StateEncoder`] compresses a raw simulator snapshot into the
//! fixed-length feature vector the value function consumes.  Two policies
//! are provided, selected by configuration:
//!
//! - [`AggregateEncoder`] — one slot per lane group, value = number of
//!   halted vehicles across the group's lanes.
//! - [`PositionalEncoder`] — a binary occupancy grid over
//!   (lane group × distance-to-stop-line bucket) cells.
//!
//! Both encoders fix their vector length at construction against the
//! statically declared state dimension; a mismatch is a fatal configuration
//! error, never a runtime adjustment.

pub mod encoder;
pub mod error;
pub mod snapshot;

#[cfg(test)]
mod tests;

pub use encoder::{AggregateEncoder, PositionalEncoder, StateEncoder};
pub use error::{StateError, StateResult};
pub use snapshot::{IntersectionSnapshot, VehicleObs};

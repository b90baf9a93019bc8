//! `tlc-signal` — phase-transition planning for the rust_tlc framework.
//!
//! At each decision point the controller receives the previously applied
//! action and the newly chosen one and emits a [`PhasePlan`]: the ordered
//! sequence of set-phase commands and simulate-step counts that realizes
//! the transition.  Planning is pure — the episode runner executes the plan
//! against the simulator boundary.
//!
//! ```text
//! prev == next (or first decision):
//!   [greens, green_duration steps]
//!
//! prev != next:
//!   [yellows for changed junctions + new greens for unchanged, yellow_duration steps]
//!   [new greens for all junctions,  green_duration − yellow_duration steps]
//! ```
//!
//! Either way the plan advances the simulator exactly `green_duration`
//! steps: the yellow interval is carved out of the green interval.

pub mod controller;
pub mod error;

#[cfg(test)]
mod tests;

pub use controller::{PhaseController, PhasePlan, PhaseSegment};
pub use error::{SignalError, SignalResult};

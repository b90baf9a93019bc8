//! `tlc-sim` — episode orchestration for the rust_tlc framework.
//!
//! # Decision-point loop
//!
//! ```text
//! while step < max_steps:
//!   ① Snapshot — query lane halting counts and vehicle positions.
//!   ② Encode   — StateEncoder → fixed-length state vector.
//!   ③ Reward   — old metric − current metric (waiting-time or queue delta).
//!   ④ Record   — push (old_state, old_action, reward, state) into replay
//!                memory (training runs only, never at step 0).
//!   ⑤ Choose   — ActionPolicy picks the next action.
//!   ⑥ Realize  — PhaseController plan: set phases, advance the simulator,
//!                accumulating per-step queue / waiting / emission stats.
//! ```
//!
//! One runner serves training, evaluation, and the fixed-cycle baseline;
//! the policy object and the optional replay memory are the only
//! differences (composition, not subclassing).  Everything is
//! single-threaded and strictly sequential: one simulator connection, one
//! memory writer, and training happens only after the episode's simulation
//! has fully completed.

pub mod episode;
pub mod error;
pub mod observer;
pub mod reward;
pub mod session;
pub mod sim;
pub mod stats;
pub mod waiting;

#[cfg(test)]
mod tests;

pub use episode::EpisodeRunner;
pub use error::{EpisodeError, EpisodeResult, SimError, SimResult};
pub use observer::{EpisodeObserver, NoopObserver};
pub use reward::RewardKind;
pub use session::{SimLauncher, TrainingSession};
pub use sim::TrafficSim;
pub use stats::EpisodeStats;
pub use waiting::WaitingTimeTracker;

//! `tlc-core` — foundational types for the `rust_tlc` traffic-signal
//! control framework.
//!
//! This crate is a dependency of every other `tlc-*` crate.  It intentionally
//! has no `tlc-*` dependencies and minimal external ones (only `rand`,
//! `thiserror`, and `serde`/`serde_json` for the topology document).
//!
//! # What lives here
//!
//! | Module       | Contents                                             |
//! |--------------|------------------------------------------------------|
//! | [`ids`]      | `ActionId`, `GroupId`                                |
//! | [`rng`]      | `SimRng` — deterministic seeded RNG                  |
//! | [`config`]   | `RunConfig` + startup validation                     |
//! | [`topology`] | `Topology` — junctions, roads, lane groups           |
//! | [`action`]   | `ActionTable` — discrete action ↔ phase-code mapping |
//! | [`error`]    | `TlcError`, `TlcResult`                              |

pub mod action;
pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod topology;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use action::ActionTable;
pub use config::RunConfig;
pub use error::{TlcError, TlcResult};
pub use ids::{ActionId, GroupId};
pub use rng::SimRng;
pub use topology::{Junction, Topology};

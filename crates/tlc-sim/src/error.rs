use thiserror::Error;

use tlc_core::TlcError;
use tlc_demand::DemandError;
use tlc_signal::SignalError;

/// Failures at the simulator boundary.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulator connection failed: {0}")]
    Connection(String),

    #[error("simulator query failed: {0}")]
    Query(String),

    #[error("simulator command failed: {0}")]
    Command(String),

    #[error("unknown simulator id: {0}")]
    UnknownId(String),
}

pub type SimResult<T> = Result<T, SimError>;

/// Failures while running an episode or a session.
#[derive(Debug, Error)]
pub enum EpisodeError {
    /// A simulator-boundary failure.  Fatal for the current episode; the
    /// step index tells the caller how far the episode got.
    #[error("episode aborted at step {step}: {source}")]
    Aborted {
        step: u32,
        #[source]
        source: SimError,
    },

    #[error(transparent)]
    Signal(#[from] SignalError),

    #[error(transparent)]
    Demand(#[from] DemandError),

    #[error(transparent)]
    Core(#[from] TlcError),
}

pub type EpisodeResult<T> = Result<T, EpisodeError>;

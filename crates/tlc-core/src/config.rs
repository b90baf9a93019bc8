//! Run configuration and startup validation.
//!
//! Invalid parameter combinations are rejected here, before any route file
//! is written or any simulator is launched.  Notably `yellow_duration` must
//! be strictly smaller than `green_duration`: the yellow interval is carved
//! out of the green interval at each decision point, so an equal or larger
//! value would leave zero or negative green time.

use serde::Deserialize;

use crate::{TlcError, TlcResult};

/// Top-level run configuration.
///
/// Typically loaded from a JSON file by the application crate and validated
/// once with [`RunConfig::validate`] before the first episode.
#[derive(Clone, Debug, Deserialize)]
pub struct RunConfig {
    /// Simulated seconds per episode (one simulator step = one second).
    pub max_steps: u32,

    /// Length of one green interval, in simulated seconds.  Also the spacing
    /// between decision points.
    pub green_duration: u32,

    /// Length of the yellow interval inserted when the chosen phase changes.
    /// Carved out of `green_duration`, never added to it.
    pub yellow_duration: u32,

    /// Discount factor for the one-step TD target.
    pub gamma: f64,

    /// Replay memory: below this many stored transitions, sampling returns
    /// an empty batch and training is a no-op.
    pub memory_size_min: usize,

    /// Replay memory capacity.  Insertion beyond it evicts the oldest entry.
    pub memory_size_max: usize,

    /// Replay passes run after each training episode.
    pub training_epochs: u32,

    /// Total training episodes in a session.  Also drives the epsilon
    /// schedule `1 - episode / total_episodes`.
    pub total_episodes: u32,

    /// Vehicles generated per episode by the demand generator.
    pub n_cars_generated: u32,

    /// Demand horizon in seconds — arrivals are spread over this window.
    pub horizon_secs: u32,

    /// Master RNG seed.  Per-episode streams are derived from it.
    pub seed: u64,
}

impl RunConfig {
    /// Check all numeric invariants.  Called once at startup; any violation
    /// is fatal (no partial run).
    pub fn validate(&self) -> TlcResult<()> {
        if self.max_steps == 0 {
            return Err(TlcError::Config("max_steps must be positive".into()));
        }
        if self.green_duration == 0 {
            return Err(TlcError::Config("green_duration must be positive".into()));
        }
        if self.yellow_duration >= self.green_duration {
            return Err(TlcError::Config(format!(
                "yellow_duration ({}) must be strictly less than green_duration ({})",
                self.yellow_duration, self.green_duration
            )));
        }
        if !(0.0..=1.0).contains(&self.gamma) {
            return Err(TlcError::Config(format!(
                "gamma must be in [0, 1], got {}",
                self.gamma
            )));
        }
        if self.memory_size_min > self.memory_size_max {
            return Err(TlcError::Config(format!(
                "memory_size_min ({}) exceeds memory_size_max ({})",
                self.memory_size_min, self.memory_size_max
            )));
        }
        if self.memory_size_max == 0 {
            return Err(TlcError::Config("memory_size_max must be positive".into()));
        }
        if self.n_cars_generated == 0 {
            return Err(TlcError::Config("n_cars_generated must be positive".into()));
        }
        if self.horizon_secs == 0 {
            return Err(TlcError::Config("horizon_secs must be positive".into()));
        }
        if self.total_episodes == 0 {
            return Err(TlcError::Config("total_episodes must be positive".into()));
        }
        Ok(())
    }

    /// Green time remaining after a yellow interval.  Positive by
    /// construction once [`validate`](Self::validate) has passed.
    #[inline]
    pub fn green_after_yellow(&self) -> u32 {
        self.green_duration - self.yellow_duration
    }
}

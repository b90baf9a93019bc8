//! Episode observer trait for progress reporting and data collection.

use tlc_core::ActionId;

use crate::EpisodeStats;

/// Callbacks invoked by [`EpisodeRunner::run`][crate::EpisodeRunner::run]
/// at key points in the decision loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
pub trait EpisodeObserver {
    /// Called at every decision point, after the action is chosen.
    ///
    /// `reward` is the reward credited to the *previous* action; it is 0.0
    /// at the first decision point, which has no previous action.
    fn on_decision(&mut self, _step: u32, _action: ActionId, _reward: f64) {}

    /// Called after every simulated step with that step's queue length.
    fn on_step(&mut self, _step: u32, _queue_length: u32) {}

    /// Called once when the episode finishes normally.
    fn on_episode_end(&mut self, _episode: u32, _stats: &EpisodeStats) {}
}

/// An [`EpisodeObserver`] that does nothing.  Use when you need to run an
/// episode but don't want progress callbacks.
pub struct NoopObserver;

impl EpisodeObserver for NoopObserver {}

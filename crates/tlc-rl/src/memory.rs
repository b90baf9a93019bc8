//! Bounded experience-replay memory.
//!
//! A plain FIFO ring: insertion beyond capacity evicts the oldest
//! transition.  Sampling is uniform without replacement — no priorities,
//! no recency weighting.  Below the configured minimum fill, sampling
//! returns an empty batch so early-episode training steps are silent
//! no-ops rather than errors.

use std::collections::VecDeque;

use rand::seq::index::sample;

use tlc_core::{ActionId, SimRng};

/// One experience tuple, immutable once stored.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub state:      Vec<f64>,
    pub action:     ActionId,
    pub reward:     f64,
    pub next_state: Vec<f64>,
}

/// Size-bounded FIFO store of [`Transition`]s.
pub struct ReplayMemory {
    samples:  VecDeque<Transition>,
    min_size: usize,
    max_size: usize,
}

impl ReplayMemory {
    /// `min_size` gates sampling; `max_size` caps storage.  The caller
    /// (`RunConfig::validate`) has already rejected `min_size > max_size`.
    pub fn new(min_size: usize, max_size: usize) -> ReplayMemory {
        ReplayMemory {
            samples: VecDeque::with_capacity(max_size.min(1 << 20)),
            min_size,
            max_size,
        }
    }

    /// Append a transition, evicting the oldest if the memory is full.
    pub fn add_sample(&mut self, transition: Transition) {
        if self.samples.len() == self.max_size {
            self.samples.pop_front();
        }
        self.samples.push_back(transition);
    }

    /// Uniform sample of `min(n, len)` distinct transitions.
    ///
    /// Returns an empty batch while the memory holds fewer than `min_size`
    /// transitions.
    pub fn get_samples(&self, n: usize, rng: &mut SimRng) -> Vec<&Transition> {
        if self.samples.len() < self.min_size || n == 0 {
            return vec![];
        }
        let amount = n.min(self.samples.len());
        sample(rng.inner(), self.samples.len(), amount)
            .iter()
            .map(|i| &self.samples[i])
            .collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Oldest-first iteration, mainly for tests and diagnostics.
    pub fn iter(&self) -> impl Iterator<Item = &Transition> {
        self.samples.iter()
    }
}

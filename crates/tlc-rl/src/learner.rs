//! One-step TD target computation and the batch train call.

use tlc_core::SimRng;

use crate::value::argmax;
use crate::{ReplayMemory, ValueFunction};

/// Computes training targets from replayed experience and drives the
/// approximator's batch update.
pub struct Learner {
    gamma: f64,
}

impl Learner {
    pub fn new(gamma: f64) -> Learner {
        Learner { gamma }
    }

    #[inline]
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Run one replay pass: sample a batch, compute sparse TD targets, and
    /// submit one batched train call.
    ///
    /// The target row for each sample starts from the approximator's own
    /// `Q(state)` prediction; only the taken action's entry is corrected to
    /// `reward + gamma * max(Q(next_state))`.  An under-filled memory
    /// yields an empty batch and the pass is a silent no-op.
    ///
    /// Returns the number of samples trained on.
    pub fn replay<V: ValueFunction>(
        &self,
        memory: &ReplayMemory,
        model:  &mut V,
        rng:    &mut SimRng,
    ) -> usize {
        let batch = memory.get_samples(model.batch_size(), rng);
        if batch.is_empty() {
            return 0;
        }

        let states: Vec<&[f64]> = batch.iter().map(|t| t.state.as_slice()).collect();
        let next_states: Vec<&[f64]> = batch.iter().map(|t| t.next_state.as_slice()).collect();

        // One batched predict call per side.
        let q_current = model.predict_batch(&states);
        let q_next = model.predict_batch(&next_states);

        let targets: Vec<Vec<f64>> = batch
            .iter()
            .zip(q_current)
            .zip(&q_next)
            .map(|((transition, mut target), next)| {
                let best_next = next[argmax(next)];
                target[transition.action.index()] = transition.reward + self.gamma * best_next;
                target
            })
            .collect();

        model.train_batch(&states, &targets);
        batch.len()
    }
}

//! Action-selection strategies.
//!
//! One episode runner serves training, evaluation, and the baseline; which
//! of the three a run is comes down to the policy object plugged into it,
//! not a subclass.

use tlc_core::{ActionId, SimRng};

use crate::value::argmax;
use crate::ValueFunction;

/// Chooses the next action at each decision point.
pub trait ActionPolicy {
    fn choose<V: ValueFunction>(
        &mut self,
        state: &[f64],
        model: &V,
        rng:   &mut SimRng,
    ) -> ActionId;
}

// ── Epsilon-greedy ────────────────────────────────────────────────────────────

/// Explore uniformly with probability `epsilon`, otherwise exploit the
/// model's argmax.  The per-episode epsilon schedule lives in the training
/// session; the policy holds the current value.
pub struct EpsilonGreedy {
    pub epsilon: f64,
}

impl EpsilonGreedy {
    pub fn new(epsilon: f64) -> EpsilonGreedy {
        EpsilonGreedy { epsilon }
    }
}

impl ActionPolicy for EpsilonGreedy {
    fn choose<V: ValueFunction>(
        &mut self,
        state: &[f64],
        model: &V,
        rng:   &mut SimRng,
    ) -> ActionId {
        if rng.random::<f64>() < self.epsilon {
            ActionId(rng.gen_range(0..model.num_actions() as u16))
        } else {
            ActionId(argmax(&model.predict(state)) as u16)
        }
    }
}

// ── Greedy ────────────────────────────────────────────────────────────────────

/// Pure exploitation — evaluation runs.
pub struct Greedy;

impl ActionPolicy for Greedy {
    fn choose<V: ValueFunction>(
        &mut self,
        state: &[f64],
        model: &V,
        _rng:  &mut SimRng,
    ) -> ActionId {
        ActionId(argmax(&model.predict(state)) as u16)
    }
}

// ── Fixed cycle ───────────────────────────────────────────────────────────────

/// Round-robin over the whole action table, ignoring the state — the
/// traditional fixed-timing signal program used as a comparison baseline.
pub struct FixedCycle {
    num_actions: usize,
    next:        usize,
}

impl FixedCycle {
    pub fn new(num_actions: usize) -> FixedCycle {
        FixedCycle { num_actions, next: 0 }
    }
}

impl ActionPolicy for FixedCycle {
    fn choose<V: ValueFunction>(
        &mut self,
        _state: &[f64],
        _model: &V,
        _rng:   &mut SimRng,
    ) -> ActionId {
        let action = ActionId(self.next as u16);
        self.next = (self.next + 1) % self.num_actions;
        action
    }
}

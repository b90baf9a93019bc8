//! The approximator boundary.

/// An opaque action-value function over fixed-size vectors.
///
/// Production runs back this with a neural network; tests use hand-rolled
/// stubs.  The learner only ever calls the batched entry points, one
/// predict call per batch side.
pub trait ValueFunction {
    /// Input vector length.  Must match the encoder's `state_dim`.
    fn state_dim(&self) -> usize;

    /// Output vector length — one Q value per action.
    fn num_actions(&self) -> usize;

    /// Preferred training batch size.
    fn batch_size(&self) -> usize;

    /// Q values for a single state.
    fn predict(&self, state: &[f64]) -> Vec<f64>;

    /// Q values for a batch of states, one output row per input row.
    fn predict_batch(&self, states: &[&[f64]]) -> Vec<Vec<f64>> {
        states.iter().map(|s| self.predict(s)).collect()
    }

    /// Fit the approximator towards `targets` (one row per state).
    fn train_batch(&mut self, states: &[&[f64]], targets: &[Vec<f64>]);
}

/// Index of the maximum entry; ties resolve to the first.  Empty slices
/// return 0 — callers guarantee at least one action.
pub fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > values[best] {
            best = i;
        }
    }
    best
}

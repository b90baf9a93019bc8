//! A linear Q approximator — one weight row per action, plus a bias term.
//!
//! Stands in for the neural network a production run would use; plenty for
//! the two-group aggregate state of this demo.

use tlc_rl::ValueFunction;

pub struct LinearQ {
    weights:       Vec<Vec<f64>>,
    state_dim:     usize,
    batch_size:    usize,
    learning_rate: f64,
}

impl LinearQ {
    pub fn new(state_dim: usize, num_actions: usize, batch_size: usize, learning_rate: f64) -> LinearQ {
        LinearQ {
            weights: vec![vec![0.0; state_dim + 1]; num_actions],
            state_dim,
            batch_size,
            learning_rate,
        }
    }

    fn q(&self, action: usize, state: &[f64]) -> f64 {
        let w = &self.weights[action];
        let bias = w[self.state_dim];
        state.iter().zip(w).map(|(x, wi)| x * wi).sum::<f64>() + bias
    }
}

impl ValueFunction for LinearQ {
    fn state_dim(&self) -> usize {
        self.state_dim
    }

    fn num_actions(&self) -> usize {
        self.weights.len()
    }

    fn batch_size(&self) -> usize {
        self.batch_size
    }

    fn predict(&self, state: &[f64]) -> Vec<f64> {
        (0..self.weights.len()).map(|a| self.q(a, state)).collect()
    }

    fn train_batch(&mut self, states: &[&[f64]], targets: &[Vec<f64>]) {
        for (state, target_row) in states.iter().zip(targets) {
            for (action, &target) in target_row.iter().enumerate() {
                let error = target - self.q(action, state);
                let step = self.learning_rate * error;
                let w = &mut self.weights[action];
                for (wi, x) in w.iter_mut().zip(state.iter()) {
                    *wi += step * x;
                }
                w[self.state_dim] += step;
            }
        }
    }
}

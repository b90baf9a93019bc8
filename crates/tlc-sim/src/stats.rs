//! Per-episode statistics accumulation.

/// Everything an episode records, for summary rows and post-run analysis.
#[derive(Clone, Debug, Default)]
pub struct EpisodeStats {
    /// Steps actually simulated (== max_steps unless aborted early).
    pub steps: u32,
    /// Decision points taken.
    pub decisions: u32,
    /// Sum of the negative rewards only — the "how much did waiting grow"
    /// signal used to track training progress.
    pub sum_neg_reward: f64,
    /// Total queued-vehicle count summed over every step.
    pub sum_queue_length: u64,
    /// Total seconds waited by queued cars.  One step spent queued is one
    /// second waited per car, so this accumulates the queue length too.
    pub sum_waiting_time: u64,
    /// Queue length at every simulated step.
    pub queue_series: Vec<u32>,
    /// Reward at every decision point after the first.
    pub reward_series: Vec<f64>,
    /// Per-step CO2 across incoming roads, milligrams.
    pub co2_series: Vec<f64>,
    /// Per-step fuel across incoming roads, millilitres.
    pub fuel_series: Vec<f64>,
}

impl EpisodeStats {
    pub fn new() -> EpisodeStats {
        Self::default()
    }

    /// Record one decision-point reward (not called for the first decision,
    /// which has no previous action to reward).
    pub fn record_reward(&mut self, reward: f64) {
        self.reward_series.push(reward);
        if reward < 0.0 {
            self.sum_neg_reward += reward;
        }
    }

    /// Record one simulated step's metrics.
    pub fn record_step(&mut self, queue_length: u32, co2: f64, fuel: f64) {
        self.steps += 1;
        self.sum_queue_length += u64::from(queue_length);
        self.sum_waiting_time += u64::from(queue_length);
        self.queue_series.push(queue_length);
        self.co2_series.push(co2);
        self.fuel_series.push(fuel);
    }

    /// Mean queue length per step.
    pub fn avg_queue_length(&self) -> f64 {
        if self.steps == 0 {
            0.0
        } else {
            self.sum_queue_length as f64 / f64::from(self.steps)
        }
    }
}

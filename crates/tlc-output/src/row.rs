//! Plain data row types written by output backends.

/// One finished episode's summary statistics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeSummaryRow {
    pub episode:          u32,
    /// Steps actually simulated.
    pub steps:            u32,
    /// Decision points taken.
    pub decisions:        u32,
    /// Sum of the negative rewards — the training-progress signal.
    pub sum_neg_reward:   f64,
    pub avg_queue_length: f64,
    /// Total seconds waited by queued cars over the whole episode.
    pub sum_waiting_time: u64,
    /// Total CO2 across incoming roads over the whole episode, milligrams.
    pub total_co2_mg:     f64,
    /// Total fuel across incoming roads over the whole episode, millilitres.
    pub total_fuel_ml:    f64,
}

/// One simulated step's metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepMetricsRow {
    pub episode:      u32,
    pub step:         u32,
    pub queue_length: u32,
}

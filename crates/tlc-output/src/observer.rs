//! `StatsObserver<W>` — bridges `EpisodeObserver` to a `StatsWriter`.

use tlc_sim::{EpisodeObserver, EpisodeStats};

use crate::row::{EpisodeSummaryRow, StepMetricsRow};
use crate::writer::StatsWriter;
use crate::OutputError;

/// An [`EpisodeObserver`] that writes step metrics and episode summaries to
/// any [`StatsWriter`] backend.
///
/// Step rows are buffered per episode and flushed as one batch when the
/// episode ends, tagged with that episode's index.  Errors from the writer
/// are stored internally because `EpisodeObserver` methods have no return
/// value.  After the session returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct StatsObserver<W: StatsWriter> {
    writer:       W,
    pending_rows: Vec<StepMetricsRow>,
    last_error:   Option<OutputError>,
}

impl<W: StatsWriter> StatsObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pending_rows: vec![],
            last_error:   None,
        }
    }

    /// Take the stored write error (if any) after the session returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Flush the backend.  Call once after the last episode.
    pub fn finish(&mut self) {
        let result = self.writer.finish();
        self.store_err(result);
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: crate::OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: StatsWriter> EpisodeObserver for StatsObserver<W> {
    fn on_step(&mut self, step: u32, queue_length: u32) {
        // Episode index is unknown until on_episode_end; filled in there.
        self.pending_rows.push(StepMetricsRow {
            episode: 0,
            step,
            queue_length,
        });
    }

    fn on_episode_end(&mut self, episode: u32, stats: &EpisodeStats) {
        for row in &mut self.pending_rows {
            row.episode = episode;
        }
        let rows = std::mem::take(&mut self.pending_rows);
        if !rows.is_empty() {
            let result = self.writer.write_step_rows(&rows);
            self.store_err(result);
        }

        let summary = EpisodeSummaryRow {
            episode,
            steps:            stats.steps,
            decisions:        stats.decisions,
            sum_neg_reward:   stats.sum_neg_reward,
            avg_queue_length: stats.avg_queue_length(),
            sum_waiting_time: stats.sum_waiting_time,
            total_co2_mg:     stats.co2_series.iter().sum(),
            total_fuel_ml:    stats.fuel_series.iter().sum(),
        };
        let result = self.writer.write_summary(&summary);
        self.store_err(result);
    }
}

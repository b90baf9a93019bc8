//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `episode_summaries.csv`
//! - `step_metrics.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::StatsWriter;
use crate::{EpisodeSummaryRow, OutputResult, StepMetricsRow};

/// Writes run output to two CSV files.
pub struct CsvStatsWriter {
    summaries: Writer<File>,
    steps:     Writer<File>,
    finished:  bool,
}

impl CsvStatsWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut summaries = Writer::from_path(dir.join("episode_summaries.csv"))?;
        summaries.write_record([
            "episode",
            "steps",
            "decisions",
            "sum_neg_reward",
            "avg_queue_length",
            "sum_waiting_time",
            "total_co2_mg",
            "total_fuel_ml",
        ])?;

        let mut steps = Writer::from_path(dir.join("step_metrics.csv"))?;
        steps.write_record(["episode", "step", "queue_length"])?;

        Ok(Self {
            summaries,
            steps,
            finished: false,
        })
    }
}

impl StatsWriter for CsvStatsWriter {
    fn write_step_rows(&mut self, rows: &[StepMetricsRow]) -> OutputResult<()> {
        for row in rows {
            self.steps.write_record(&[
                row.episode.to_string(),
                row.step.to_string(),
                row.queue_length.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_summary(&mut self, row: &EpisodeSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.episode.to_string(),
            row.steps.to_string(),
            row.decisions.to_string(),
            row.sum_neg_reward.to_string(),
            row.avg_queue_length.to_string(),
            row.sum_waiting_time.to_string(),
            row.total_co2_mg.to_string(),
            row.total_fuel_ml.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.summaries.flush()?;
        self.steps.flush()?;
        Ok(())
    }
}

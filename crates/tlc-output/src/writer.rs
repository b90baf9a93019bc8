//! The `StatsWriter` trait implemented by all backend writers.

use crate::{EpisodeSummaryRow, OutputResult, StepMetricsRow};

/// Trait implemented by output backends.
///
/// All methods are infallible from the observer's perspective — errors are
/// stored internally and retrieved with [`StatsObserver::take_error`].
///
/// [`StatsObserver::take_error`]: crate::StatsObserver::take_error
pub trait StatsWriter {
    /// Write a batch of per-step metric rows.
    fn write_step_rows(&mut self, rows: &[StepMetricsRow]) -> OutputResult<()>;

    /// Write one episode summary row.
    fn write_summary(&mut self, row: &EpisodeSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}

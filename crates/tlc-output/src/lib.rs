//! `tlc-output` — run output writers for the rust_tlc framework.
//!
//! The CSV backend creates two files in the output directory:
//!
//! | File                    | Contents                                  |
//! |-------------------------|-------------------------------------------|
//! | `episode_summaries.csv` | One row per finished episode              |
//! | `step_metrics.csv`      | One row per simulated step (queue length) |
//!
//! The backend implements [`StatsWriter`] and is driven by
//! [`StatsObserver`], which implements `tlc_sim::EpisodeObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use tlc_output::{CsvStatsWriter, StatsObserver};
//!
//! let writer = CsvStatsWriter::new(Path::new("./output"))?;
//! let mut obs = StatsObserver::new(writer);
//! session.train(&mut launcher, &encoder, &mut model, &mut obs)?;
//! obs.finish();
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvStatsWriter;
pub use error::{OutputError, OutputResult};
pub use observer::StatsObserver;
pub use row::{EpisodeSummaryRow, StepMetricsRow};
pub use writer::StatsWriter;

//! Data layer for loghist.
//!
//! Reads access-log lines from disk, aggregates them into an hour-of-day
//! histogram and runs the top-level analysis pipeline.

pub mod aggregator;
pub mod analysis;
pub mod histogram;
pub mod reader;

pub use aggregator::HourlyAggregator;
pub use histogram::HourlyHistogram;
pub use loghist_core as core;
pub use reader::LogSource;

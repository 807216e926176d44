#![forbid(unsafe_code)]
//! airlift-io: load the airport emissions CSV into an immutable `Dataset`
//! and write filtered rows back out (CSV or NDJSON).
//!
//! Loading happens once per process; nothing here is on the per-interaction
//! path.

pub mod error;
pub mod readers;
pub mod writers;

pub use error::{Error, Result};
pub use readers::csv::{load_dataset, parse_dataset, CsvDatasetReader};
pub use writers::{csv::CsvWriter, jsonl::JsonlWriter};

//! Operator trait + common interfaces.
//!
//! A filter pass is a chain of `RowOperator`s, each narrowing the rows left
//! by the previous one. Operators never reorder rows.

use airlift_core::types::AirportRecord;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OpError {
    #[error("unknown ranking key '{0}'")]
    UnknownKey(String),
}

/// A narrowing stage over borrowed rows.
///
/// Invariants:
/// - The output is a subsequence of the input (same relative order).
/// - `apply` is deterministic given the same input.
pub trait RowOperator {
    /// Human-readable operator name (stable; used in logs).
    fn name(&self) -> &'static str;

    /// Keep only the rows this stage admits.
    fn apply<'a>(&self, rows: Vec<&'a AirportRecord>) -> Vec<&'a AirportRecord>;
}

#![forbid(unsafe_code)]
//! airlift: facade over the workspace crates.
//!
//! Downstream users who want the whole engine can depend on this crate and
//! reach each layer through its re-export.

pub use airlift_core as core;
pub use airlift_exec as exec;
pub use airlift_io as io;
pub use airlift_operators as operators;
pub use airlift_query as query;

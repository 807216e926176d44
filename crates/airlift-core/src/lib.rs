#![forbid(unsafe_code)]
//! airlift-core: records, schema, filter selections, configuration, and
//! content digests shared by every AIRLIFT crate.
//!
//! Nothing in here performs I/O. The loader lives in `airlift-io` and the
//! pure operations in `airlift-operators`.

pub mod config;
pub mod error;
pub mod hash;
pub mod id;
pub mod prelude;
pub mod schema;
pub mod selection;
pub mod types;

/// Engine version string, stamped into rendered views.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#![forbid(unsafe_code)]
//! airlift-query: YAML view request → `FilterSelection` + ranking options
//! + `DashboardConfig` overrides.
//!
//! The request is what the sidebar would produce in one interaction, written
//! down so the CLI and tests can replay it.

pub mod dsl;
pub mod error;

pub use dsl::yaml::{
    apply_config_overrides, parse_yaml_request, ConfigOverrides, FilterSpec, ParsedRequest,
    RankSpec, ViewRequest,
};
pub use error::QueryError;

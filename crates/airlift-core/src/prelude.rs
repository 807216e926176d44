//! Convenient re-exports for downstream crates.

pub use crate::config::DashboardConfig;
pub use crate::error::{Error, Result};
pub use crate::hash::Hash256;
pub use crate::id::{RowId, SessionId};
pub use crate::schema::{Column, DatasetVariant, Schema};
pub use crate::selection::{Constraint, Dimension, FilterSelection, ALL_SENTINEL};
pub use crate::types::{AirportRecord, Dataset, GeoPoint, Pollutant};

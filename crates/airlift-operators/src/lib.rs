#![forbid(unsafe_code)]
//! airlift-operators: the filter-and-aggregate engine.
//!
//! Design intent:
//! - Every public function here is pure: no I/O, no clocks, no globals.
//! - Operators borrow rows from the immutable dataset and return borrowed
//!   subsets in original row order; nothing is cloned until a view is built.
//! - Presentation rounding (integer truncation, thousands separators) only
//!   happens in the `*Table`/`Popup` types, never in the sums themselves.

pub mod aggregate;
pub mod filter;
pub mod map;
pub mod rank;
pub mod traits;

pub use aggregate::{compute_summary, format_thousands, Summary, SummaryRow, SummaryTable};
pub use filter::{apply_filters, filter_options, DimensionFilter, FilterOptions};
pub use map::{
    build_markers, compute_bounds, compute_map_center, MapBounds, Marker, Popup, FALLBACK_CENTER,
};
pub use rank::{top_n, RankKey};
pub use traits::{OpError, RowOperator};

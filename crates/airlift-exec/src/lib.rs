#![forbid(unsafe_code)]
//! airlift-exec: the dashboard event handler, the typed view payload it
//! produces, per-session state, and the visit-counter client.
//!
//! Everything here is synchronous. A filter change recomputes the view in
//! full; the panel diff tells the presentation layer what to redraw.

pub mod counter;
pub mod error;
pub mod metrics;
pub mod runtime;
pub mod session;
pub mod view;

pub use counter::{CounterError, CounterService, CounterStatus, HttpCounter};
pub use error::ExecError;
pub use runtime::{Dashboard, ViewUpdate};
pub use session::Session;
pub use view::{
    DataPartner, MapPanel, Panel, SummaryPanel, TopEntry, TopPanel, View, NO_DATA_NOTICE,
};

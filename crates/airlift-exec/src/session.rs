//! Per-session state.
//!
//! A session is one visitor's tab. It carries the "already counted" flag so
//! re-renders inside the same session never bump the visit counter twice.

use serde::{Deserialize, Serialize};

use airlift_core::id::SessionId;

use crate::counter::{CounterService, CounterStatus};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    /// Set after the first successful increment; never cleared.
    pub counted: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: SessionId::random(),
            counted: false,
        }
    }

    /// Count this visit (once per session) and report the total.
    ///
    /// `None` means no counter credential: nothing is called. A failed
    /// increment leaves the flag unset so the next visit retries; a failed
    /// read degrades to `Unavailable`.
    pub fn visit(&mut self, counter: Option<&dyn CounterService>) -> CounterStatus {
        let Some(counter) = counter else {
            return CounterStatus::Unconfigured;
        };

        if !self.counted {
            match counter.increment() {
                Ok(()) => {
                    self.counted = true;
                    tracing::debug!(session = %self.id, "visit counted");
                }
                Err(e) => tracing::warn!(session = %self.id, error = %e, "visit counter increment failed"),
            }
        }

        match counter.current() {
            Ok(visits) => CounterStatus::Count { visits },
            Err(e) => {
                tracing::warn!(session = %self.id, error = %e, "visit counter read failed");
                CounterStatus::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
    }
}

//! Dashboard configuration that downstream crates can serialize/deserialize.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Bundled CSV loaded once at startup.
    pub data_path: String,

    /// Zoom used when no country is selected.
    pub world_zoom: u8,

    /// Zoom used once a country constraint is active.
    pub country_zoom: u8,

    /// Zoom clamp handed to the map widget.
    pub min_zoom: u8,
    pub max_zoom: u8,

    /// Length of the busiest-airports ranking.
    pub top_n: usize,

    /// Counter service root, e.g. `https://api.counterapi.dev/v2`.
    pub counter_base_url: String,
    pub counter_namespace: String,
    pub counter_name: String,
    pub counter_timeout_ms: u64,

    /// Bearer credential for the counter service. `None` disables the counter.
    #[serde(skip_serializing)]
    pub counter_api_key: Option<String>,

    /// Map widget key. `None` renders the map panel as unconfigured.
    #[serde(skip_serializing)]
    pub maps_api_key: Option<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: "Data_Sample_with_coordinates_500_airports.csv".into(),
            world_zoom: 2,
            country_zoom: 5,
            min_zoom: 2,
            max_zoom: 10,
            top_n: 10,
            counter_base_url: "https://api.counterapi.dev/v2".into(),
            counter_namespace: "aviation".into(),
            counter_name: "airlift".into(),
            counter_timeout_ms: 5_000,
            counter_api_key: None,
            maps_api_key: None,
        }
    }
}

impl DashboardConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `AIRLIFT_DATA_PATH`: CSV to load
    /// - `AIRLIFT_WORLD_ZOOM`, `AIRLIFT_COUNTRY_ZOOM`, `AIRLIFT_MIN_ZOOM`, `AIRLIFT_MAX_ZOOM`
    /// - `AIRLIFT_TOP_N`: ranking length
    /// - `AIRLIFT_COUNTER_URL`, `AIRLIFT_COUNTER_NAMESPACE`, `AIRLIFT_COUNTER_NAME`
    /// - `AIRLIFT_COUNTER_TIMEOUT_MS`: per-call timeout
    /// - `COUNTERAPI_KEY`: counter credential
    /// - `GOOGLE_MAPS_API_KEY`: map widget credential
    ///
    /// Unparseable numbers are ignored and the default kept.
    pub fn from_env() -> Self {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reading from an arbitrary
    /// key lookup, so tests never touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(s) = lookup("AIRLIFT_DATA_PATH") {
            cfg.data_path = s;
        }

        if let Some(v) = lookup("AIRLIFT_WORLD_ZOOM").and_then(|s| s.parse().ok()) {
            cfg.world_zoom = v;
        }

        if let Some(v) = lookup("AIRLIFT_COUNTRY_ZOOM").and_then(|s| s.parse().ok()) {
            cfg.country_zoom = v;
        }

        if let Some(v) = lookup("AIRLIFT_MIN_ZOOM").and_then(|s| s.parse().ok()) {
            cfg.min_zoom = v;
        }

        if let Some(v) = lookup("AIRLIFT_MAX_ZOOM").and_then(|s| s.parse().ok()) {
            cfg.max_zoom = v;
        }

        if let Some(v) = lookup("AIRLIFT_TOP_N").and_then(|s| s.parse().ok()) {
            cfg.top_n = v;
        }

        if let Some(s) = lookup("AIRLIFT_COUNTER_URL") {
            cfg.counter_base_url = s;
        }

        if let Some(s) = lookup("AIRLIFT_COUNTER_NAMESPACE") {
            cfg.counter_namespace = s;
        }

        if let Some(s) = lookup("AIRLIFT_COUNTER_NAME") {
            cfg.counter_name = s;
        }

        if let Some(v) = lookup("AIRLIFT_COUNTER_TIMEOUT_MS").and_then(|s| s.parse().ok()) {
            cfg.counter_timeout_ms = v;
        }

        cfg.counter_api_key = lookup("COUNTERAPI_KEY").filter(|s| !s.trim().is_empty());
        cfg.maps_api_key = lookup("GOOGLE_MAPS_API_KEY").filter(|s| !s.trim().is_empty());

        cfg
    }

    /// Zoom for the current selection, clamped to the widget limits.
    pub fn zoom_for(&self, country_selected: bool) -> u8 {
        let z = if country_selected {
            self.country_zoom
        } else {
            self.world_zoom
        };
        z.max(self.min_zoom).min(self.max_zoom)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_zoom > self.max_zoom {
            return Err(Error::Config(format!(
                "min_zoom ({}) exceeds max_zoom ({})",
                self.min_zoom, self.max_zoom
            )));
        }
        if self.data_path.trim().is_empty() {
            return Err(Error::Config("data_path is empty".into()));
        }
        if self.top_n == 0 {
            return Err(Error::Config("top_n must be at least 1".into()));
        }
        if self.counter_timeout_ms == 0 {
            return Err(Error::Config("counter_timeout_ms must be positive".into()));
        }
        Ok(())
    }
}

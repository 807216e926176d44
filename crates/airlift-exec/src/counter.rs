//! Visit counter client.
//!
//! The counter is a third-party HTTP service: `GET {base}/{ns}/{name}/up`
//! bumps it, `GET {base}/{ns}/{name}` reads it back as `data.up_count`.
//! Calls are best-effort: one attempt, bounded by the configured timeout.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use airlift_core::config::DashboardConfig;

#[derive(Debug, Error)]
pub enum CounterError {
    #[error("counter not configured: {0}")]
    Unconfigured(String),
    #[error("counter url: {0}")]
    Url(#[from] url::ParseError),
    #[error("counter http: {0}")]
    Http(#[from] reqwest::Error),
    #[error("counter response: {0}")]
    Response(String),
}

/// What the footer shows for the visit count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CounterStatus {
    Count { visits: u64 },
    Unavailable { reason: String },
    Unconfigured,
}

pub trait CounterService {
    fn increment(&self) -> Result<(), CounterError>;
    fn current(&self) -> Result<u64, CounterError>;
}

#[derive(Debug, Deserialize)]
struct CounterBody {
    data: CounterData,
}

#[derive(Debug, Deserialize)]
struct CounterData {
    up_count: u64,
}

pub struct HttpCounter {
    client: Client,
    read_url: Url,
    up_url: Url,
    token: String,
}

impl HttpCounter {
    /// Build a client from config. Fails with `Unconfigured` when no
    /// credential is set, before any network setup.
    pub fn from_config(cfg: &DashboardConfig) -> Result<Self, CounterError> {
        let token = cfg
            .counter_api_key
            .clone()
            .ok_or_else(|| CounterError::Unconfigured("COUNTERAPI_KEY is not set".into()))?;

        let (read_url, up_url) = endpoints(cfg)?;
        let client = Client::builder()
            .timeout(Duration::from_millis(cfg.counter_timeout_ms))
            .build()?;

        Ok(Self {
            client,
            read_url,
            up_url,
            token,
        })
    }

    fn get(&self, url: &Url) -> Result<reqwest::blocking::Response, CounterError> {
        let resp = self
            .client
            .get(url.clone())
            .bearer_auth(&self.token)
            .send()?
            .error_for_status()?;
        Ok(resp)
    }
}

impl CounterService for HttpCounter {
    fn increment(&self) -> Result<(), CounterError> {
        self.get(&self.up_url)?;
        Ok(())
    }

    fn current(&self) -> Result<u64, CounterError> {
        let body: CounterBody = self
            .get(&self.read_url)?
            .json()
            .map_err(|e| CounterError::Response(e.to_string()))?;
        Ok(body.data.up_count)
    }
}

/// (read, increment) endpoints for the configured counter.
fn endpoints(cfg: &DashboardConfig) -> Result<(Url, Url), CounterError> {
    let base = cfg.counter_base_url.trim_end_matches('/');
    let read = Url::parse(&format!(
        "{base}/{}/{}",
        cfg.counter_namespace, cfg.counter_name
    ))?;
    let up = Url::parse(&format!(
        "{base}/{}/{}/up",
        cfg.counter_namespace, cfg.counter_name
    ))?;
    Ok((read, up))
}

//! YAML → view request parser.
//!
//! Example:
//! ```yaml
//! config:
//!   data_path: "data/airports.csv"
//!   world_zoom: 2
//! filters:
//!   country: ["Japan"]        # or "All", or omitted
//!   airport: []
//!   operation_type: "Passenger"
//! top_n: { n: 10, by: "flights" }
//! ```

use serde::{Deserialize, Serialize};

use airlift_core::config::DashboardConfig;
use airlift_core::selection::{Constraint, FilterSelection};
use airlift_operators::RankKey;

use crate::error::QueryError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ViewRequest {
    #[serde(default)]
    pub config: Option<ConfigOverrides>,
    #[serde(default)]
    pub filters: FilterSpec,
    #[serde(default)]
    pub top_n: Option<RankSpec>,
}

/// A scalar or a list; both spellings show up in hand-written requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Values {
    One(String),
    Many(Vec<String>),
}

impl Values {
    fn to_constraint(&self) -> Constraint {
        match self {
            Values::One(v) => Constraint::from_values([v]),
            Values::Many(vs) => Constraint::from_values(vs),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterSpec {
    pub country: Option<Values>,
    pub airport: Option<Values>,
    pub operation_type: Option<Values>,
}

impl FilterSpec {
    pub fn to_selection(&self) -> FilterSelection {
        let constraint = |v: &Option<Values>| v.as_ref().map(Values::to_constraint).unwrap_or_default();
        FilterSelection {
            country: constraint(&self.country),
            airport: constraint(&self.airport),
            operation_type: constraint(&self.operation_type),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RankSpec {
    pub n: Option<usize>,
    pub by: Option<String>,
}

/// Optional overrides of [`DashboardConfig`]; unset fields keep whatever the
/// defaults and environment produced. Credentials are never read from a
/// request file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigOverrides {
    pub data_path: Option<String>,
    pub world_zoom: Option<u8>,
    pub country_zoom: Option<u8>,
    pub min_zoom: Option<u8>,
    pub max_zoom: Option<u8>,
    pub top_n: Option<usize>,
    pub counter_base_url: Option<String>,
    pub counter_namespace: Option<String>,
    pub counter_name: Option<String>,
    pub counter_timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRequest {
    pub selection: FilterSelection,
    /// `None` means "use the configured length".
    pub top_n: Option<usize>,
    pub rank_by: RankKey,
    pub config: Option<ConfigOverrides>,
}

/// Parse a YAML view request. An empty document is the unfiltered view.
pub fn parse_yaml_request(yaml_src: &str) -> Result<ParsedRequest, QueryError> {
    let doc: ViewRequest = if yaml_src.trim().is_empty() {
        ViewRequest::default()
    } else {
        serde_yaml::from_str(yaml_src)?
    };

    let rank = doc.top_n.unwrap_or_default();
    let rank_by = match rank.by.as_deref() {
        None => RankKey::default(),
        Some(s) => s
            .parse::<RankKey>()
            .map_err(|_| QueryError::UnknownRankKey(s.to_string()))?,
    };
    if rank.n == Some(0) {
        return Err(QueryError::Invalid("top_n.n must be at least 1".into()));
    }

    Ok(ParsedRequest {
        selection: doc.filters.to_selection(),
        top_n: rank.n,
        rank_by,
        config: doc.config,
    })
}

/// Layer `overrides` onto `cfg` and re-validate.
pub fn apply_config_overrides(
    cfg: &mut DashboardConfig,
    overrides: &ConfigOverrides,
) -> Result<(), QueryError> {
    if let Some(v) = &overrides.data_path {
        cfg.data_path = v.clone();
    }
    if let Some(v) = overrides.world_zoom {
        cfg.world_zoom = v;
    }
    if let Some(v) = overrides.country_zoom {
        cfg.country_zoom = v;
    }
    if let Some(v) = overrides.min_zoom {
        cfg.min_zoom = v;
    }
    if let Some(v) = overrides.max_zoom {
        cfg.max_zoom = v;
    }
    if let Some(v) = overrides.top_n {
        cfg.top_n = v;
    }
    if let Some(v) = &overrides.counter_base_url {
        cfg.counter_base_url = v.clone();
    }
    if let Some(v) = &overrides.counter_namespace {
        cfg.counter_namespace = v.clone();
    }
    if let Some(v) = &overrides.counter_name {
        cfg.counter_name = v.clone();
    }
    if let Some(v) = overrides.counter_timeout_ms {
        cfg.counter_timeout_ms = v;
    }
    cfg.validate()?;
    Ok(())
}

//! Top-N ranking.
//!
//! Sorting is stable: rows with equal keys keep their original relative
//! order, so the ranking is deterministic across runs.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use airlift_core::types::{AirportRecord, Pollutant};

use crate::traits::OpError;

/// Measure a ranking orders by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankKey {
    #[default]
    Flights,
    Fuel,
    Pollutant(Pollutant),
}

impl RankKey {
    /// The measure this key ranks by; `None` for a pollutant the row lacks.
    pub fn value_of(self, r: &AirportRecord) -> Option<f64> {
        match self {
            RankKey::Flights => Some(r.flights as f64),
            RankKey::Fuel => Some(r.fuel_kg),
            RankKey::Pollutant(p) => r.pollutant(p),
        }
    }

    /// Descending comparison. Rows that do not carry a pollutant sort after
    /// rows that do.
    fn cmp_desc(self, a: &AirportRecord, b: &AirportRecord) -> Ordering {
        match self {
            RankKey::Flights => b.flights.cmp(&a.flights),
            RankKey::Fuel => b.fuel_kg.total_cmp(&a.fuel_kg),
            RankKey::Pollutant(p) => match (a.pollutant(p), b.pollutant(p)) {
                (Some(x), Some(y)) => y.total_cmp(&x),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
        }
    }
}

impl fmt::Display for RankKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankKey::Flights => f.write_str("flights"),
            RankKey::Fuel => f.write_str("fuel"),
            RankKey::Pollutant(p) => f.write_str(p.key()),
        }
    }
}

impl FromStr for RankKey {
    type Err = OpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flights" => Ok(RankKey::Flights),
            "fuel" => Ok(RankKey::Fuel),
            other => other
                .parse::<Pollutant>()
                .map(RankKey::Pollutant)
                .map_err(|_| OpError::UnknownKey(s.to_string())),
        }
    }
}

/// The `n` rows with the largest `key`, descending; ties keep input order.
/// Fewer than `n` rows → all of them.
pub fn top_n<'a, I>(rows: I, n: usize, key: RankKey) -> Vec<&'a AirportRecord>
where
    I: IntoIterator<Item = &'a AirportRecord>,
{
    let mut ranked: Vec<&AirportRecord> = rows.into_iter().collect();
    ranked.sort_by(|a, b| key.cmp_desc(a, b));
    ranked.truncate(n);
    ranked
}

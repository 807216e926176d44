//! Airport records and the loaded dataset.
//!
//! A [`Dataset`] is built once by the loader and then only ever shared
//! read-only; there is no write path.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::hash::Hash256;
use crate::id::RowId;
use crate::schema::{Column, Schema};

/// Landing-and-take-off pollutant masses tracked by the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pollutant {
    Nox,
    Hc,
    Co,
    Pm25,
}

impl Pollutant {
    pub const ALL: [Pollutant; 4] = [Pollutant::Nox, Pollutant::Hc, Pollutant::Co, Pollutant::Pm25];

    pub fn column(self) -> Column {
        match self {
            Pollutant::Nox => Column::NoxG,
            Pollutant::Hc => Column::HcG,
            Pollutant::Co => Column::CoG,
            Pollutant::Pm25 => Column::Pm25G,
        }
    }

    /// Display name used in summaries and popups.
    pub fn label(self) -> &'static str {
        match self {
            Pollutant::Nox => "NOx",
            Pollutant::Hc => "HC",
            Pollutant::Co => "CO",
            Pollutant::Pm25 => "PM2.5",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Pollutant::Nox => "nox",
            Pollutant::Hc => "hc",
            Pollutant::Co => "co",
            Pollutant::Pm25 => "pm25",
        }
    }
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Pollutant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase().replace(['.', '_'], "");
        Pollutant::ALL
            .iter()
            .copied()
            .find(|p| p.key() == norm)
            .ok_or_else(|| Error::InvalidValue {
                column: "pollutant".into(),
                reason: format!("unknown pollutant '{s}'"),
            })
    }
}

/// A WGS84 point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// One row of the airport emissions file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirportRecord {
    /// Position in the source file (0-based, data rows only).
    pub id: RowId,
    pub name: String,
    pub country: Option<String>,
    pub icao: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub operation_type: Option<String>,
    pub flights: u64,
    pub fuel_kg: f64,
    pub nox_g: f64,
    pub hc_g: Option<f64>,
    pub co_g: Option<f64>,
    pub pm25_g: Option<f64>,
}

impl AirportRecord {
    /// Minimal record with zeroed measures; handy for tests and fixtures.
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id: RowId::new(id),
            name: name.into(),
            country: None,
            icao: None,
            latitude: None,
            longitude: None,
            operation_type: None,
            flights: 0,
            fuel_kg: 0.0,
            nox_g: 0.0,
            hc_g: None,
            co_g: None,
            pm25_g: None,
        }
    }

    /// Both coordinates, or nothing. Rows without coordinates still count
    /// towards sums but are never placed on the map.
    pub fn coordinates(&self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(GeoPoint::new(lat, lon)),
            _ => None,
        }
    }

    pub fn pollutant(&self, p: Pollutant) -> Option<f64> {
        match p {
            Pollutant::Nox => Some(self.nox_g),
            Pollutant::Hc => self.hc_g,
            Pollutant::Co => self.co_g,
            Pollutant::Pm25 => self.pm25_g,
        }
    }
}

/// The immutable, fully loaded table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub schema: Schema,
    pub records: Vec<AirportRecord>,
    /// Digest of the raw file bytes; lets views prove which file they came from.
    pub digest: Hash256,
}

impl Dataset {
    pub fn new(schema: Schema, records: Vec<AirportRecord>, digest: Hash256) -> Self {
        Self {
            schema,
            records,
            digest,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

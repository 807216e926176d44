//! Logical schema of the airport emissions file.
//!
//! The bundled CSV comes in two flavours: a "sample" file with flights, fuel
//! and NOx, and a "full" file that adds ICAO codes, operation types and three
//! more pollutants. Headers are matched after trimming and ignoring case, so
//! `" Flights "` and `"flights"` both resolve to [`Column::Flights`].

use serde::{Deserialize, Serialize};

use crate::types::Pollutant;

/// Every column the engine knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Column {
    AirportName,
    Country,
    Icao,
    Latitude,
    Longitude,
    OperationType,
    Flights,
    FuelKg,
    NoxG,
    HcG,
    CoG,
    Pm25G,
}

impl Column {
    pub const ALL: [Column; 12] = [
        Column::AirportName,
        Column::Country,
        Column::Icao,
        Column::Latitude,
        Column::Longitude,
        Column::OperationType,
        Column::Flights,
        Column::FuelKg,
        Column::NoxG,
        Column::HcG,
        Column::CoG,
        Column::Pm25G,
    ];

    /// Canonical header text as it appears in the published files.
    pub fn header(self) -> &'static str {
        match self {
            Column::AirportName => "Airport Name",
            Column::Country => "Country",
            Column::Icao => "ICAO",
            Column::Latitude => "Airport Latitude",
            Column::Longitude => "Airport Longitude",
            Column::OperationType => "Operation Type",
            Column::Flights => "Flights",
            Column::FuelKg => "Fuel LTO Cycle (kg)",
            Column::NoxG => "NOx LTO Total mass (g)",
            Column::HcG => "HC LTO Total mass (g)",
            Column::CoG => "CO LTO Total mass (g)",
            Column::Pm25G => "PM2.5 LTO Total mass (g)",
        }
    }

    /// Columns without which a file cannot be summarized at all.
    pub fn is_required(self) -> bool {
        matches!(
            self,
            Column::AirportName | Column::Flights | Column::FuelKg | Column::NoxG
        )
    }

    /// Resolve a raw header cell. Leading/trailing whitespace is stripped and
    /// the comparison ignores ASCII case.
    pub fn from_header(raw: &str) -> Option<Self> {
        let wanted = raw.trim();
        Column::ALL
            .iter()
            .copied()
            .find(|c| c.header().eq_ignore_ascii_case(wanted))
    }
}

/// Which published flavour a file corresponds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatasetVariant {
    /// Flights, fuel and NOx only.
    Sample,
    /// All of HC, CO and PM2.5 present as well.
    Full,
}

/// The set of recognized columns in a loaded file, in file order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub columns: Vec<Column>,
}

impl Schema {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// Schema of the 500-airport sample file.
    pub fn sample() -> Self {
        Self::new(vec![
            Column::AirportName,
            Column::Country,
            Column::Latitude,
            Column::Longitude,
            Column::Flights,
            Column::FuelKg,
            Column::NoxG,
        ])
    }

    /// Schema of the full 5,000-airport file.
    pub fn full() -> Self {
        Self::new(Column::ALL.to_vec())
    }

    pub fn contains(&self, column: Column) -> bool {
        self.columns.contains(&column)
    }

    pub fn missing_required(&self) -> Vec<Column> {
        Column::ALL
            .iter()
            .copied()
            .filter(|c| c.is_required() && !self.contains(*c))
            .collect()
    }

    /// Pollutants carried by this schema, NOx first.
    pub fn pollutants(&self) -> Vec<Pollutant> {
        Pollutant::ALL
            .iter()
            .copied()
            .filter(|p| self.contains(p.column()))
            .collect()
    }

    pub fn has_coordinates(&self) -> bool {
        self.contains(Column::Latitude) && self.contains(Column::Longitude)
    }

    pub fn variant(&self) -> DatasetVariant {
        let optional = [Column::HcG, Column::CoG, Column::Pm25G];
        if optional.iter().all(|c| self.contains(*c)) {
            DatasetVariant::Full
        } else {
            DatasetVariant::Sample
        }
    }
}

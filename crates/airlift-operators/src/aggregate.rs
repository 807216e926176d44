//! Summary aggregation over filtered rows.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use airlift_core::schema::Schema;
use airlift_core::types::{AirportRecord, Pollutant};

/// Full-precision totals for a row set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Distinct airport names, not rows.
    pub airports: usize,
    pub flights: u64,
    pub fuel_kg: f64,
    /// One entry per pollutant carried by at least one row. NOx is always
    /// carried, so it is present whenever the input is non-empty.
    pub pollutants: BTreeMap<Pollutant, f64>,
}

impl Summary {
    /// Total for `p`, zero when no row carried it.
    pub fn pollutant(&self, p: Pollutant) -> f64 {
        self.pollutants.get(&p).copied().unwrap_or(0.0)
    }

    /// Display table for the columns `schema` carries. Pollutants absent from
    /// the schema get no row; present-but-unseen ones show as zero.
    pub fn table(&self, schema: &Schema) -> SummaryTable {
        let mut rows = vec![
            SummaryRow::new("Number of Airports", self.airports as f64),
            SummaryRow::new("Total Flights", self.flights as f64),
            SummaryRow::new("Total LTO Fuel (kg)", self.fuel_kg),
        ];
        for p in schema.pollutants() {
            rows.push(SummaryRow::new(
                format!("Total LTO {} pollution (g)", p.label()),
                self.pollutant(p),
            ));
        }
        SummaryTable { rows }
    }
}

/// Sum every measure and count distinct airport names.
pub fn compute_summary<'a, I>(rows: I) -> Summary
where
    I: IntoIterator<Item = &'a AirportRecord>,
{
    let mut names: HashSet<&str> = HashSet::new();
    let mut out = Summary::default();
    for r in rows {
        names.insert(r.name.as_str());
        out.flights = out.flights.saturating_add(r.flights);
        out.fuel_kg += r.fuel_kg;
        for p in Pollutant::ALL {
            if let Some(v) = r.pollutant(p) {
                *out.pollutants.entry(p).or_insert(0.0) += v;
            }
        }
    }
    out.airports = names.len();
    out
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub label: String,
    /// Truncated toward zero.
    pub value: u64,
    /// `value` with thousands separators.
    pub display: String,
}

impl SummaryRow {
    fn new(label: impl Into<String>, total: f64) -> Self {
        // `as` saturates and maps NaN to 0; totals are non-negative anyway.
        let value = total.trunc() as u64;
        Self {
            label: label.into(),
            value,
            display: format_thousands(value),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryTable {
    pub rows: Vec<SummaryRow>,
}

impl SummaryTable {
    pub fn get(&self, label: &str) -> Option<&SummaryRow> {
        self.rows.iter().find(|r| r.label == label)
    }
}

/// `1234567` → `"1,234,567"`.
pub fn format_thousands(v: u64) -> String {
    let digits = v.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

//! Filter operator: conjunctive membership constraints per dimension.
//!
//! The sidebar narrows country → airport → operation type. Conjunction is
//! order-independent for the final row set, but the order matters for which
//! options each later control offers, so both paths share the same stages.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use airlift_core::selection::{Constraint, Dimension, FilterSelection, ALL_SENTINEL};
use airlift_core::types::AirportRecord;

use crate::traits::RowOperator;

/// One dimension's constraint as a narrowing stage.
#[derive(Debug, Clone)]
pub struct DimensionFilter {
    pub dimension: Dimension,
    pub constraint: Constraint,
}

impl DimensionFilter {
    pub fn new(dimension: Dimension, constraint: Constraint) -> Self {
        Self {
            dimension,
            constraint,
        }
    }

    fn field<'r>(&self, rec: &'r AirportRecord) -> Option<&'r str> {
        field_of(self.dimension, rec)
    }
}

impl RowOperator for DimensionFilter {
    fn name(&self) -> &'static str {
        match self.dimension {
            Dimension::Country => "filter_country",
            Dimension::Airport => "filter_airport",
            Dimension::OperationType => "filter_operation_type",
        }
    }

    fn apply<'a>(&self, mut rows: Vec<&'a AirportRecord>) -> Vec<&'a AirportRecord> {
        if !self.constraint.is_active() {
            return rows;
        }
        rows.retain(|r| self.constraint.admits(self.field(r)));
        rows
    }
}

fn field_of(dim: Dimension, rec: &AirportRecord) -> Option<&str> {
    match dim {
        Dimension::Country => rec.country.as_deref(),
        Dimension::Airport => Some(rec.name.as_str()),
        Dimension::OperationType => rec.operation_type.as_deref(),
    }
}

/// The stages for a selection, in sidebar order. Inactive dimensions get a
/// pass-through stage.
fn stages(selection: &FilterSelection) -> Vec<DimensionFilter> {
    Dimension::ORDER
        .iter()
        .map(|d| DimensionFilter::new(*d, selection.constraint(*d).clone()))
        .collect()
}

/// Rows satisfying every active constraint, in original order.
///
/// An empty result is a valid answer, not an error.
pub fn apply_filters<'a>(
    records: &'a [AirportRecord],
    selection: &FilterSelection,
) -> Vec<&'a AirportRecord> {
    let mut rows: Vec<&AirportRecord> = records.iter().collect();
    for stage in stages(selection) {
        let before = rows.len();
        rows = stage.apply(rows);
        if stage.constraint.is_active() {
            tracing::trace!(op = stage.name(), before, after = rows.len(), "narrowed");
        }
    }
    rows
}

/// Choices each sidebar control should offer for the current selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    /// `"All"` followed by every non-null country in the dataset, sorted.
    pub countries: Vec<String>,
    /// Airport names among the country-filtered rows, sorted.
    pub airports: Vec<String>,
    /// Operation types among the country- and airport-filtered rows, sorted.
    pub operation_types: Vec<String>,
}

fn distinct_sorted<'a, I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    values
        .into_iter()
        .flatten()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

pub fn filter_options(records: &[AirportRecord], selection: &FilterSelection) -> FilterOptions {
    let mut countries = vec![ALL_SENTINEL.to_string()];
    countries.extend(distinct_sorted(
        records.iter().map(|r| field_of(Dimension::Country, r)),
    ));

    let country = DimensionFilter::new(Dimension::Country, selection.country.clone());
    let airport = DimensionFilter::new(Dimension::Airport, selection.airport.clone());

    let by_country = country.apply(records.iter().collect());
    let airports = distinct_sorted(by_country.iter().map(|r| field_of(Dimension::Airport, r)));

    let by_airport = airport.apply(by_country);
    let operation_types = distinct_sorted(
        by_airport
            .iter()
            .map(|r| field_of(Dimension::OperationType, r)),
    );

    FilterOptions {
        countries,
        airports,
        operation_types,
    }
}

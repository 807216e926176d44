//! Writers for filtered rows. Both keep the source file's header text and
//! column order so an export can be loaded again.

pub mod csv;
pub mod jsonl;

use airlift_core::schema::Column;
use airlift_core::types::AirportRecord;

/// JSON value of one cell; nulls for absent text or coordinates.
pub(crate) fn cell_json(rec: &AirportRecord, col: Column) -> serde_json::Value {
    use serde_json::Value;
    let opt_text = |v: &Option<String>| v.clone().map(Value::String).unwrap_or(Value::Null);
    let opt_num = |v: Option<f64>| v.map(Value::from).unwrap_or(Value::Null);
    match col {
        Column::AirportName => Value::String(rec.name.clone()),
        Column::Country => opt_text(&rec.country),
        Column::Icao => opt_text(&rec.icao),
        Column::OperationType => opt_text(&rec.operation_type),
        Column::Latitude => opt_num(rec.latitude),
        Column::Longitude => opt_num(rec.longitude),
        Column::Flights => Value::from(rec.flights),
        Column::FuelKg => Value::from(rec.fuel_kg),
        Column::NoxG => Value::from(rec.nox_g),
        Column::HcG => opt_num(rec.hc_g),
        Column::CoG => opt_num(rec.co_g),
        Column::Pm25G => opt_num(rec.pm25_g),
    }
}

/// Text of one cell; empty for absent values.
pub(crate) fn cell_text(rec: &AirportRecord, col: Column) -> String {
    let opt_text = |v: &Option<String>| v.clone().unwrap_or_default();
    let opt_num = |v: Option<f64>| v.map(|x| x.to_string()).unwrap_or_default();
    match col {
        Column::AirportName => rec.name.clone(),
        Column::Country => opt_text(&rec.country),
        Column::Icao => opt_text(&rec.icao),
        Column::OperationType => opt_text(&rec.operation_type),
        Column::Latitude => opt_num(rec.latitude),
        Column::Longitude => opt_num(rec.longitude),
        Column::Flights => rec.flights.to_string(),
        Column::FuelKg => rec.fuel_kg.to_string(),
        Column::NoxG => rec.nox_g.to_string(),
        Column::HcG => opt_num(rec.hc_g),
        Column::CoG => opt_num(rec.co_g),
        Column::Pm25G => opt_num(rec.pm25_g),
    }
}

//! CSV dataset reader.
//!
//! Header cells are trimmed and matched case-insensitively against the known
//! columns; unknown headers are skipped. Data cells are trimmed too. Empty
//! measure cells count as zero, empty coordinates as "not mappable".
//! Rows shorter than the header read their missing trailing cells as empty.

use std::fs;
use std::io::Read;
use std::path::Path;

use airlift_core::hash::hash_bytes;
use airlift_core::schema::{Column, Schema};
use airlift_core::types::{AirportRecord, Dataset};

use crate::error::{Error, Result};

/// Streaming reader over any `Read`; yields one record per data row.
pub struct CsvDatasetReader<R: Read> {
    inner: csv::Reader<R>,
    schema: Schema,
    /// (field index in the file, column it maps to)
    positions: Vec<(usize, Column)>,
    record: csv::StringRecord,
    next_row: u64,
}

impl<R: Read> CsvDatasetReader<R> {
    pub fn from_reader(rdr: R) -> Result<Self> {
        let mut inner = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(rdr);

        let headers = inner.headers()?.clone();
        let mut positions = Vec::new();
        let mut columns = Vec::new();
        for (idx, raw) in headers.iter().enumerate() {
            match Column::from_header(raw) {
                Some(col) if !columns.contains(&col) => {
                    positions.push((idx, col));
                    columns.push(col);
                }
                Some(col) => {
                    tracing::warn!(header = raw, column = ?col, "duplicate column header ignored");
                }
                None => {
                    tracing::debug!(header = raw, "unrecognized column header skipped");
                }
            }
        }

        let schema = Schema::new(columns);
        let missing = schema.missing_required();
        if !missing.is_empty() {
            return Err(Error::MissingColumns(
                missing.iter().map(|c| c.header().to_string()).collect(),
            ));
        }

        Ok(Self {
            inner,
            schema,
            positions,
            record: csv::StringRecord::new(),
            next_row: 0,
        })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Read the next data row, or `None` at end of input.
    pub fn next_record(&mut self) -> Result<Option<AirportRecord>> {
        if !self.inner.read_record(&mut self.record)? {
            return Ok(None);
        }
        let row_id = self.next_row;
        self.next_row += 1;
        // Human-facing row number: 1-based, data rows only.
        let row = (row_id + 1) as usize;

        let mut rec = AirportRecord::new(row_id, String::new());
        for &(idx, col) in &self.positions {
            let raw = self.record.get(idx).unwrap_or("");
            match col {
                Column::AirportName => {
                    if raw.is_empty() {
                        return Err(invalid(row, col, raw, "airport name is empty"));
                    }
                    rec.name = raw.to_string();
                }
                Column::Country => rec.country = text(raw),
                Column::Icao => rec.icao = text(raw),
                Column::OperationType => rec.operation_type = text(raw),
                Column::Latitude => rec.latitude = parse_coordinate(raw, row, col, 90.0)?,
                Column::Longitude => rec.longitude = parse_coordinate(raw, row, col, 180.0)?,
                Column::Flights => rec.flights = parse_count(raw, row, col)?,
                Column::FuelKg => rec.fuel_kg = parse_measure(raw, row, col)?,
                Column::NoxG => rec.nox_g = parse_measure(raw, row, col)?,
                Column::HcG => rec.hc_g = Some(parse_measure(raw, row, col)?),
                Column::CoG => rec.co_g = Some(parse_measure(raw, row, col)?),
                Column::Pm25G => rec.pm25_g = Some(parse_measure(raw, row, col)?),
            }
        }
        Ok(Some(rec))
    }

    /// Drain the reader into a `Dataset`, stamping it with `digest`.
    pub fn into_dataset(mut self, digest: airlift_core::hash::Hash256) -> Result<Dataset> {
        let mut records = Vec::new();
        while let Some(rec) = self.next_record()? {
            records.push(rec);
        }
        let unmappable = records.iter().filter(|r| r.coordinates().is_none()).count();
        tracing::debug!(
            rows = records.len(),
            unmappable,
            variant = ?self.schema.variant(),
            "dataset loaded"
        );
        Ok(Dataset::new(self.schema, records, digest))
    }
}

/// Parse an in-memory CSV document.
pub fn parse_dataset(bytes: &[u8]) -> Result<Dataset> {
    let digest = hash_bytes(bytes);
    CsvDatasetReader::from_reader(bytes)?.into_dataset(digest)
}

/// Load the bundled CSV from disk.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let dataset = parse_dataset(&bytes)?;
    tracing::info!(
        path = %path.display(),
        rows = dataset.len(),
        digest = %dataset.digest.short(),
        "loaded airport dataset"
    );
    Ok(dataset)
}

fn invalid(row: usize, col: Column, raw: &str, reason: &str) -> Error {
    Error::InvalidCell {
        row,
        column: col.header().to_string(),
        value: raw.to_string(),
        reason: reason.to_string(),
    }
}

fn text(raw: &str) -> Option<String> {
    if raw.is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}

fn is_missing(raw: &str) -> bool {
    raw.is_empty() || raw.eq_ignore_ascii_case("nan")
}

/// Non-negative number; thousands separators are accepted.
fn parse_measure(raw: &str, row: usize, col: Column) -> Result<f64> {
    if is_missing(raw) {
        return Ok(0.0);
    }
    let cleaned: String = raw.chars().filter(|c| *c != ',' && *c != '_').collect();
    let v: f64 = cleaned
        .parse()
        .map_err(|_| invalid(row, col, raw, "not a number"))?;
    if !v.is_finite() || v < 0.0 {
        return Err(invalid(row, col, raw, "must be a non-negative number"));
    }
    Ok(v)
}

fn parse_count(raw: &str, row: usize, col: Column) -> Result<u64> {
    let v = parse_measure(raw, row, col)?;
    if v.fract() != 0.0 || v > u64::MAX as f64 {
        return Err(invalid(row, col, raw, "must be a whole number"));
    }
    Ok(v as u64)
}

fn parse_coordinate(raw: &str, row: usize, col: Column, limit: f64) -> Result<Option<f64>> {
    if is_missing(raw) {
        return Ok(None);
    }
    let v: f64 = raw
        .parse()
        .map_err(|_| invalid(row, col, raw, "not a coordinate"))?;
    if !v.is_finite() || v.abs() > limit {
        return Err(invalid(row, col, raw, "coordinate out of range"));
    }
    Ok(Some(v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measures_accept_separators_and_blank() {
        assert_eq!(parse_measure("1,234.5", 1, Column::FuelKg).unwrap(), 1234.5);
        assert_eq!(parse_measure("", 1, Column::FuelKg).unwrap(), 0.0);
        assert_eq!(parse_measure("NaN", 1, Column::FuelKg).unwrap(), 0.0);
        assert!(parse_measure("-3", 1, Column::FuelKg).is_err());
        assert!(parse_measure("lots", 1, Column::FuelKg).is_err());
    }

    #[test]
    fn flights_must_be_whole() {
        assert_eq!(parse_count("42", 1, Column::Flights).unwrap(), 42);
        assert_eq!(parse_count("42.0", 1, Column::Flights).unwrap(), 42);
        assert!(parse_count("42.5", 1, Column::Flights).is_err());
    }

    #[test]
    fn coordinates_are_range_checked() {
        assert_eq!(
            parse_coordinate("", 1, Column::Latitude, 90.0).unwrap(),
            None
        );
        assert_eq!(
            parse_coordinate("-33.9", 1, Column::Latitude, 90.0).unwrap(),
            Some(-33.9)
        );
        assert!(parse_coordinate("91", 1, Column::Latitude, 90.0).is_err());
    }

    #[test]
    fn invalid_cell_reports_row_and_column() {
        let doc = "Airport Name,Flights,Fuel LTO Cycle (kg),NOx LTO Total mass (g)\n\
                   A,10,5,1\n\
                   B,ten,5,1\n";
        let err = parse_dataset(doc.as_bytes()).unwrap_err();
        match err {
            Error::InvalidCell { row, column, .. } => {
                assert_eq!(row, 2);
                assert_eq!(column, "Flights");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn short_row_reads_missing_cells_as_empty() {
        let doc = "Airport Name,Country,Airport Latitude,Airport Longitude,Flights,Fuel LTO Cycle (kg),NOx LTO Total mass (g),PM2.5 LTO Total mass (g)\n\
                   A,X,10,20,3,40,5,0.5\n\
                   B,Y,11,21,4,50\n\
                   C\n";
        let ds = parse_dataset(doc.as_bytes()).unwrap();
        assert_eq!(ds.len(), 3);

        let b = &ds.records[1];
        assert_eq!(b.fuel_kg, 50.0);
        assert_eq!(b.nox_g, 0.0);
        assert_eq!(b.pm25_g, Some(0.0));

        let c = &ds.records[2];
        assert_eq!(c.name, "C");
        assert!(c.country.is_none());
        assert!(c.coordinates().is_none());
        assert_eq!(c.flights, 0);
    }

    #[test]
    fn short_row_still_reports_bad_cells() {
        let doc = "Airport Name,Flights,Fuel LTO Cycle (kg),NOx LTO Total mass (g)\n\
                   A,10,5,1\n\
                   B,x\n";
        match parse_dataset(doc.as_bytes()).unwrap_err() {
            Error::InvalidCell { row, column, .. } => {
                assert_eq!(row, 2);
                assert_eq!(column, "Flights");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

//! Loading the bundled CSV from disk, and exporting filtered rows.


use std::fs;

use airlift_core::schema::{Column, DatasetVariant};
use airlift_core::selection::FilterSelection;
use airlift_io::{load_dataset, parse_dataset, CsvWriter, Error, JsonlWriter};
use airlift_operators::{apply_filters, build_markers, compute_summary};
use test_data_gen::{cleanup, create_temp_dir, full_csv, sample_csv, write_csv};

#[test]
fn test_load_sample_file_from_disk() {
    let dir = create_temp_dir();
    let path = write_csv(&dir, "airports.csv", &sample_csv(60));

    let ds = load_dataset(&path).expect("load");
    assert_eq!(ds.len(), 60);
    assert_eq!(ds.schema.variant(), DatasetVariant::Sample);
    assert!(ds.schema.contains(Column::Icao));
    assert!(!ds.schema.contains(Column::Pm25G));
    assert!(ds.records.iter().all(|r| r.pm25_g.is_none()));

    cleanup(&dir);
}

#[test]
fn test_full_variant_detected() {
    let ds = parse_dataset(full_csv(12).as_bytes()).expect("parse");
    assert_eq!(ds.schema.variant(), DatasetVariant::Full);
    assert!(ds.records.iter().all(|r| r.co_g.is_some()));
}

#[test]
fn test_header_whitespace_and_case_are_ignored() {
    let doc = "  airport name ,Country,  Flights,Fuel LTO Cycle (kg)  ,NOx LTO Total mass (g),Notes\n\
               Haneda, Japan ,\" 1,200 \",5000,10,extra\n";
    let ds = parse_dataset(doc.as_bytes()).expect("parse");
    let r = &ds.records[0];
    assert_eq!(r.name, "Haneda");
    assert_eq!(r.country.as_deref(), Some("Japan"));
    assert_eq!(r.flights, 1200);
    assert!(!ds.schema.has_coordinates());
}

#[test]
fn test_missing_required_column_is_reported() {
    let doc = "Airport Name,Country,Flights\nA,X,1\n";
    match parse_dataset(doc.as_bytes()) {
        Err(Error::MissingColumns(cols)) => {
            assert!(cols.contains(&"Fuel LTO Cycle (kg)".to_string()));
            assert!(cols.contains(&"NOx LTO Total mass (g)".to_string()));
        }
        other => panic!("expected missing columns, got {other:?}"),
    }
}

#[test]
fn test_negative_measure_is_rejected_with_location() {
    let doc = "Airport Name,Flights,Fuel LTO Cycle (kg),NOx LTO Total mass (g)\n\
               A,1,5,1\n\
               B,2,6,1\n\
               C,3,-7,1\n";
    match parse_dataset(doc.as_bytes()) {
        Err(Error::InvalidCell { row, column, .. }) => {
            assert_eq!(row, 3);
            assert_eq!(column, "Fuel LTO Cycle (kg)");
        }
        other => panic!("expected invalid cell, got {other:?}"),
    }
}

#[test]
fn test_unmapped_rows_in_sums_not_markers() {
    let ds = parse_dataset(sample_csv(30).as_bytes()).expect("parse");
    let rows = apply_filters(&ds.records, &FilterSelection::all());
    let markers = build_markers(rows.iter().copied());
    let unmapped = rows.iter().filter(|r| r.coordinates().is_none()).count();
    assert_eq!(unmapped, 3);
    assert_eq!(markers.len(), rows.len() - unmapped);
    assert_eq!(compute_summary(rows.iter().copied()).airports, 30);
}

#[test]
fn test_csv_export_reloads_identically() {
    let dir = create_temp_dir();
    let ds = parse_dataset(full_csv(25).as_bytes()).expect("parse");
    let sel = FilterSelection::all().with_country(["Japan"]);
    let rows = apply_filters(&ds.records, &sel);

    let out = dir.join("japan.csv");
    let written = CsvWriter::to_path(&out.to_string_lossy(), &ds.schema)
        .expect("create")
        .write_rows(rows.iter().copied())
        .expect("write");
    assert_eq!(written, rows.len());

    let reloaded = load_dataset(&out).expect("reload");
    assert_eq!(reloaded.schema, ds.schema);
    assert_eq!(reloaded.len(), rows.len());
    for (a, b) in reloaded.records.iter().zip(rows.iter()) {
        assert_eq!(a.name, b.name);
        assert_eq!(a.flights, b.flights);
        assert_eq!(a.latitude, b.latitude);
    }

    cleanup(&dir);
}

#[test]
fn test_ndjson_export_one_object_per_row() {
    let dir = create_temp_dir();
    let ds = parse_dataset(sample_csv(10).as_bytes()).expect("parse");

    let out = dir.join("all.ndjson");
    JsonlWriter::to_path(&out.to_string_lossy(), &ds.schema)
        .expect("create")
        .write_rows(&ds.records)
        .expect("write");

    let text = fs::read_to_string(&out).expect("read back");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 10);
    let first: serde_json::Value = serde_json::from_str(lines[0]).expect("json");
    assert_eq!(first["Airport Name"], "Airport 0");
    assert_eq!(first["Flights"], 1);

    cleanup(&dir);
}

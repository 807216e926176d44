use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use airlift::core::selection::FilterSelection;
use airlift::core::types::{AirportRecord, Pollutant};
use airlift::operators::{apply_filters, compute_map_center, compute_summary, top_n, RankKey};

const COUNTRIES: [&str; 6] = ["Chile", "Germany", "Japan", "Kenya", "Norway", "Peru"];

fn make_records(rows: usize) -> Vec<AirportRecord> {
    (0..rows)
        .map(|i| {
            let mut r = AirportRecord::new(i as u64, format!("Airport {}", i % 2000));
            r.country = Some(COUNTRIES[i % COUNTRIES.len()].to_string());
            r.operation_type = Some(if i % 3 == 0 { "Cargo" } else { "Passenger" }.to_string());
            if i % 11 != 0 {
                r.latitude = Some((i % 120) as f64 - 60.0);
                r.longitude = Some((i % 340) as f64 - 170.0);
            }
            r.flights = ((i * 7919) % 10_000) as u64;
            r.fuel_kg = r.flights as f64 * 812.5;
            r.nox_g = r.flights as f64 * 13.25;
            r.pm25_g = Some(r.flights as f64 * 0.125);
            r
        })
        .collect()
}

fn bench_filter_and_aggregate(c: &mut Criterion) {
    let records = make_records(50_000);
    let selection = FilterSelection::all()
        .with_country(["Japan", "Kenya"])
        .with_operation_types(["Passenger"]);

    c.bench_function("filter_and_aggregate_50k", |b| {
        b.iter(|| {
            let rows = apply_filters(black_box(&records), black_box(&selection));
            let center = compute_map_center(rows.iter().copied());
            let summary = compute_summary(rows.iter().copied());
            let top = top_n(rows.iter().copied(), 10, RankKey::Pollutant(Pollutant::Pm25));
            black_box((center, summary, top.len()));
        })
    });

    c.bench_function("top_n_flights_50k", |b| {
        b.iter(|| black_box(top_n(black_box(&records), 10, RankKey::Flights).len()))
    });
}

criterion_group!(benches, bench_filter_and_aggregate);
criterion_main!(benches);

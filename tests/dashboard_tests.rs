//! Dashboard event handling end to end: load, filter, diff, count visits.


use std::cell::Cell;
use std::sync::Arc;

use airlift_core::config::DashboardConfig;
use airlift_core::selection::FilterSelection;
use airlift_exec::{
    CounterError, CounterService, CounterStatus, Dashboard, HttpCounter, MapPanel, Panel,
    Session, SummaryPanel, NO_DATA_NOTICE,
};
use airlift_operators::RankKey;
use test_data_gen::{cleanup, create_temp_dir, full_dataset, sample_csv, write_csv};

fn configured() -> DashboardConfig {
    DashboardConfig {
        maps_api_key: Some("maps-key".into()),
        top_n: 5,
        ..DashboardConfig::default()
    }
}

#[test]
fn test_open_from_config_path() {
    let dir = create_temp_dir();
    let path = write_csv(&dir, "airports.csv", &sample_csv(40));
    let cfg = DashboardConfig {
        data_path: path.to_string_lossy().into_owned(),
        ..configured()
    };

    let mut dash = Dashboard::open(cfg).expect("open");
    let update = dash.on_filter_change(&FilterSelection::all()).expect("render");
    match &update.view.map {
        MapPanel::Ready {
            zoom,
            fit_bounds,
            markers,
            bounds,
            ..
        } => {
            assert_eq!(*zoom, 2);
            assert!(*fit_bounds);
            assert_eq!(markers.len(), 36);
            let b = bounds.expect("bounds");
            assert!(markers.iter().all(|m| b.contains(m.position)));
        }
        other => panic!("unexpected map panel: {other:?}"),
    }
    assert_eq!(update.view.top.entries.len(), 5);
    assert_eq!(update.view.top.entries[0].flights, 40);

    cleanup(&dir);
}

#[test]
fn test_country_change_redraws_data_panels_only() {
    let mut dash = Dashboard::new(Arc::new(full_dataset(120)), configured()).expect("dashboard");
    dash.on_filter_change(&FilterSelection::all()).expect("first");

    let update = dash
        .on_filter_change(&FilterSelection::all().with_country(["Kenya"]))
        .expect("second");
    assert!(update.is_changed(Panel::Map));
    assert!(update.is_changed(Panel::Summary));
    assert!(update.is_changed(Panel::TopN));
    assert!(update.is_changed(Panel::Options));
    assert!(!update.is_changed(Panel::Partners));

    match &update.view.map {
        MapPanel::Ready { zoom, .. } => assert_eq!(*zoom, 5),
        other => panic!("unexpected map panel: {other:?}"),
    }
    assert!(update
        .view
        .top
        .entries
        .iter()
        .all(|e| e.country.as_deref() == Some("Kenya")));
}

#[test]
fn test_operation_type_narrowing_keeps_country_options() {
    let mut dash = Dashboard::new(Arc::new(full_dataset(60)), configured()).expect("dashboard");
    let sel = FilterSelection::all().with_country(["Chile"]);
    dash.on_filter_change(&sel).expect("first");
    let update = dash
        .on_filter_change(&sel.clone().with_operation_types(["Cargo"]))
        .expect("second");
    // options depend on country and airport only
    assert!(!update.is_changed(Panel::Options));
}

#[test]
fn test_empty_selection_notice() {
    let mut dash = Dashboard::new(Arc::new(full_dataset(30)), configured()).expect("dashboard");
    let update = dash
        .on_filter_change(&FilterSelection::all().with_airports(["Nowhere International"]))
        .expect("render");
    assert_eq!(
        update.view.map,
        MapPanel::NoData {
            notice: NO_DATA_NOTICE.to_string()
        }
    );
    assert!(matches!(update.view.summary, SummaryPanel::NoData { .. }));
    assert!(update.view.top.entries.is_empty());
}

#[test]
fn test_rank_key_selects_measure() {
    let dash = Dashboard::new(Arc::new(full_dataset(50)), configured())
        .expect("dashboard")
        .with_rank_key(RankKey::Fuel);
    let view = dash.render(&FilterSelection::all());
    assert_eq!(view.top.by, RankKey::Fuel);
    let values: Vec<f64> = view.top.entries.iter().filter_map(|e| e.value).collect();
    assert_eq!(values.len(), 5);
    assert!(values.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn test_view_serializes_for_the_map_widget() {
    let dash = Dashboard::new(Arc::new(full_dataset(10)), configured()).expect("dashboard");
    let view = dash.render(&FilterSelection::all());
    let json = serde_json::to_value(&view.map).expect("json");
    assert_eq!(json["status"], "ready");
    assert!(json["markers"].as_array().map(|m| !m.is_empty()).unwrap_or(false));
}

struct CountingCounter {
    ups: Cell<u64>,
    reads: Cell<u64>,
}

impl CounterService for CountingCounter {
    fn increment(&self) -> Result<(), CounterError> {
        self.ups.set(self.ups.get() + 1);
        Ok(())
    }

    fn current(&self) -> Result<u64, CounterError> {
        self.reads.set(self.reads.get() + 1);
        Ok(1000 + self.ups.get())
    }
}

#[test]
fn test_session_counts_once_across_rerenders() {
    let counter = CountingCounter {
        ups: Cell::new(0),
        reads: Cell::new(0),
    };
    let mut dash = Dashboard::new(Arc::new(full_dataset(20)), configured()).expect("dashboard");
    let mut session = Session::new();

    for country in ["Japan", "Chile", "Norway"] {
        dash.on_filter_change(&FilterSelection::all().with_country([country]))
            .expect("render");
        let status = session.visit(Some(&counter));
        assert_eq!(status, CounterStatus::Count { visits: 1001 });
    }
    assert_eq!(counter.ups.get(), 1);
    assert_eq!(counter.reads.get(), 3);
}

#[test]
fn test_unconfigured_counter_makes_no_calls() {
    let cfg = DashboardConfig::default();
    assert!(cfg.counter_api_key.is_none());
    let counter = HttpCounter::from_config(&cfg);
    assert!(matches!(counter, Err(CounterError::Unconfigured(_))));

    let mut session = Session::new();
    assert_eq!(session.visit(None), CounterStatus::Unconfigured);
    assert!(!session.counted);
}

#[test]
fn test_missing_maps_key_leaves_other_panels() {
    let cfg = DashboardConfig {
        maps_api_key: None,
        ..configured()
    };
    let dash = Dashboard::new(Arc::new(full_dataset(15)), cfg).expect("dashboard");
    let view = dash.render(&FilterSelection::all());
    assert!(matches!(view.map, MapPanel::Unconfigured { .. }));
    assert!(matches!(view.summary, SummaryPanel::Table { .. }));
    assert_eq!(view.partners.len(), 2);
}

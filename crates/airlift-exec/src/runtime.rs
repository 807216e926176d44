//! Runtime: turn a filter selection into a `View` and report which panels
//! changed since the previous render.
//!
//! - Owns the dataset behind an `Arc`; nothing here mutates it.
//! - Recomputes filter, center, summary and ranking on every change.
//! - Panels are fingerprinted with blake3 over their JSON form; only panels
//!   whose fingerprint moved are listed in `ViewUpdate::changed`.

use std::collections::BTreeMap;
use std::sync::Arc;

use airlift_core::hash::hash_serde;
use airlift_core::prelude::{AirportRecord, DashboardConfig, Dataset, FilterSelection, Hash256};
use airlift_core::VERSION;

use airlift_operators::{
    apply_filters, build_markers, compute_bounds, compute_map_center, compute_summary,
    filter_options, top_n, RankKey,
};

use crate::error::ExecError;
use crate::metrics::emit_span;
use crate::view::{
    data_partners, MapPanel, Panel, SummaryPanel, TopEntry, TopPanel, View, NO_DATA_NOTICE,
};

/// Result of one filter change.
#[derive(Debug, Clone)]
pub struct ViewUpdate {
    pub view: View,
    /// Panels whose content differs from the previous render, in
    /// [`Panel::ALL`] order. Every panel on the first render.
    pub changed: Vec<Panel>,
    pub digests: BTreeMap<Panel, Hash256>,
}

impl ViewUpdate {
    pub fn is_changed(&self, panel: Panel) -> bool {
        self.changed.contains(&panel)
    }
}

pub struct Dashboard {
    dataset: Arc<Dataset>,
    cfg: DashboardConfig,
    rank_by: RankKey,
    last: Option<BTreeMap<Panel, Hash256>>,
}

impl Dashboard {
    pub fn new(dataset: Arc<Dataset>, cfg: DashboardConfig) -> Result<Self, ExecError> {
        cfg.validate()?;
        Ok(Self {
            dataset,
            cfg,
            rank_by: RankKey::default(),
            last: None,
        })
    }

    /// Load `cfg.data_path` and build a dashboard over it.
    pub fn open(cfg: DashboardConfig) -> Result<Self, ExecError> {
        let dataset = airlift_io::load_dataset(&cfg.data_path)?;
        Self::new(Arc::new(dataset), cfg)
    }

    pub fn with_rank_key(mut self, key: RankKey) -> Self {
        self.rank_by = key;
        self
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.cfg
    }

    /// Build the view for `selection` without touching diff state.
    pub fn render(&self, selection: &FilterSelection) -> View {
        let rows = apply_filters(&self.dataset.records, selection);
        emit_span(
            "render",
            &[
                ("rows", rows.len().to_string()),
                ("active_dimensions", selection.active_dimensions().len().to_string()),
            ],
        );

        View {
            version: VERSION.to_string(),
            dataset: self.dataset.digest.short(),
            selection: selection.clone(),
            options: filter_options(&self.dataset.records, selection),
            map: self.map_panel(&rows, selection),
            summary: self.summary_panel(&rows),
            top: self.top_panel(&rows),
            partners: data_partners(),
        }
    }

    /// Render `selection` and diff it against the previous render.
    pub fn on_filter_change(&mut self, selection: &FilterSelection) -> Result<ViewUpdate, ExecError> {
        let view = self.render(selection);
        let digests = panel_digests(&view)?;

        let changed: Vec<Panel> = match &self.last {
            None => Panel::ALL.to_vec(),
            Some(prev) => Panel::ALL
                .iter()
                .copied()
                .filter(|p| prev.get(p) != digests.get(p))
                .collect(),
        };
        for p in &changed {
            if let Some(d) = digests.get(p) {
                tracing::trace!(panel = ?p, digest = %d.short(), "panel changed");
            }
        }
        tracing::debug!(changed = changed.len(), "filter change handled");

        self.last = Some(digests.clone());
        Ok(ViewUpdate {
            view,
            changed,
            digests,
        })
    }

    /// Forget the previous render; the next change reports every panel.
    pub fn reset(&mut self) {
        self.last = None;
    }

    fn map_panel(&self, rows: &[&AirportRecord], selection: &FilterSelection) -> MapPanel {
        if self.cfg.maps_api_key.is_none() {
            return MapPanel::Unconfigured {
                reason: "GOOGLE_MAPS_API_KEY is not set".into(),
            };
        }
        if rows.is_empty() {
            return MapPanel::NoData {
                notice: NO_DATA_NOTICE.into(),
            };
        }
        let markers = build_markers(rows.iter().copied());
        MapPanel::Ready {
            center: compute_map_center(rows.iter().copied()),
            zoom: self.cfg.zoom_for(selection.has_country()),
            min_zoom: self.cfg.min_zoom,
            max_zoom: self.cfg.max_zoom,
            bounds: compute_bounds(rows.iter().copied()),
            fit_bounds: markers.len() > 1,
            markers,
        }
    }

    fn summary_panel(&self, rows: &[&AirportRecord]) -> SummaryPanel {
        if rows.is_empty() {
            return SummaryPanel::NoData {
                notice: NO_DATA_NOTICE.into(),
            };
        }
        let totals = compute_summary(rows.iter().copied());
        SummaryPanel::Table {
            table: totals.table(&self.dataset.schema),
            totals,
        }
    }

    fn top_panel(&self, rows: &[&AirportRecord]) -> TopPanel {
        let key = self.rank_by;
        let entries = top_n(rows.iter().copied(), self.cfg.top_n, key)
            .into_iter()
            .enumerate()
            .map(|(i, r)| TopEntry {
                rank: i + 1,
                airport: r.name.clone(),
                country: r.country.clone(),
                icao: r.icao.clone(),
                flights: r.flights,
                value: key.value_of(r),
            })
            .collect();
        TopPanel { by: key, entries }
    }
}

fn panel_digests(view: &View) -> Result<BTreeMap<Panel, Hash256>, ExecError> {
    let hash = |r: Result<Hash256, airlift_core::error::Error>| {
        r.map_err(|e| ExecError::Hash(e.to_string()))
    };
    let mut out = BTreeMap::new();
    out.insert(Panel::Options, hash(hash_serde(&view.options))?);
    out.insert(Panel::Map, hash(hash_serde(&view.map))?);
    out.insert(Panel::Summary, hash(hash_serde(&view.summary))?);
    out.insert(Panel::TopN, hash(hash_serde(&view.top))?);
    out.insert(Panel::Partners, hash(hash_serde(&view.partners))?);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use airlift_core::hash::hash_str;
    use airlift_core::schema::Schema;

    fn rec(id: u64, name: &str, country: &str, flights: u64, coords: Option<(f64, f64)>) -> AirportRecord {
        let mut r = AirportRecord::new(id, name);
        r.country = Some(country.to_string());
        r.flights = flights;
        r.fuel_kg = flights as f64 * 10.0;
        r.nox_g = flights as f64;
        if let Some((lat, lon)) = coords {
            r.latitude = Some(lat);
            r.longitude = Some(lon);
        }
        r
    }

    fn dashboard(maps_key: bool) -> Dashboard {
        let records = vec![
            rec(0, "A", "X", 100, Some((10.0, 10.0))),
            rec(1, "B", "Y", 50, Some((30.0, 30.0))),
            rec(2, "C", "X", 70, None),
        ];
        let ds = Dataset::new(Schema::sample(), records, hash_str("fixture"));
        let cfg = DashboardConfig {
            maps_api_key: maps_key.then(|| "k".to_string()),
            ..DashboardConfig::default()
        };
        Dashboard::new(Arc::new(ds), cfg).unwrap()
    }

    #[test]
    fn country_selection_zooms_in_and_sums_unmapped_rows() {
        let d = dashboard(true);
        let view = d.render(&FilterSelection::all().with_country(["X"]));
        match &view.map {
            MapPanel::Ready {
                zoom,
                markers,
                fit_bounds,
                center,
                ..
            } => {
                assert_eq!(*zoom, 5);
                assert_eq!(markers.len(), 1);
                assert!(!fit_bounds);
                assert_eq!(center.lat, 10.0);
            }
            other => panic!("unexpected map panel: {other:?}"),
        }
        match &view.summary {
            SummaryPanel::Table { totals, .. } => {
                assert_eq!(totals.flights, 170);
                assert_eq!(totals.airports, 2);
            }
            other => panic!("unexpected summary panel: {other:?}"),
        }
    }

    #[test]
    fn missing_map_key_only_affects_map() {
        let d = dashboard(false);
        let view = d.render(&FilterSelection::all());
        assert!(matches!(view.map, MapPanel::Unconfigured { .. }));
        assert!(matches!(view.summary, SummaryPanel::Table { .. }));
        assert_eq!(view.top.entries.len(), 3);
    }

    #[test]
    fn empty_selection_shows_notice() {
        let d = dashboard(true);
        let view = d.render(&FilterSelection::all().with_country(["Z"]));
        assert_eq!(
            view.map,
            MapPanel::NoData {
                notice: NO_DATA_NOTICE.into()
            }
        );
        assert!(matches!(view.summary, SummaryPanel::NoData { .. }));
        assert!(view.top.entries.is_empty());
    }

    #[test]
    fn diff_reports_only_changed_panels() {
        let mut d = dashboard(true);
        let first = d.on_filter_change(&FilterSelection::all()).unwrap();
        assert_eq!(first.changed, Panel::ALL.to_vec());

        let again = d.on_filter_change(&FilterSelection::all()).unwrap();
        assert!(again.changed.is_empty());

        let narrowed = d
            .on_filter_change(&FilterSelection::all().with_country(["Y"]))
            .unwrap();
        assert!(narrowed.is_changed(Panel::Map));
        assert!(narrowed.is_changed(Panel::Summary));
        assert!(!narrowed.is_changed(Panel::Partners));

        d.reset();
        let fresh = d.on_filter_change(&FilterSelection::all()).unwrap();
        assert_eq!(fresh.changed.len(), Panel::ALL.len());
    }
}

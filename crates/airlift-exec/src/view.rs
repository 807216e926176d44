//! Typed view payload handed to the presentation layer.
//!
//! Every panel serializes to plain JSON; the map widget receives data, never
//! generated script.

use serde::{Deserialize, Serialize};

use airlift_core::prelude::{FilterSelection, GeoPoint};
use airlift_operators::{FilterOptions, MapBounds, Marker, RankKey, Summary, SummaryTable};

/// Shown in place of the map and the summary when the selection is empty.
pub const NO_DATA_NOTICE: &str =
    "No data available for the selected filter. Please adjust your selection.";

/// Independently redrawable parts of the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Panel {
    Options,
    Map,
    Summary,
    TopN,
    Partners,
}

impl Panel {
    pub const ALL: [Panel; 5] = [
        Panel::Options,
        Panel::Map,
        Panel::Summary,
        Panel::TopN,
        Panel::Partners,
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MapPanel {
    Ready {
        center: GeoPoint,
        zoom: u8,
        min_zoom: u8,
        max_zoom: u8,
        bounds: Option<MapBounds>,
        /// Fit to `bounds` instead of `center`/`zoom`; set when more than one
        /// marker is shown.
        fit_bounds: bool,
        markers: Vec<Marker>,
    },
    NoData {
        notice: String,
    },
    /// The map credential is missing. Only this panel is affected.
    Unconfigured {
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SummaryPanel {
    Table {
        table: SummaryTable,
        /// Full-precision totals behind the table.
        totals: Summary,
    },
    NoData {
        notice: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopEntry {
    /// 1-based.
    pub rank: usize,
    pub airport: String,
    pub country: Option<String>,
    pub icao: Option<String>,
    pub flights: u64,
    /// The ranked measure; `None` if the row does not carry that pollutant.
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopPanel {
    pub by: RankKey,
    pub entries: Vec<TopEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataPartner {
    pub name: String,
    pub description: String,
    pub url: String,
}

pub fn data_partners() -> Vec<DataPartner> {
    vec![
        DataPartner {
            name: "Spire Aviation".into(),
            description: "Global flight tracking data.".into(),
            url: "https://spire.com/aviation/".into(),
        },
        DataPartner {
            name: "IBA".into(),
            description: "Aviation intelligence and advisory services.".into(),
            url: "https://www.iba.aero".into(),
        },
    ]
}

/// Everything one render of the dashboard shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct View {
    /// Engine version that rendered this view.
    pub version: String,
    /// Short digest of the dataset file behind the view.
    pub dataset: String,
    pub selection: FilterSelection,
    pub options: FilterOptions,
    pub map: MapPanel,
    pub summary: SummaryPanel,
    pub top: TopPanel,
    pub partners: Vec<DataPartner>,
}

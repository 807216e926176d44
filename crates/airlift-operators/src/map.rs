//! Map placement: center, bounds, and typed markers.
//!
//! Only rows with both coordinates are placed. Sums in `aggregate` still
//! include the unplaced rows; the two views deliberately disagree on what
//! "the selection" covers when coordinates are missing.

use serde::{Deserialize, Serialize};

use airlift_core::id::RowId;
use airlift_core::types::{AirportRecord, GeoPoint, Pollutant};

use crate::aggregate::format_thousands;

/// Neutral world view used when nothing can be placed.
pub const FALLBACK_CENTER: GeoPoint = GeoPoint::new(20.0, 0.0);

/// Mean latitude/longitude over mappable rows, or [`FALLBACK_CENTER`].
pub fn compute_map_center<'a, I>(rows: I) -> GeoPoint
where
    I: IntoIterator<Item = &'a AirportRecord>,
{
    let (mut lat, mut lon, mut n) = (0.0_f64, 0.0_f64, 0usize);
    for p in rows.into_iter().filter_map(AirportRecord::coordinates) {
        lat += p.lat;
        lon += p.lon;
        n += 1;
    }
    if n == 0 {
        return FALLBACK_CENTER;
    }
    GeoPoint::new(lat / n as f64, lon / n as f64)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapBounds {
    pub south_west: GeoPoint,
    pub north_east: GeoPoint,
}

impl MapBounds {
    fn around(p: GeoPoint) -> Self {
        Self {
            south_west: p,
            north_east: p,
        }
    }

    fn extend(&mut self, p: GeoPoint) {
        self.south_west.lat = self.south_west.lat.min(p.lat);
        self.south_west.lon = self.south_west.lon.min(p.lon);
        self.north_east.lat = self.north_east.lat.max(p.lat);
        self.north_east.lon = self.north_east.lon.max(p.lon);
    }

    pub fn contains(&self, p: GeoPoint) -> bool {
        (self.south_west.lat..=self.north_east.lat).contains(&p.lat)
            && (self.south_west.lon..=self.north_east.lon).contains(&p.lon)
    }
}

/// Smallest box holding every mappable row; `None` if there are none.
pub fn compute_bounds<'a, I>(rows: I) -> Option<MapBounds>
where
    I: IntoIterator<Item = &'a AirportRecord>,
{
    let mut pts = rows.into_iter().filter_map(AirportRecord::coordinates);
    let mut bounds = MapBounds::around(pts.next()?);
    for p in pts {
        bounds.extend(p);
    }
    Some(bounds)
}

/// Popup content for one marker. Measures are truncated to integers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Popup {
    pub airport: String,
    pub country: Option<String>,
    pub icao: Option<String>,
    pub operation_type: Option<String>,
    pub flights: u64,
    pub fuel_kg: u64,
    /// (pollutant, grams) for every pollutant the row carries, NOx first.
    pub pollutants: Vec<(Pollutant, u64)>,
}

impl Popup {
    fn from_record(r: &AirportRecord) -> Self {
        Self {
            airport: r.name.clone(),
            country: r.country.clone(),
            icao: r.icao.clone(),
            operation_type: r.operation_type.clone(),
            flights: r.flights,
            fuel_kg: r.fuel_kg.trunc() as u64,
            pollutants: Pollutant::ALL
                .iter()
                .filter_map(|p| r.pollutant(*p).map(|v| (*p, v.trunc() as u64)))
                .collect(),
        }
    }

    /// Labelled lines in display order, numbers with thousands separators.
    pub fn lines(&self) -> Vec<(String, String)> {
        let mut out = vec![("Airport".to_string(), self.airport.clone())];
        if let Some(icao) = &self.icao {
            out.push(("ICAO".into(), icao.clone()));
        }
        out.push((
            "Country".into(),
            self.country.clone().unwrap_or_else(|| "Unknown".into()),
        ));
        if let Some(op) = &self.operation_type {
            out.push(("Operation Type".into(), op.clone()));
        }
        out.push(("Flights".into(), format_thousands(self.flights)));
        out.push(("Fuel LTO Cycle (kg)".into(), format_thousands(self.fuel_kg)));
        for (p, v) in &self.pollutants {
            out.push((format!("{} LTO (g)", p.label()), format_thousands(*v)));
        }
        out
    }
}

/// One map marker, handed to the map widget as data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub row: RowId,
    pub position: GeoPoint,
    pub label: String,
    pub popup: Popup,
}

/// Markers for every mappable row, in row order.
pub fn build_markers<'a, I>(rows: I) -> Vec<Marker>
where
    I: IntoIterator<Item = &'a AirportRecord>,
{
    rows.into_iter()
        .filter_map(|r| {
            r.coordinates().map(|position| Marker {
                row: r.id,
                position,
                label: r.name.clone(),
                popup: Popup::from_record(r),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(id: u64, lat: Option<f64>, lon: Option<f64>) -> AirportRecord {
        let mut r = AirportRecord::new(id, format!("A{id}"));
        r.latitude = lat;
        r.longitude = lon;
        r
    }

    #[test]
    fn empty_falls_back_to_world_view() {
        let c = compute_map_center(std::iter::empty());
        assert_eq!(c, GeoPoint::new(20.0, 0.0));
        assert!(compute_bounds(std::iter::empty()).is_none());
    }

    #[test]
    fn center_ignores_unmappable_rows() {
        let rows = vec![
            at(0, Some(10.0), Some(-20.0)),
            at(1, None, Some(99.0)),
            at(2, Some(30.0), Some(20.0)),
        ];
        assert_eq!(compute_map_center(&rows), GeoPoint::new(20.0, 0.0));
        let b = compute_bounds(&rows).unwrap();
        assert_eq!(b.south_west, GeoPoint::new(10.0, -20.0));
        assert_eq!(b.north_east, GeoPoint::new(30.0, 20.0));
        assert!(b.contains(GeoPoint::new(15.0, 0.0)));
    }

    #[test]
    fn only_unmappable_rows_fall_back() {
        let rows = vec![at(0, None, None)];
        assert_eq!(compute_map_center(&rows), FALLBACK_CENTER);
        assert!(build_markers(&rows).is_empty());
    }

    #[test]
    fn markers_carry_integer_popups() {
        let mut r = at(7, Some(1.0), Some(2.0));
        r.flights = 1500;
        r.fuel_kg = 2500.75;
        r.nox_g = 10.9;
        r.pm25_g = Some(3.2);
        let m = &build_markers([&r])[0];
        assert_eq!(m.row, RowId::new(7));
        assert_eq!(m.popup.fuel_kg, 2500);
        assert_eq!(
            m.popup.pollutants,
            vec![(Pollutant::Nox, 10), (Pollutant::Pm25, 3)]
        );
        let lines = m.popup.lines();
        assert!(lines.contains(&("Flights".to_string(), "1,500".to_string())));
        assert!(lines.contains(&("PM2.5 LTO (g)".to_string(), "3".to_string())));
    }
}

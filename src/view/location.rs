//! Sales by Location page
//!
//! One bubble per distinct (location, latitude, longitude), sized by total
//! revenue. The map is a Web Mercator viewport centered on the mean
//! coordinates of all locations at the configured zoom level.

use super::format;
use crate::aggregate::{self, LocationSales};
use crate::config::DisplayConfig;
use crate::data::SalesTable;
use serde::Serialize;
use std::f64::consts::PI;

/// Smallest bubble drawn, in pixels
pub const RADIUS_MIN_PIXELS: f64 = 5.0;
/// Largest bubble drawn, in pixels
pub const RADIUS_MAX_PIXELS: f64 = 100.0;

/// Reference viewport the point percentages are computed against, in pixels
pub const VIEWPORT_WIDTH: f64 = 960.0;
pub const VIEWPORT_HEIGHT: f64 = 540.0;

/// Web Mercator tile edge at zoom 0
const TILE_SIZE: f64 = 256.0;
const MAX_ZOOM: f64 = 22.0;
const MAX_LATITUDE: f64 = 85.0511;

/// Candidate graticule steps in degrees, finest first
const GRID_STEPS: [f64; 13] = [
    0.01, 0.02, 0.05, 0.1, 0.2, 0.5, 1.0, 2.0, 5.0, 10.0, 15.0, 30.0, 45.0,
];
/// Grid lines closer than this are too dense to read
const GRID_MIN_SPACING_PX: f64 = 80.0;

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct MapCenter {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MapTooltip {
    pub location: String,
    pub revenue: String,
    pub units: String,
    /// Hover text, one line per field
    pub text: String,
}

impl MapTooltip {
    pub fn new(location: impl Into<String>, revenue: String, units: String) -> Self {
        let location = location.into();
        let text = format!(
            "Location: {}\nRevenue: {}\nSales: {} units",
            location, revenue, units
        );
        Self {
            location,
            revenue,
            units,
            text,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MapPoint {
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    pub total_revenue: f64,
    pub sales: i64,
    /// total_revenue × radius_scale
    pub radius: f64,
    /// Radius relative to the largest point, clamped to the pixel bounds
    pub pixel_radius: f64,
    /// Horizontal position in the viewport; the center is at 50
    pub x_pct: f64,
    /// Vertical position in the viewport, north at the top; the center is at 50
    pub y_pct: f64,
    /// False when the zoom pushes the point outside the viewport
    pub visible: bool,
    pub tooltip: MapTooltip,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GridAxis {
    /// A parallel, drawn horizontally
    Latitude,
    /// A meridian, drawn vertically
    Longitude,
}

/// One graticule line inside the viewport
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GridLine {
    pub axis: GridAxis,
    pub degrees: f64,
    /// y_pct for parallels, x_pct for meridians
    pub pct: f64,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LocationMapView {
    pub title: String,
    /// Mean of the location coordinates; `None` when there are no locations
    pub center: Option<MapCenter>,
    pub zoom: f64,
    pub radius_scale: f64,
    pub radius_min_pixels: f64,
    pub radius_max_pixels: f64,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub graticule: Vec<GridLine>,
    pub points: Vec<MapPoint>,
    pub caption: String,
}

pub fn render(table: &SalesTable, display: &DisplayConfig) -> LocationMapView {
    let rows = aggregate::by_location(table);
    let center = map_center(&rows);

    let (points, graticule) = match center {
        Some(center) => {
            let viewport = Viewport::new(center, display.map_zoom);
            (map_points(&rows, &viewport, display), viewport.graticule())
        }
        None => (Vec::new(), Vec::new()),
    };

    LocationMapView {
        title: "📍 Sales Map by Location".to_string(),
        center,
        zoom: display.map_zoom,
        radius_scale: display.radius_scale,
        radius_min_pixels: RADIUS_MIN_PIXELS,
        radius_max_pixels: RADIUS_MAX_PIXELS,
        viewport_width: VIEWPORT_WIDTH,
        viewport_height: VIEWPORT_HEIGHT,
        graticule,
        points,
        caption: "Each point on the map is a point of sale. Bubble size reflects the total revenue of the location.".to_string(),
    }
}

/// Mean latitude and longitude over distinct locations
pub fn map_center(rows: &[LocationSales]) -> Option<MapCenter> {
    if rows.is_empty() {
        return None;
    }
    let n = rows.len() as f64;
    Some(MapCenter {
        latitude: rows.iter().map(|r| r.latitude).sum::<f64>() / n,
        longitude: rows.iter().map(|r| r.longitude).sum::<f64>() / n,
    })
}

fn map_points(rows: &[LocationSales], viewport: &Viewport, display: &DisplayConfig) -> Vec<MapPoint> {
    let max_radius = rows
        .iter()
        .map(|r| r.total_revenue * display.radius_scale)
        .fold(0.0_f64, f64::max);

    rows.iter()
        .map(|row| {
            let radius = row.total_revenue * display.radius_scale;
            let pixel_radius = if max_radius > 0.0 {
                (radius / max_radius * RADIUS_MAX_PIXELS).clamp(RADIUS_MIN_PIXELS, RADIUS_MAX_PIXELS)
            } else {
                RADIUS_MIN_PIXELS
            };
            let (x_pct, y_pct) = viewport.project(row.latitude, row.longitude);

            MapPoint {
                location: row.location.clone(),
                latitude: row.latitude,
                longitude: row.longitude,
                total_revenue: row.total_revenue,
                sales: row.sales,
                radius,
                pixel_radius,
                x_pct,
                y_pct,
                visible: (0.0..=100.0).contains(&x_pct) && (0.0..=100.0).contains(&y_pct),
                tooltip: MapTooltip::new(
                    row.location.clone(),
                    format::currency(&display.currency_symbol, row.total_revenue),
                    format::units(row.sales),
                ),
            }
        })
        .collect()
}

/// Fixed-size Web Mercator window around a center at a zoom level
pub struct Viewport {
    center_x: f64,
    center_y: f64,
    /// Pixels per radian, 256·2^zoom / 2π
    scale: f64,
}

impl Viewport {
    pub fn new(center: MapCenter, zoom: f64) -> Self {
        let (center_x, center_y) = mercator(center.latitude, center.longitude);
        Self {
            center_x,
            center_y,
            scale: TILE_SIZE * 2f64.powf(zoom.clamp(0.0, MAX_ZOOM)) / (2.0 * PI),
        }
    }

    /// Position as percentages of the viewport, the center at (50, 50)
    pub fn project(&self, latitude: f64, longitude: f64) -> (f64, f64) {
        let (x, y) = mercator(latitude, longitude);
        let x_pct = 50.0 + (x - self.center_x) * self.scale / VIEWPORT_WIDTH * 100.0;
        // Screen y grows downward, mercator y grows northward
        let y_pct = 50.0 - (y - self.center_y) * self.scale / VIEWPORT_HEIGHT * 100.0;
        (x_pct, y_pct)
    }

    fn longitude_range(&self) -> (f64, f64) {
        let half = VIEWPORT_WIDTH / 2.0 / self.scale;
        (
            (self.center_x - half).to_degrees().max(-180.0),
            (self.center_x + half).to_degrees().min(180.0),
        )
    }

    fn latitude_range(&self) -> (f64, f64) {
        let half = VIEWPORT_HEIGHT / 2.0 / self.scale;
        (
            inverse_mercator_lat(self.center_y - half).max(-MAX_LATITUDE),
            inverse_mercator_lat(self.center_y + half).min(MAX_LATITUDE),
        )
    }

    /// Parallels and meridians at a step that keeps lines readable
    fn graticule(&self) -> Vec<GridLine> {
        let px_per_degree = self.scale * PI / 180.0;
        let step = GRID_STEPS
            .into_iter()
            .find(|step| step * px_per_degree >= GRID_MIN_SPACING_PX)
            .unwrap_or(GRID_STEPS[GRID_STEPS.len() - 1]);

        let mut lines = Vec::new();

        let (west, east) = self.longitude_range();
        for degrees in grid_values(west, east, step) {
            let (pct, _) = self.project(self.center_latitude(), degrees);
            lines.push(GridLine {
                axis: GridAxis::Longitude,
                degrees,
                pct,
                label: degree_label(degrees, 'E', 'W'),
            });
        }

        let (south, north) = self.latitude_range();
        for degrees in grid_values(south, north, step) {
            let (_, pct) = self.project(degrees, self.center_longitude());
            lines.push(GridLine {
                axis: GridAxis::Latitude,
                degrees,
                pct,
                label: degree_label(degrees, 'N', 'S'),
            });
        }

        lines
    }

    fn center_latitude(&self) -> f64 {
        inverse_mercator_lat(self.center_y)
    }

    fn center_longitude(&self) -> f64 {
        self.center_x.to_degrees()
    }
}

/// Multiples of `step` within `[min, max]`
fn grid_values(min: f64, max: f64, step: f64) -> Vec<f64> {
    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;
    (first..=last).map(|k| k as f64 * step).collect()
}

fn degree_label(degrees: f64, positive: char, negative: char) -> String {
    let value = format!("{:.2}", degrees.abs());
    let value = value.trim_end_matches('0').trim_end_matches('.');
    if value == "0" {
        "0°".to_string()
    } else if degrees > 0.0 {
        format!("{}°{}", value, positive)
    } else {
        format!("{}°{}", value, negative)
    }
}

/// Spherical Web Mercator in radians; latitude clamped to the usual bounds
fn mercator(latitude: f64, longitude: f64) -> (f64, f64) {
    let lat = latitude.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let x = longitude.to_radians();
    let y = (std::f64::consts::FRAC_PI_4 + lat / 2.0).tan().ln();
    (x, y)
}

fn inverse_mercator_lat(y: f64) -> f64 {
    y.sinh().atan().to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SalesRecord;

    fn two_locations() -> SalesTable {
        SalesTable::from_records(vec![
            SalesRecord::new("x", 1, 100.0, 0.0).location("A", 10.0, 20.0),
            SalesRecord::new("x", 3, 100.0, 0.0).location("B", 30.0, 40.0),
        ])
    }

    #[test]
    fn test_center_and_radius() {
        let view = render(&two_locations(), &DisplayConfig::default());

        assert_eq!(
            view.center,
            Some(MapCenter {
                latitude: 20.0,
                longitude: 30.0
            })
        );
        assert_eq!(view.zoom, 4.0);

        let a = &view.points[0];
        let b = &view.points[1];
        assert_eq!(a.location, "A");
        assert_eq!(a.total_revenue, 100.0);
        assert_eq!(b.total_revenue, 300.0);
        assert_eq!(b.radius, 3.0 * a.radius);
        assert_eq!(a.radius, 100.0 * 100.0);
    }

    #[test]
    fn test_pixel_radius_is_clamped() {
        let table = SalesTable::from_records(vec![
            SalesRecord::new("x", 1, 1.0, 0.0).location("Tiny", 0.0, 0.0),
            SalesRecord::new("x", 1, 1000.0, 0.0).location("Big", 1.0, 1.0),
        ]);
        let view = render(&table, &DisplayConfig::default());
        let big = view.points.iter().find(|p| p.location == "Big").unwrap();
        let tiny = view.points.iter().find(|p| p.location == "Tiny").unwrap();
        assert_eq!(big.pixel_radius, RADIUS_MAX_PIXELS);
        assert_eq!(tiny.pixel_radius, RADIUS_MIN_PIXELS);
    }

    #[test]
    fn test_projection_orientation() {
        let view = render(&two_locations(), &DisplayConfig::default());
        let a = &view.points[0];
        let b = &view.points[1];
        // B is east and north of A
        assert!(b.x_pct > a.x_pct);
        assert!(b.y_pct < a.y_pct);
        assert!(a.visible && b.visible);
    }

    fn on_equator() -> SalesTable {
        SalesTable::from_records(vec![
            SalesRecord::new("x", 1, 10.0, 0.0).location("A", 0.0, 0.0),
            SalesRecord::new("x", 1, 10.0, 0.0).location("B", 0.0, 1.0),
            SalesRecord::new("x", 1, 10.0, 0.0).location("C", 0.0, 10.0),
        ])
    }

    fn with_zoom(zoom: f64) -> DisplayConfig {
        DisplayConfig {
            map_zoom: zoom,
            ..Default::default()
        }
    }

    #[test]
    fn test_mean_center_is_viewport_middle() {
        let view = render(&on_equator(), &DisplayConfig::default());
        let center = view.center.unwrap();
        assert!((center.longitude - 11.0 / 3.0).abs() < 1e-12);

        let (x, y) = Viewport::new(center, view.zoom).project(center.latitude, center.longitude);
        assert!((x - 50.0).abs() < 1e-9);
        assert!((y - 50.0).abs() < 1e-9);

        // On the equator x is linear in longitude, so the points balance around the middle
        let mean_x = view.points.iter().map(|p| p.x_pct).sum::<f64>() / 3.0;
        assert!((mean_x - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_spreads_points() {
        let spread = |zoom: f64| {
            let view = render(&on_equator(), &with_zoom(zoom));
            view.points[2].x_pct - view.points[0].x_pct
        };
        let near = spread(4.0);
        let far = spread(6.0);
        assert!(near > 0.0);
        assert!((far / near - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_points_outside_viewport_are_hidden() {
        let table = SalesTable::from_records(vec![
            SalesRecord::new("x", 1, 10.0, 0.0).location("West", 0.0, 0.0),
            SalesRecord::new("x", 1, 10.0, 0.0).location("East", 0.0, 2.0),
        ]);

        let wide = render(&table, &with_zoom(4.0));
        assert!(wide.points.iter().all(|p| p.visible));

        let close = render(&table, &with_zoom(10.0));
        assert!(close.points.iter().all(|p| !p.visible));
        assert!(close.points[0].x_pct < 0.0);
        assert!(close.points[1].x_pct > 100.0);
    }

    #[test]
    fn test_graticule() {
        let view = render(&two_locations(), &DisplayConfig::default());
        assert!(!view.graticule.is_empty());
        assert!(view
            .graticule
            .iter()
            .all(|line| (0.0..=100.0).contains(&line.pct)));

        // Center (20, 30) at zoom 4 lands on the 10 degree grid
        let meridian = view
            .graticule
            .iter()
            .find(|l| l.axis == GridAxis::Longitude && l.label == "30°E")
            .unwrap();
        assert!((meridian.pct - 50.0).abs() < 1e-9);
        let parallel = view
            .graticule
            .iter()
            .find(|l| l.axis == GridAxis::Latitude && l.label == "20°N")
            .unwrap();
        assert!((parallel.pct - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_degree_labels() {
        assert_eq!(degree_label(-51.5, 'E', 'W'), "51.5°W");
        assert_eq!(degree_label(0.0, 'N', 'S'), "0°");
        assert_eq!(degree_label(0.30000000000000004, 'N', 'S'), "0.3°N");
        assert_eq!(degree_label(-30.0, 'N', 'S'), "30°S");
    }

    #[test]
    fn test_single_location_is_centered() {
        let table = SalesTable::from_records(vec![
            SalesRecord::new("x", 1, 5.0, 0.0).location("Only", -29.1, -51.1),
        ]);
        let view = render(&table, &DisplayConfig::default());
        assert_eq!(view.points[0].x_pct, 50.0);
        assert_eq!(view.points[0].y_pct, 50.0);
        assert_eq!(view.points[0].pixel_radius, RADIUS_MAX_PIXELS);
    }

    #[test]
    fn test_tooltip() {
        let table = SalesTable::from_records(vec![
            SalesRecord::new("x", 1200, 2.5, 0.0).location("Caxias do Sul", -29.16, -51.17),
        ]);
        let view = render(&table, &DisplayConfig::default());
        let tooltip = &view.points[0].tooltip;
        assert_eq!(tooltip.revenue, "R$ 3,000.00");
        assert_eq!(
            tooltip.text,
            "Location: Caxias do Sul\nRevenue: R$ 3,000.00\nSales: 1,200 units"
        );
    }

    #[test]
    fn test_empty_table() {
        let view = render(&SalesTable::from_records(Vec::new()), &DisplayConfig::default());
        assert!(view.center.is_none());
        assert!(view.points.is_empty());
        assert!(view.graticule.is_empty());
    }
}

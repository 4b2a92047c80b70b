//! View models returned by the dashboard API
//!
//! Mirrors of the server's page views; every value arrives pre-formatted.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct KpiTile {
    pub title: String,
    pub value: String,
    #[serde(default)]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LinePoint {
    pub label: String,
    pub timestamp: i64,
    pub value: f64,
    pub display: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LineChart {
    pub title: String,
    pub y_label: String,
    pub points: Vec<LinePoint>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: i64,
    pub display: String,
    pub height_pct: f64,
    pub revenue: String,
    pub tooltip: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BarChart {
    pub heading: String,
    pub title: String,
    pub y_label: String,
    pub bars: Vec<Bar>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    pub display: String,
    pub share_pct: f64,
    pub start_pct: f64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PieChart {
    pub heading: String,
    pub title: String,
    pub slices: Vec<PieSlice>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DashboardView {
    pub title: String,
    pub tiles: Vec<KpiTile>,
    pub revenue_over_time: LineChart,
    pub product_ranking: BarChart,
    pub payment_share: PieChart,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct MapCenter {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MapTooltip {
    pub location: String,
    pub revenue: String,
    pub units: String,
    pub text: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MapPoint {
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    pub total_revenue: f64,
    pub sales: i64,
    pub radius: f64,
    pub pixel_radius: f64,
    pub x_pct: f64,
    pub y_pct: f64,
    pub visible: bool,
    pub tooltip: MapTooltip,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GridAxis {
    Latitude,
    Longitude,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GridLine {
    pub axis: GridAxis,
    pub degrees: f64,
    pub pct: f64,
    pub label: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LocationMapView {
    pub title: String,
    #[serde(default)]
    pub center: Option<MapCenter>,
    pub zoom: f64,
    pub radius_scale: f64,
    pub radius_min_pixels: f64,
    pub radius_max_pixels: f64,
    pub viewport_width: f64,
    pub viewport_height: f64,
    #[serde(default)]
    pub graticule: Vec<GridLine>,
    pub points: Vec<MapPoint>,
    pub caption: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PlaceholderView {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ApiError {
    pub error: ApiErrorBody,
}

//! UI Components
//!
//! Reusable Leptos components for the dashboard.

pub mod chart;
pub mod geo_map;
pub mod kpi_tile;
pub mod loading;
pub mod nav;

pub use chart::{BarChart, LineChart, PieChart};
pub use geo_map::GeoMap;
pub use kpi_tile::KpiGrid;
pub use loading::{ChartSkeleton, ErrorBanner, Loading};
pub use nav::Nav;

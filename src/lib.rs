//! # Sales Dashboard
//!
//! A full-stack Rust application for exploring a static sales dataset:
//! KPI tiles, revenue over time, product ranking, payment method share and a
//! map of sales by location.
//!
//! ## Modules
//!
//! - [`data`]: CSV loading and the memoized sales table
//! - [`aggregate`]: Grouping functions and KPI computation
//! - [`view`]: Page selection and typed view models
//! - [`api`]: REST API server with Axum
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sales_dashboard::config::DisplayConfig;
//! use sales_dashboard::data::{CsvLoader, TableCache};
//! use sales_dashboard::view::{render_page, Page, PageView};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cache = TableCache::new("base_vendas.csv", CsvLoader::new());
//!     let table = cache.load()?;
//!
//!     if let PageView::Dashboard(view) =
//!         render_page(Page::SalesDashboard, &table, &DisplayConfig::default())
//!     {
//!         for tile in &view.tiles {
//!             println!("{}: {}", tile.title, tile.value);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod aggregate;
pub mod api;
pub mod config;
pub mod data;
pub mod view;

// Re-export top-level types for convenience
pub use data::{CsvLoader, LoadError, LoadKey, LoadResult, SalesRecord, SalesTable, TableCache};

pub use aggregate::{
    by_date, by_location, by_payment_method, by_product, DateRevenue, Kpis, LocationSales,
    PaymentShare, ProductSales,
};

pub use view::{render_page, KpiTile, Page, PageView};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{ApiConfig, Config, ConfigError, DataConfig, DisplayConfig, LoggingConfig};

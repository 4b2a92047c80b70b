//! API access
//!
//! HTTP client and the view model types it returns.

pub mod client;
pub mod types;

pub use client::{fetch_dashboard, fetch_location_map, fetch_placeholder};

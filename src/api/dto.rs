//! Data Transfer Objects
//!
//! Response types for the API endpoints that are not view models.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::view::Page;

/// One entry of the navigation selector
#[derive(Debug, Serialize)]
pub struct PageInfo {
    pub slug: String,
    pub label: String,
}

impl From<Page> for PageInfo {
    fn from(page: Page) -> Self {
        Self {
            slug: page.slug().to_string(),
            label: page.label().to_string(),
        }
    }
}

/// Navigation response
#[derive(Debug, Serialize)]
pub struct PageListResponse {
    pub pages: Vec<PageInfo>,
}

/// Aggregation rows with a count
#[derive(Debug, Serialize)]
pub struct RowsResponse<T> {
    pub total: usize,
    pub rows: Vec<T>,
}

impl<T> From<Vec<T>> for RowsResponse<T> {
    fn from(rows: Vec<T>) -> Self {
        Self {
            total: rows.len(),
            rows,
        }
    }
}

/// Metadata about the loaded table
#[derive(Debug, Serialize)]
pub struct DatasetResponse {
    pub source: Option<String>,
    pub records: usize,
    pub unparsed_dates: usize,
    pub loaded_at: DateTime<Utc>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub dataset: String,
    pub uptime_seconds: u64,
    pub version: String,
}

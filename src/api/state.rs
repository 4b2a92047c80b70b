//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use crate::api::error::{ApiError, ApiResult};
use crate::config::{ApiConfig, DisplayConfig};
use crate::data::{SalesTable, TableCache};
use std::sync::Arc;
use std::time::Instant;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Memoized sales table, owned here rather than as a global
    pub cache: Arc<TableCache>,
    /// Presentation settings for rendered pages
    pub display: Arc<DisplayConfig>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(cache: TableCache, display: DisplayConfig, config: ApiConfig) -> Self {
        Self {
            cache: Arc::new(cache),
            display: Arc::new(display),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Current table, loading it off the async runtime when the cache misses
    pub async fn table(&self) -> ApiResult<Arc<SalesTable>> {
        let cache = Arc::clone(&self.cache);
        tokio::task::spawn_blocking(move || cache.load())
            .await
            .map_err(|e| ApiError::Internal(format!("Load task failed: {}", e)))?
            .map_err(ApiError::from)
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

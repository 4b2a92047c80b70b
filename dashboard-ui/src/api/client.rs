//! HTTP API Client
//!
//! Functions for communicating with the sales dashboard REST API.

use gloo_net::http::Request;
use serde::de::DeserializeOwned;

use super::types::{ApiError, DashboardView, LocationMapView, PlaceholderView};

/// Default API base URL, same origin as the served UI
pub const DEFAULT_API_BASE: &str = "/api/v1";

const API_URL_KEY: &str = "sales_dashboard_api_url";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

/// GET `path` under the API base and decode the JSON body
async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, String> {
    let api_base = get_api_base();

    let response = Request::get(&format!("{}{}", api_base, path))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        let status = response.status();
        return match response.json::<ApiError>().await {
            Ok(err) => Err(format!("{} ({})", err.error.message, err.error.code)),
            Err(_) => Err(format!("Request failed with status {}", status)),
        };
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Fetch the sales dashboard page
pub async fn fetch_dashboard() -> Result<DashboardView, String> {
    get_json("/pages/dashboard").await
}

/// Fetch the sales by location page
pub async fn fetch_location_map() -> Result<LocationMapView, String> {
    get_json("/pages/location").await
}

/// Fetch the placeholder page
pub async fn fetch_placeholder() -> Result<PlaceholderView, String> {
    get_json("/pages/other").await
}

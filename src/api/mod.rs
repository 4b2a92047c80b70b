//! Sales Dashboard REST API
//!
//! HTTP API layer, built with Axum.
//!
//! # Endpoints
//!
//! ## Pages
//! - `GET /api/v1/pages` - Navigation entries
//! - `GET /api/v1/pages/:slug` - View model of `dashboard`, `location` or `other`
//!
//! ## Sales
//! - `GET /api/v1/kpis` - Summary metrics
//! - `GET /api/v1/dataset` - Load metadata
//! - `GET /api/v1/sales/by-date`
//! - `GET /api/v1/sales/by-product`
//! - `GET /api/v1/sales/by-payment-method`
//! - `GET /api/v1/sales/by-location`
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! When `static_dir` is configured, the built dashboard UI is served for every
//! other path.
//!
//! # Example
//!
//! ```rust,ignore
//! use sales_dashboard::api::{serve, AppState};
//! use sales_dashboard::config::{ApiConfig, DisplayConfig};
//! use sales_dashboard::data::{CsvLoader, TableCache};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cache = TableCache::new("base_vendas.csv", CsvLoader::new());
//!     let config = ApiConfig::default();
//!
//!     let state = AppState::new(cache, DisplayConfig::default(), config.clone());
//!     serve(state, &config).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{routing::get, Router};
use std::path::Path;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::config::ApiConfig;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Page routes
        .route("/pages", get(routes::pages::list_pages))
        .route("/pages/:slug", get(routes::pages::get_page))
        // Sales routes
        .route("/kpis", get(routes::sales::get_kpis))
        .route("/dataset", get(routes::sales::get_dataset))
        .route("/sales/by-date", get(routes::sales::by_date))
        .route("/sales/by-product", get(routes::sales::by_product))
        .route(
            "/sales/by-payment-method",
            get(routes::sales::by_payment_method),
        )
        .route("/sales/by-location", get(routes::sales::by_location));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let static_dir = state.config.static_dir.clone();

    // Create shared state
    let shared_state = Arc::new(state);

    let router = Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .with_state(shared_state);

    let router = match static_dir {
        Some(dir) => {
            // Client-side routes fall back to index.html
            let index = Path::new(&dir).join("index.html");
            router.fallback_service(ServeDir::new(&dir).fallback(ServeFile::new(index)))
        }
        None => router,
    };

    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Sales dashboard listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Sales dashboard shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DisplayConfig;
    use crate::data::{CsvLoader, TableCache};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tempfile::tempdir;
    use tower::util::ServiceExt;

    const SAMPLE: &str = "Data,Produto,Quantidade,Preco_Unitario,Custo_Unitario,Metodo_Pagamento,Avaliacao,Local,Latitude,Longitude
2024-01-15,cerveja pilsen,2,10.0,4.0,Pix,4,A,10,20
2024-01-16,cerveja ipa,3,100.0,40.0,Cartão,5,B,30,40
garbage,cerveja pilsen,1,10.0,4.0,Pix,,A,10,20
";

    fn create_test_app() -> (Router, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("base_vendas.csv");
        std::fs::write(&path, SAMPLE).unwrap();

        let cache = TableCache::new(&path, CsvLoader::new());
        let state = AppState::new(cache, DisplayConfig::default(), ApiConfig::default());
        let router = build_router(state);

        (router, dir)
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_health_live() {
        let (app, _dir) = create_test_app();
        let (status, _) = get_json(app, "/health/live").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready() {
        let (app, _dir) = create_test_app();
        let (status, _) = get_json(app, "/health/ready").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready_without_data() {
        let dir = tempdir().unwrap();
        let cache = TableCache::new(dir.path().join("missing.csv"), CsvLoader::new());
        let app = build_router(AppState::new(
            cache,
            DisplayConfig::default(),
            ApiConfig::default(),
        ));

        let (status, _) = get_json(app.clone(), "/health/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

        let (status, body) = get_json(app, "/api/v1/kpis").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "DATA_LOAD_ERROR");
    }

    #[tokio::test]
    async fn test_list_pages() {
        let (app, _dir) = create_test_app();
        let (status, body) = get_json(app, "/api/v1/pages").await;

        assert_eq!(status, StatusCode::OK);
        let labels: Vec<&str> = body["pages"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["label"].as_str().unwrap())
            .collect();
        assert_eq!(labels, vec!["Sales Dashboard", "Sales by Location", "Other"]);
    }

    #[tokio::test]
    async fn test_dashboard_page() {
        let (app, _dir) = create_test_app();
        let (status, body) = get_json(app, "/api/v1/pages/dashboard").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["page"], "dashboard");
        assert_eq!(body["tiles"].as_array().unwrap().len(), 6);
        assert_eq!(body["tiles"][3]["value"], "R$ 330.00");
        assert_eq!(body["tiles"][4]["value"], "6");
        // The record with a bad date is missing from the timeline only
        assert_eq!(body["revenue_over_time"]["points"].as_array().unwrap().len(), 2);
        assert_eq!(body["product_ranking"]["bars"][1]["label"], "Cerveja Pilsen");
        assert_eq!(body["product_ranking"]["bars"][1]["value"], 3);
    }

    #[tokio::test]
    async fn test_location_page() {
        let (app, _dir) = create_test_app();
        let (status, body) = get_json(app, "/api/v1/pages/location").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["page"], "location");
        assert_eq!(body["center"]["latitude"], 20.0);
        assert_eq!(body["center"]["longitude"], 30.0);
        assert_eq!(body["points"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_other_page() {
        let (app, _dir) = create_test_app();
        let (status, body) = get_json(app, "/api/v1/pages/other").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["page"], "other");
    }

    #[tokio::test]
    async fn test_unknown_page() {
        let (app, _dir) = create_test_app();
        let (status, body) = get_json(app, "/api/v1/pages/settings").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_kpis() {
        let (app, _dir) = create_test_app();
        let (status, body) = get_json(app, "/api/v1/kpis").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_revenue"], 330.0);
        assert_eq!(body["total_cost"], 132.0);
        assert_eq!(body["average_rating"], 4.5);
        assert_eq!(body["record_count"], 3);
    }

    #[tokio::test]
    async fn test_aggregation_routes() {
        let (app, _dir) = create_test_app();

        let (status, body) = get_json(app.clone(), "/api/v1/sales/by-product").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 2);
        assert_eq!(body["rows"][0]["product"], "Cerveja Ipa");

        let (_, body) = get_json(app.clone(), "/api/v1/sales/by-payment-method").await;
        assert_eq!(body["rows"][1]["payment_method"], "Pix");
        assert_eq!(body["rows"][1]["units"], 3);

        let (_, body) = get_json(app.clone(), "/api/v1/sales/by-date").await;
        assert_eq!(body["total"], 2);

        let (_, body) = get_json(app.clone(), "/api/v1/sales/by-location").await;
        assert_eq!(body["rows"][0]["location"], "A");
        assert_eq!(body["rows"][0]["sales"], 3);

        let (_, body) = get_json(app, "/api/v1/dataset").await;
        assert_eq!(body["records"], 3);
        assert_eq!(body["unparsed_dates"], 1);
    }

    #[tokio::test]
    async fn test_static_ui_fallback() {
        let (_, dir) = create_test_app();
        let ui_dir = dir.path().join("dist");
        std::fs::create_dir(&ui_dir).unwrap();
        std::fs::write(ui_dir.join("index.html"), "<html>dashboard</html>").unwrap();

        let cache = TableCache::new(dir.path().join("base_vendas.csv"), CsvLoader::new());
        let config = ApiConfig {
            static_dir: Some(ui_dir.display().to_string()),
            ..Default::default()
        };
        let app = build_router(AppState::new(cache, DisplayConfig::default(), config));

        let response = app
            .oneshot(Request::builder().uri("/location").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"<html>dashboard</html>");
    }
}

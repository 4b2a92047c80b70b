//! Sales Routes
//!
//! Raw numbers behind the pages.
//!
//! - GET /api/v1/kpis - Summary metrics
//! - GET /api/v1/dataset - Load metadata
//! - GET /api/v1/sales/by-date - Revenue per date
//! - GET /api/v1/sales/by-product - Units and revenue per product, ranked
//! - GET /api/v1/sales/by-payment-method - Revenue and units per payment method
//! - GET /api/v1/sales/by-location - Revenue and units per point of sale

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::aggregate::{self, DateRevenue, Kpis, LocationSales, PaymentShare, ProductSales};
use crate::api::dto::{DatasetResponse, RowsResponse};
use crate::api::error::ApiResult;
use crate::api::state::AppState;

/// GET /api/v1/kpis
pub async fn get_kpis(State(state): State<Arc<AppState>>) -> ApiResult<Json<Kpis>> {
    let table = state.table().await?;
    Ok(Json(Kpis::compute(&table)))
}

/// GET /api/v1/dataset
pub async fn get_dataset(State(state): State<Arc<AppState>>) -> ApiResult<Json<DatasetResponse>> {
    let table = state.table().await?;
    Ok(Json(DatasetResponse {
        source: table.source.as_ref().map(|p| p.display().to_string()),
        records: table.len(),
        unparsed_dates: table.unparsed_dates,
        loaded_at: table.loaded_at,
    }))
}

/// GET /api/v1/sales/by-date
pub async fn by_date(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<RowsResponse<DateRevenue>>> {
    let table = state.table().await?;
    Ok(Json(aggregate::by_date(&table).into()))
}

/// GET /api/v1/sales/by-product
pub async fn by_product(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<RowsResponse<ProductSales>>> {
    let table = state.table().await?;
    Ok(Json(aggregate::by_product(&table).into()))
}

/// GET /api/v1/sales/by-payment-method
pub async fn by_payment_method(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<RowsResponse<PaymentShare>>> {
    let table = state.table().await?;
    Ok(Json(aggregate::by_payment_method(&table).into()))
}

/// GET /api/v1/sales/by-location
pub async fn by_location(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<RowsResponse<LocationSales>>> {
    let table = state.table().await?;
    Ok(Json(aggregate::by_location(&table).into()))
}

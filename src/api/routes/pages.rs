//! Page Routes
//!
//! - GET /api/v1/pages - Navigation entries
//! - GET /api/v1/pages/:slug - Rendered view model of one page

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{PageInfo, PageListResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::view::{render_page, Page, PageView};

/// GET /api/v1/pages
pub async fn list_pages() -> Json<PageListResponse> {
    Json(PageListResponse {
        pages: Page::ALL.into_iter().map(PageInfo::from).collect(),
    })
}

/// GET /api/v1/pages/:slug
///
/// Renders the selected page from the cached table.
pub async fn get_page(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> ApiResult<Json<PageView>> {
    let page = Page::from_slug(&slug)
        .ok_or_else(|| ApiError::NotFound(format!("Page '{}' does not exist", slug)))?;

    let table = state.table().await?;
    let view = render_page(page, &table, &state.display);

    tracing::debug!(page = %page, records = table.len(), "Rendered page");

    Ok(Json(view))
}

//! KPI Tile Component
//!
//! Displays one summary statistic from a typed tile view model.

use leptos::*;

use crate::api::types::KpiTile as KpiTileModel;

/// KPI tile component
#[component]
pub fn KpiTile(
    /// Title, value and optional unit
    tile: KpiTileModel,
) -> impl IntoView {
    let KpiTileModel { title, value, unit } = tile;

    view! {
        <div class="bg-gray-50 border border-gray-200 rounded-xl p-5 text-center shadow-sm">
            <div class="text-gray-500 text-base mb-1">{title}</div>
            <div class="text-2xl font-bold text-gray-800">
                {value}
                {unit.map(|u| view! { <span class="ml-1">{u}</span> })}
            </div>
        </div>
    }
}

/// Grid of KPI tiles, three per row on wide screens
#[component]
pub fn KpiGrid(tiles: Vec<KpiTileModel>) -> impl IntoView {
    view! {
        <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
            {tiles.into_iter().map(|tile| view! { <KpiTile tile=tile /> }).collect_view()}
        </div>
    }
}

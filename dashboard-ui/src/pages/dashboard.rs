//! Sales Dashboard Page
//!
//! KPI tiles, revenue over time, product ranking and payment share.

use leptos::*;

use crate::api;
use crate::api::types::DashboardView;
use crate::components::{BarChart, ChartSkeleton, ErrorBanner, KpiGrid, LineChart, PieChart};

/// Sales dashboard page component
#[component]
pub fn SalesDashboard() -> impl IntoView {
    let view_model = create_rw_signal::<Option<Result<DashboardView, String>>>(None);

    // Fetch on mount
    create_effect(move |_| {
        spawn_local(async move {
            let result = api::fetch_dashboard().await;
            if let Err(e) = &result {
                web_sys::console::error_1(&format!("Failed to fetch dashboard: {}", e).into());
            }
            view_model.set(Some(result));
        });
    });

    view! {
        <div class="space-y-8">
            {move || match view_model.get() {
                None => view! {
                    <div class="space-y-6">
                        <ChartSkeleton />
                        <ChartSkeleton />
                    </div>
                }.into_view(),
                Some(Err(message)) => view! { <ErrorBanner message=message /> }.into_view(),
                Some(Ok(dashboard)) => view! { <DashboardBody dashboard=dashboard /> }.into_view(),
            }}
        </div>
    }
}

#[component]
fn DashboardBody(dashboard: DashboardView) -> impl IntoView {
    let DashboardView {
        title,
        tiles,
        revenue_over_time,
        product_ranking,
        payment_share,
    } = dashboard;

    view! {
        <h1 class="text-3xl font-bold">{title}</h1>

        <section>
            <KpiGrid tiles=tiles />
        </section>

        <section class="bg-white rounded-xl p-6 shadow-sm">
            <LineChart chart=revenue_over_time />
        </section>

        <section class="bg-white rounded-xl p-6 shadow-sm">
            <BarChart chart=product_ranking />
        </section>

        <section class="bg-white rounded-xl p-6 shadow-sm">
            <PieChart chart=payment_share />
        </section>
    }
}

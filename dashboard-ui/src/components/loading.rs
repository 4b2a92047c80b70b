//! Loading Component
//!
//! Loading spinner, skeletons and the error banner shown when a page fails.

use leptos::*;

/// Full-page loading spinner
#[component]
pub fn Loading() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center py-12">
            <div class="loading-spinner w-8 h-8" />
        </div>
    }
}

/// Skeleton loader for chart
#[component]
pub fn ChartSkeleton() -> impl IntoView {
    view! {
        <div class="bg-gray-100 rounded-lg p-6 animate-pulse">
            <div class="h-6 bg-gray-200 rounded w-1/4 mb-4" />
            <div class="h-64 bg-gray-200 rounded" />
        </div>
    }
}

/// Error banner with the message returned by the API
#[component]
pub fn ErrorBanner(message: String) -> impl IntoView {
    view! {
        <div class="bg-red-50 border border-red-200 text-red-700 rounded-lg p-4">
            <div class="font-semibold mb-1">"Could not load sales data"</div>
            <div class="text-sm">{message}</div>
        </div>
    }
}

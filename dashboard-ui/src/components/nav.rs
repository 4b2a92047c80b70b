//! Navigation Component
//!
//! Sidebar with the page selector.

use leptos::*;
use leptos_router::*;

use crate::pages::Page;

/// Sidebar navigation component
#[component]
pub fn Nav() -> impl IntoView {
    view! {
        <nav class="w-full md:w-60 bg-gray-100 border-r border-gray-200 p-4">
            <div class="text-lg font-bold text-gray-800 mb-4">"Navigation"</div>
            <div class="flex md:flex-col gap-1">
                {Page::ALL.iter().map(|page| view! {
                    <NavLink href=page.path() label=page.label() />
                }).collect_view()}
            </div>
        </nav>
    }
}

/// Individual navigation link
#[component]
fn NavLink(
    href: &'static str,
    label: &'static str,
) -> impl IntoView {
    view! {
        <A
            href=href
            exact=true
            class="px-4 py-2 rounded-lg text-gray-700 hover:bg-gray-200 transition-colors"
            active_class="bg-white text-gray-900 font-semibold shadow-sm"
        >
            {label}
        </A>
    }
}

//! App Root Component
//!
//! Sidebar page selector and the routed content area.

use leptos::*;
use leptos_router::*;

use crate::components::Nav;
use crate::pages::{render_page, Page};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    view! {
        <Router>
            <div class="min-h-screen bg-gray-50 text-gray-900 flex flex-col md:flex-row">
                <Nav />
                <main class="flex-1 px-4 md:px-8 py-8">
                    <PageOutlet />
                </main>
            </div>
        </Router>
    }
}

/// Renders only the selected page
#[component]
fn PageOutlet() -> impl IntoView {
    let location = use_location();
    let page = create_memo(move |_| Page::from_path(&location.pathname.get()));

    move || render_page(page.get())
}

//! Pages
//!
//! The three selectable pages and the dispatch from a selection to its view.

pub mod dashboard;
pub mod location;
pub mod other;

use leptos::*;

pub use dashboard::SalesDashboard;
pub use location::SalesByLocation;
pub use other::Other;

/// Sidebar page selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    SalesDashboard,
    SalesByLocation,
    Other,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::SalesDashboard, Page::SalesByLocation, Page::Other];

    pub fn label(self) -> &'static str {
        match self {
            Page::SalesDashboard => "Sales Dashboard",
            Page::SalesByLocation => "Sales by Location",
            Page::Other => "Other",
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Page::SalesDashboard => "/",
            Page::SalesByLocation => "/location",
            Page::Other => "/other",
        }
    }

    /// Unknown paths fall back to the dashboard
    pub fn from_path(path: &str) -> Page {
        let trimmed = path.trim_end_matches('/');
        Page::ALL
            .into_iter()
            .find(|page| page.path().trim_end_matches('/') == trimmed)
            .unwrap_or(Page::SalesDashboard)
    }
}

/// Render exactly one page for the selection
pub fn render_page(page: Page) -> View {
    match page {
        Page::SalesDashboard => view! { <SalesDashboard /> }.into_view(),
        Page::SalesByLocation => view! { <SalesByLocation /> }.into_view(),
        Page::Other => view! { <Other /> }.into_view(),
    }
}

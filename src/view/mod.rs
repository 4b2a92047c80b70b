//! Page views
//!
//! The navigation selector picks exactly one [`Page`]; [`render_page`] turns
//! that choice plus the loaded table into a serializable [`PageView`].
//! Nothing is retained between renders.

pub mod dashboard;
pub mod format;
pub mod location;
pub mod placeholder;

pub use dashboard::{BarChart, DashboardView, KpiTile, LineChart, PieChart};
pub use location::{LocationMapView, MapCenter, MapPoint, MapTooltip};
pub use placeholder::PlaceholderView;

use crate::config::DisplayConfig;
use crate::data::SalesTable;
use serde::Serialize;

/// The three mutually exclusive pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    SalesDashboard,
    SalesByLocation,
    Other,
}

impl Page {
    /// Navigation order
    pub const ALL: [Page; 3] = [Page::SalesDashboard, Page::SalesByLocation, Page::Other];

    /// Label shown in the navigation selector
    pub fn label(self) -> &'static str {
        match self {
            Page::SalesDashboard => "Sales Dashboard",
            Page::SalesByLocation => "Sales by Location",
            Page::Other => "Other",
        }
    }

    /// URL segment identifying the page
    pub fn slug(self) -> &'static str {
        match self {
            Page::SalesDashboard => "dashboard",
            Page::SalesByLocation => "location",
            Page::Other => "other",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Page> {
        Page::ALL.into_iter().find(|p| p.slug() == slug)
    }
}

impl std::fmt::Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Rendered content of one page
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum PageView {
    Dashboard(DashboardView),
    Location(LocationMapView),
    Other(PlaceholderView),
}

/// Render the selected page from the table
pub fn render_page(page: Page, table: &SalesTable, display: &DisplayConfig) -> PageView {
    match page {
        Page::SalesDashboard => PageView::Dashboard(dashboard::render(table, display)),
        Page::SalesByLocation => PageView::Location(location::render(table, display)),
        Page::Other => PageView::Other(placeholder::render()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SalesRecord;

    #[test]
    fn test_slugs_round_trip() {
        for page in Page::ALL {
            assert_eq!(Page::from_slug(page.slug()), Some(page));
        }
        assert_eq!(Page::from_slug("settings"), None);
    }

    #[test]
    fn test_labels() {
        let labels: Vec<&str> = Page::ALL.iter().map(|p| p.label()).collect();
        assert_eq!(labels, vec!["Sales Dashboard", "Sales by Location", "Other"]);
    }

    #[test]
    fn test_dispatch() {
        let table = SalesTable::from_records(vec![
            SalesRecord::new("ipa", 1, 10.0, 5.0).location("A", 1.0, 1.0),
        ]);
        let display = DisplayConfig::default();

        assert!(matches!(
            render_page(Page::SalesDashboard, &table, &display),
            PageView::Dashboard(_)
        ));
        assert!(matches!(
            render_page(Page::SalesByLocation, &table, &display),
            PageView::Location(_)
        ));
        assert!(matches!(
            render_page(Page::Other, &table, &display),
            PageView::Other(_)
        ));
    }

    #[test]
    fn test_render_is_repeatable() {
        let table = SalesTable::from_records(vec![SalesRecord::new("ipa", 1, 10.0, 5.0)]);
        let display = DisplayConfig::default();
        let first = render_page(Page::SalesDashboard, &table, &display);
        let _ = render_page(Page::Other, &table, &display);
        assert_eq!(render_page(Page::SalesDashboard, &table, &display), first);
    }

    #[test]
    fn test_page_view_is_tagged() {
        let table = SalesTable::from_records(Vec::new());
        let json = serde_json::to_value(render_page(Page::Other, &table, &DisplayConfig::default()))
            .unwrap();
        assert_eq!(json["page"], "other");
        assert_eq!(json["body"], "Additional content can be added here.");
    }
}

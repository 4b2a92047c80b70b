//! Static "Other" page

use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PlaceholderView {
    pub title: String,
    pub body: String,
}

pub fn render() -> PlaceholderView {
    PlaceholderView {
        title: "📄 Other Page".to_string(),
        body: "Additional content can be added here.".to_string(),
    }
}

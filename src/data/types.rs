//! Core data types for the sales table
//!
//! - `SalesRecord`: one transactional line item with its derived fields
//! - `SalesTable`: the ordered, immutable collection produced by the loader

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

/// A single sales line item
///
/// `revenue`, `cost` and `units` are derived at construction time and are
/// never read from the source file.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SalesRecord {
    /// Transaction date, `None` when the source value could not be parsed
    pub date: Option<NaiveDateTime>,
    /// Product name in title case
    pub product: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub unit_cost: f64,
    pub payment_method: String,
    /// Customer rating, `None` when the cell is empty
    pub rating: Option<f64>,
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    /// quantity × unit_price
    pub revenue: f64,
    /// quantity × unit_cost
    pub cost: f64,
    /// Alias of quantity
    pub units: i64,
}

impl SalesRecord {
    /// Create a record, deriving revenue, cost and units
    pub fn new(
        product: impl AsRef<str>,
        quantity: i64,
        unit_price: f64,
        unit_cost: f64,
    ) -> Self {
        Self {
            date: None,
            product: title_case(product.as_ref()),
            quantity,
            unit_price,
            unit_cost,
            payment_method: String::new(),
            rating: None,
            location: String::new(),
            latitude: 0.0,
            longitude: 0.0,
            revenue: quantity as f64 * unit_price,
            cost: quantity as f64 * unit_cost,
            units: quantity,
        }
    }

    /// Builder method: set the transaction date
    pub fn date(mut self, date: Option<NaiveDateTime>) -> Self {
        self.date = date;
        self
    }

    /// Builder method: set the payment method
    pub fn payment_method(mut self, method: impl Into<String>) -> Self {
        self.payment_method = method.into();
        self
    }

    /// Builder method: set the customer rating
    pub fn rating(mut self, rating: Option<f64>) -> Self {
        self.rating = rating;
        self
    }

    /// Builder method: set the sale location and its coordinates
    pub fn location(mut self, name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        self.location = name.into();
        self.latitude = latitude;
        self.longitude = longitude;
        self
    }
}

/// The loaded dataset
#[derive(Debug, Clone, Serialize)]
pub struct SalesTable {
    /// Records in source order
    pub records: Vec<SalesRecord>,
    /// File the table was read from, if any
    pub source: Option<PathBuf>,
    /// Number of records whose date could not be parsed
    pub unparsed_dates: usize,
    /// When the load finished
    pub loaded_at: DateTime<Utc>,
}

impl SalesTable {
    /// Build a table from already-constructed records
    pub fn from_records(records: Vec<SalesRecord>) -> Self {
        let unparsed_dates = records.iter().filter(|r| r.date.is_none()).count();
        Self {
            records,
            source: None,
            unparsed_dates,
            loaded_at: Utc::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SalesRecord> {
        self.records.iter()
    }
}

/// Canonicalize a name to title case.
///
/// Every alphabetic run starts with an uppercase letter and continues in
/// lowercase; any non-alphabetic character starts a new word.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_derives_revenue_and_cost() {
        let r = SalesRecord::new("ipa", 3, 12.5, 4.0);
        assert_eq!(r.revenue, 37.5);
        assert_eq!(r.cost, 12.0);
        assert_eq!(r.units, 3);
        assert_eq!(r.product, "Ipa");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("cerveja PILSEN"), "Cerveja Pilsen");
        assert_eq!(title_case("red-ale"), "Red-Ale");
        assert_eq!(title_case("  weiss  "), "  Weiss  ");
        assert_eq!(title_case("açaí lager"), "Açaí Lager");
        assert_eq!(title_case("o'neil"), "O'Neil");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_table_counts_unparsed_dates() {
        let table = SalesTable::from_records(vec![
            SalesRecord::new("a", 1, 1.0, 0.5),
            SalesRecord::new("b", 1, 1.0, 0.5).date(
                chrono::NaiveDate::from_ymd_opt(2024, 1, 1)
                    .and_then(|d| d.and_hms_opt(0, 0, 0)),
            ),
        ]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.unparsed_dates, 1);
    }
}

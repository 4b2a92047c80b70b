//! Aggregations
//!
//! Pure grouping functions over a `SalesTable`. Each returns freshly
//! allocated rows; the input table is never modified.
//!
//! | function              | key                             | values                    |
//! |-----------------------|---------------------------------|---------------------------|
//! | [`by_date`]           | date                            | revenue                   |
//! | [`by_product`]        | product                         | units, revenue            |
//! | [`by_payment_method`] | payment method                  | revenue, units            |
//! | [`by_location`]       | (location, latitude, longitude) | total revenue, sales      |

pub mod kpi;

pub use kpi::Kpis;

use crate::data::SalesTable;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Revenue for one transaction date
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DateRevenue {
    pub date: NaiveDateTime,
    pub revenue: f64,
}

/// Sales totals for one product
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProductSales {
    pub product: String,
    pub units: i64,
    pub revenue: f64,
}

/// Sales totals for one payment method
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PaymentShare {
    pub payment_method: String,
    pub revenue: f64,
    pub units: i64,
}

/// Sales totals for one point of sale
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LocationSales {
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    pub total_revenue: f64,
    /// Units sold at this location
    pub sales: i64,
}

/// Revenue summed per date, ascending. Records without a date are skipped.
pub fn by_date(table: &SalesTable) -> Vec<DateRevenue> {
    let mut groups: BTreeMap<NaiveDateTime, f64> = BTreeMap::new();
    for record in table.iter() {
        if let Some(date) = record.date {
            *groups.entry(date).or_insert(0.0) += record.revenue;
        }
    }

    groups
        .into_iter()
        .map(|(date, revenue)| DateRevenue { date, revenue })
        .collect()
}

/// Units and revenue per product, ranked by units descending.
///
/// Groups are formed in product-name order and then stably sorted, so
/// products with equal units keep alphabetical order.
pub fn by_product(table: &SalesTable) -> Vec<ProductSales> {
    let mut groups: BTreeMap<&str, (i64, f64)> = BTreeMap::new();
    for record in table.iter() {
        let entry = groups.entry(record.product.as_str()).or_insert((0, 0.0));
        entry.0 = entry.0.saturating_add(record.units);
        entry.1 += record.revenue;
    }

    let mut rows: Vec<ProductSales> = groups
        .into_iter()
        .map(|(product, (units, revenue))| ProductSales {
            product: product.to_string(),
            units,
            revenue,
        })
        .collect();

    rows.sort_by(|a, b| b.units.cmp(&a.units));
    rows
}

/// Revenue and units per payment method, ascending by method name
pub fn by_payment_method(table: &SalesTable) -> Vec<PaymentShare> {
    let mut groups: BTreeMap<&str, (f64, i64)> = BTreeMap::new();
    for record in table.iter() {
        let entry = groups
            .entry(record.payment_method.as_str())
            .or_insert((0.0, 0));
        entry.0 += record.revenue;
        entry.1 = entry.1.saturating_add(record.units);
    }

    groups
        .into_iter()
        .map(|(method, (revenue, units))| PaymentShare {
            payment_method: method.to_string(),
            revenue,
            units,
        })
        .collect()
}

/// Revenue and units per (location, latitude, longitude).
///
/// Ordered by name, then latitude, then longitude.
pub fn by_location(table: &SalesTable) -> Vec<LocationSales> {
    let mut index: HashMap<(&str, u64, u64), usize> = HashMap::new();
    let mut rows: Vec<LocationSales> = Vec::new();

    for record in table.iter() {
        let key = (
            record.location.as_str(),
            coord_bits(record.latitude),
            coord_bits(record.longitude),
        );
        let idx = *index.entry(key).or_insert_with(|| {
            rows.push(LocationSales {
                location: record.location.clone(),
                latitude: record.latitude,
                longitude: record.longitude,
                total_revenue: 0.0,
                sales: 0,
            });
            rows.len() - 1
        });
        rows[idx].total_revenue += record.revenue;
        rows[idx].sales = rows[idx].sales.saturating_add(record.units);
    }

    rows.sort_by(|a, b| {
        a.location
            .cmp(&b.location)
            .then(a.latitude.total_cmp(&b.latitude))
            .then(a.longitude.total_cmp(&b.longitude))
    });
    rows
}

/// Bit pattern used as a grouping key; `-0.0` groups with `0.0`
fn coord_bits(value: f64) -> u64 {
    if value == 0.0 {
        0.0f64.to_bits()
    } else {
        value.to_bits()
    }
}

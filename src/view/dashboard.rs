//! Sales Dashboard page
//!
//! KPI tiles, revenue over time, product ranking and payment method share.

use super::format;
use crate::aggregate::{self, Kpis};
use crate::config::DisplayConfig;
use crate::data::SalesTable;
use chrono::{NaiveDateTime, Timelike};
use serde::Serialize;

/// One summary statistic
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct KpiTile {
    pub title: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl KpiTile {
    pub fn new(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            unit: None,
        }
    }

    /// Builder method: set the unit shown after the value
    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LinePoint {
    /// Date label for the x axis
    pub label: String,
    /// Milliseconds since epoch, for x positioning
    pub timestamp: i64,
    pub value: f64,
    pub display: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LineChart {
    pub title: String,
    pub y_label: String,
    pub points: Vec<LinePoint>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: i64,
    pub display: String,
    /// Height relative to the tallest bar, 0..=100
    pub height_pct: f64,
    /// Formatted product revenue
    pub revenue: String,
    /// Hover text with the product revenue
    pub tooltip: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BarChart {
    pub heading: String,
    pub title: String,
    pub y_label: String,
    pub bars: Vec<Bar>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    pub display: String,
    pub share_pct: f64,
    /// Cumulative share of the slices before this one
    pub start_pct: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PieChart {
    pub heading: String,
    pub title: String,
    pub slices: Vec<PieSlice>,
}

/// Everything the dashboard page shows
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardView {
    pub title: String,
    pub tiles: Vec<KpiTile>,
    pub revenue_over_time: LineChart,
    pub product_ranking: BarChart,
    pub payment_share: PieChart,
}

pub fn render(table: &SalesTable, display: &DisplayConfig) -> DashboardView {
    let kpis = Kpis::compute(table);

    DashboardView {
        title: display.dashboard_title.clone(),
        tiles: kpi_tiles(&kpis, display),
        revenue_over_time: revenue_over_time(table, display),
        product_ranking: product_ranking(table, display),
        payment_share: payment_share(table, display),
    }
}

/// The six dashboard tiles, in display order
pub fn kpi_tiles(kpis: &Kpis, display: &DisplayConfig) -> Vec<KpiTile> {
    let symbol = display.currency_symbol.as_str();
    let rating = kpis
        .average_rating
        .map(format::rating)
        .unwrap_or_else(|| "n/a".to_string());

    vec![
        KpiTile::new("Profit Margin", format::percent(kpis.profit_margin_pct)),
        KpiTile::new("Average Rating", rating).unit("⭐"),
        KpiTile::new("Average Ticket", format::currency(symbol, kpis.average_ticket)),
        KpiTile::new("Total Revenue", format::currency(symbol, kpis.total_revenue)),
        KpiTile::new("Units Sold", format::units(kpis.total_units)),
        KpiTile::new("Transactions", format::units(kpis.record_count as i64)),
    ]
}

fn revenue_over_time(table: &SalesTable, display: &DisplayConfig) -> LineChart {
    let points = aggregate::by_date(table)
        .into_iter()
        .map(|row| LinePoint {
            label: date_label(&row.date),
            timestamp: row.date.and_utc().timestamp_millis(),
            value: row.revenue,
            display: format::currency(&display.currency_symbol, row.revenue),
        })
        .collect();

    LineChart {
        title: "Revenue Over Time".to_string(),
        y_label: format!("Revenue ({})", display.currency_symbol),
        points,
    }
}

fn product_ranking(table: &SalesTable, display: &DisplayConfig) -> BarChart {
    let rows = aggregate::by_product(table);
    let max_units = rows.iter().map(|r| r.units).max().unwrap_or(0);

    let bars = rows
        .into_iter()
        .map(|row| {
            let revenue = format::currency(&display.currency_symbol, row.revenue);
            Bar {
                height_pct: if max_units > 0 {
                    (row.units.max(0) as f64 / max_units as f64) * 100.0
                } else {
                    0.0
                },
                tooltip: format!("Revenue: {}", revenue),
                revenue,
                display: format::units(row.units),
                value: row.units,
                label: row.product,
            }
        })
        .collect();

    BarChart {
        heading: "🥇 Top Selling Products".to_string(),
        title: "Sales Ranking by Product".to_string(),
        y_label: "Quantity Sold".to_string(),
        bars,
    }
}

fn payment_share(table: &SalesTable, display: &DisplayConfig) -> PieChart {
    let rows = aggregate::by_payment_method(table);
    let total: f64 = rows.iter().map(|r| r.revenue).sum();

    let mut start_pct = 0.0;
    let slices = rows
        .into_iter()
        .map(|row| {
            let share_pct = if total != 0.0 {
                row.revenue / total * 100.0
            } else {
                0.0
            };
            let slice = PieSlice {
                display: format::currency(&display.currency_symbol, row.revenue),
                value: row.revenue,
                label: row.payment_method,
                share_pct,
                start_pct,
            };
            start_pct += share_pct;
            slice
        })
        .collect();

    PieChart {
        heading: "💳 Revenue by Payment Method".to_string(),
        title: "Share of Revenue".to_string(),
        slices,
    }
}

fn date_label(date: &NaiveDateTime) -> String {
    if date.num_seconds_from_midnight() == 0 {
        date.format("%Y-%m-%d").to_string()
    } else {
        date.format("%Y-%m-%d %H:%M").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SalesRecord;
    use chrono::NaiveDate;

    fn day(d: u32) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(2024, 5, d).and_then(|d| d.and_hms_opt(0, 0, 0))
    }

    fn table() -> SalesTable {
        SalesTable::from_records(vec![
            SalesRecord::new("pilsen", 1000, 10.0, 4.0)
                .date(day(1))
                .payment_method("Pix")
                .rating(Some(4.0)),
            SalesRecord::new("ipa", 500, 20.0, 15.0)
                .date(day(2))
                .payment_method("Cartão")
                .rating(Some(5.0)),
        ])
    }

    #[test]
    fn test_tiles() {
        let view = render(&table(), &DisplayConfig::default());
        let tiles: Vec<(&str, &str)> = view
            .tiles
            .iter()
            .map(|t| (t.title.as_str(), t.value.as_str()))
            .collect();

        assert_eq!(
            tiles,
            vec![
                ("Profit Margin", "42.50%"),
                ("Average Rating", "4.5"),
                ("Average Ticket", "R$ 10,000.00"),
                ("Total Revenue", "R$ 20,000.00"),
                ("Units Sold", "1,500"),
                ("Transactions", "2"),
            ]
        );
        assert_eq!(view.tiles[1].unit.as_deref(), Some("⭐"));
    }

    #[test]
    fn test_rating_tile_without_ratings() {
        let table = SalesTable::from_records(vec![SalesRecord::new("a", 1, 1.0, 1.0)]);
        let view = render(&table, &DisplayConfig::default());
        assert_eq!(view.tiles[1].value, "n/a");
    }

    #[test]
    fn test_line_chart() {
        let view = render(&table(), &DisplayConfig::default());
        let chart = &view.revenue_over_time;
        assert_eq!(chart.y_label, "Revenue (R$)");
        assert_eq!(chart.points.len(), 2);
        assert_eq!(chart.points[0].label, "2024-05-01");
        assert_eq!(chart.points[0].display, "R$ 10,000.00");
        assert!(chart.points[0].timestamp < chart.points[1].timestamp);
    }

    #[test]
    fn test_bar_chart() {
        let view = render(&table(), &DisplayConfig::default());
        let bars = &view.product_ranking.bars;
        assert_eq!(bars[0].label, "Pilsen");
        assert_eq!(bars[0].height_pct, 100.0);
        assert_eq!(bars[0].display, "1,000");
        assert_eq!(bars[1].height_pct, 50.0);
        assert_eq!(bars[1].revenue, "R$ 10,000.00");
        assert_eq!(bars[1].tooltip, "Revenue: R$ 10,000.00");
    }

    #[test]
    fn test_pie_chart() {
        let view = render(&table(), &DisplayConfig::default());
        let slices = &view.payment_share.slices;
        assert_eq!(slices[0].label, "Cartão");
        assert_eq!(slices[0].share_pct, 50.0);
        assert_eq!(slices[0].start_pct, 0.0);
        assert_eq!(slices[1].start_pct, 50.0);
    }

    #[test]
    fn test_empty_table() {
        let view = render(&SalesTable::from_records(Vec::new()), &DisplayConfig::default());
        assert_eq!(view.tiles.len(), 6);
        assert_eq!(view.tiles[0].value, "0.00%");
        assert_eq!(view.tiles[2].value, "R$ 0.00");
        assert!(view.revenue_over_time.points.is_empty());
        assert!(view.product_ranking.bars.is_empty());
        assert!(view.payment_share.slices.is_empty());
    }

    #[test]
    fn test_date_label_with_time() {
        let dt = NaiveDate::from_ymd_opt(2024, 5, 1)
            .and_then(|d| d.and_hms_opt(9, 5, 0))
            .unwrap();
        assert_eq!(date_label(&dt), "2024-05-01 09:05");
    }
}

//! Summary metrics for the dashboard tiles

use crate::data::SalesTable;
use serde::Serialize;

/// Scalar KPIs computed over the whole table
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Kpis {
    pub total_revenue: f64,
    pub total_cost: f64,
    /// (revenue − cost) / revenue × 100, or 0 when revenue is 0
    pub profit_margin_pct: f64,
    /// Mean of the present ratings; `None` when no record has one
    pub average_rating: Option<f64>,
    /// revenue / record count, or 0 when there are no records
    pub average_ticket: f64,
    pub total_units: i64,
    pub record_count: usize,
}

impl Kpis {
    pub fn compute(table: &SalesTable) -> Self {
        let total_revenue: f64 = table.iter().map(|r| r.revenue).sum();
        let total_cost: f64 = table.iter().map(|r| r.cost).sum();
        let total_units = table.iter().fold(0_i64, |acc, r| acc.saturating_add(r.units));
        let record_count = table.len();

        let profit_margin_pct = if total_revenue != 0.0 {
            (total_revenue - total_cost) / total_revenue * 100.0
        } else {
            0.0
        };

        let (rating_sum, rating_count) = table
            .iter()
            .filter_map(|r| r.rating)
            .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
        let average_rating = (rating_count > 0).then(|| rating_sum / rating_count as f64);

        let average_ticket = if record_count > 0 {
            total_revenue / record_count as f64
        } else {
            0.0
        };

        Self {
            total_revenue,
            total_cost,
            profit_margin_pct,
            average_rating,
            average_ticket,
            total_units,
            record_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SalesRecord;

    #[test]
    fn test_compute() {
        let table = SalesTable::from_records(vec![
            SalesRecord::new("a", 2, 10.0, 4.0).rating(Some(4.0)),
            SalesRecord::new("b", 3, 20.0, 15.0).rating(None),
            SalesRecord::new("c", 1, 20.0, 1.0).rating(Some(5.0)),
        ]);
        let kpis = Kpis::compute(&table);

        assert_eq!(kpis.total_revenue, 100.0);
        assert_eq!(kpis.total_cost, 54.0);
        assert_eq!(kpis.profit_margin_pct, 46.0);
        assert_eq!(kpis.average_rating, Some(4.5));
        assert!((kpis.average_ticket - 100.0 / 3.0).abs() < 1e-12);
        assert_eq!(kpis.total_units, 6);
        assert_eq!(kpis.record_count, 3);
    }

    #[test]
    fn test_zero_revenue_margin_is_zero() {
        let table = SalesTable::from_records(vec![SalesRecord::new("free sample", 4, 0.0, 2.0)]);
        let kpis = Kpis::compute(&table);
        assert_eq!(kpis.total_revenue, 0.0);
        assert_eq!(kpis.profit_margin_pct, 0.0);
        assert!(!kpis.profit_margin_pct.is_nan());
    }

    #[test]
    fn test_total_units_saturates() {
        let table = SalesTable::from_records(vec![
            SalesRecord::new("a", i64::MAX, 1.0, 0.0),
            SalesRecord::new("a", i64::MAX, 1.0, 0.0),
        ]);
        assert_eq!(Kpis::compute(&table).total_units, i64::MAX);
    }

    #[test]
    fn test_empty_table() {
        let kpis = Kpis::compute(&SalesTable::from_records(Vec::new()));
        assert_eq!(kpis.average_ticket, 0.0);
        assert_eq!(kpis.profit_margin_pct, 0.0);
        assert_eq!(kpis.average_rating, None);
        assert_eq!(kpis.total_units, 0);
        assert_eq!(kpis.record_count, 0);
    }
}

//! Client-side aggregation of per-day reports into range totals.

use serde::Serialize;

use crate::model::DailyReport;

/// Field-wise sum of a list of daily reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportTotals {
    pub total_orders: i64,
    pub paid_orders: i64,
    pub completed_orders: i64,
    pub total_revenue: f64,
    pub total_shipping_revenue: f64,
}

impl ReportTotals {
    fn add(mut self, report: &DailyReport) -> Self {
        self.total_orders += report.total_orders;
        self.paid_orders += report.paid_orders;
        self.completed_orders += report.completed_orders;
        self.total_revenue += report.total_revenue;
        self.total_shipping_revenue += report.total_shipping_revenue;
        self
    }
}

/// Sum the five numeric fields of `reports`.
///
/// An empty list has no totals (`None`), which is distinct from a row of zeros.
pub fn aggregate(reports: &[DailyReport]) -> Option<ReportTotals> {
    if reports.is_empty() {
        return None;
    }
    Some(
        reports
            .iter()
            .fold(ReportTotals::default(), ReportTotals::add),
    )
}

/// Completed orders as a percentage of paid orders (paid floored at 1).
pub fn completion_rate(report: &DailyReport) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let (completed, paid) = (report.completed_orders as f64, report.paid_orders.max(1) as f64);
    completed / paid * 100.0
}

//! Output formatting helpers.

use std::io::{self, Write};

use ceybazaar_core::Session;
use ceybazaar_core::model::{DailyReport, Order};
use ceybazaar_core::report::ReportTotals;
use chrono::{DateTime, Utc};

use crate::routes::Route;

/// `Rs. 1234.50`
pub fn rupees(amount: f64) -> String {
    format!("Rs. {amount:.2}")
}

/// `1234.50 LKR`
pub fn lkr(amount: f64) -> String {
    format!("{amount:.2} LKR")
}

pub fn truncate(s: &str, max: usize) -> String {
    let count = s.chars().count();
    if count <= max {
        s.to_string()
    } else if max == 0 {
        String::new()
    } else {
        format!("{}…", s.chars().take(max.saturating_sub(1)).collect::<String>())
    }
}

/// Header line of the dashboard layout.
pub fn write_layout_header(
    w: &mut impl Write,
    route: Route,
    session: Option<&Session>,
) -> io::Result<()> {
    let user = session.map_or("-", |s| s.user_name.as_str());
    writeln!(w, "CeyBazaar Admin | {} | {user}", route.title())?;
    writeln!(w, "{}", "=".repeat(60))
}

pub fn write_session_status(
    w: &mut impl Write,
    session: &Session,
    now: DateTime<Utc>,
) -> io::Result<()> {
    let remaining = session.remaining_at(now);
    writeln!(w, "Logged in as: {}", session.user_name)?;
    writeln!(w, "Login time:   {}", session.login_time.to_rfc3339())?;
    writeln!(w, "Expires:      {}", session.expiration_time.to_rfc3339())?;
    if session.is_active_at(now) {
        writeln!(
            w,
            "Remaining:    {}m {}s",
            remaining.num_minutes(),
            remaining.num_seconds() % 60
        )?;
    } else {
        writeln!(w, "Remaining:    expired")?;
    }
    Ok(())
}

/// The four headline statistics of a report.
pub fn write_report_stats(
    w: &mut impl Write,
    total_orders: i64,
    paid_orders: i64,
    completed_orders: i64,
    total_revenue: f64,
) -> io::Result<()> {
    writeln!(w, "  Total Orders:     {total_orders}")?;
    writeln!(w, "  Paid Orders:      {paid_orders}")?;
    writeln!(w, "  Completed Orders: {completed_orders}")?;
    writeln!(w, "  Total Revenue:    {}", lkr(total_revenue))
}

pub fn write_daily_report(w: &mut impl Write, report: &DailyReport) -> io::Result<()> {
    write_report_stats(
        w,
        report.total_orders,
        report.paid_orders,
        report.completed_orders,
        report.total_revenue,
    )
}

pub fn write_totals(w: &mut impl Write, totals: &ReportTotals) -> io::Result<()> {
    write_report_stats(
        w,
        totals.total_orders,
        totals.paid_orders,
        totals.completed_orders,
        totals.total_revenue,
    )?;
    writeln!(w, "  Shipping Revenue: {}", lkr(totals.total_shipping_revenue))
}

pub fn write_breakdown_row(w: &mut impl Write, report: &DailyReport) -> io::Result<()> {
    writeln!(
        w,
        "  {:<12} Orders: {:<4} Paid: {:<4} Completed: {:<4} Revenue: {}",
        report.date.as_deref().unwrap_or("-"),
        report.total_orders,
        report.paid_orders,
        report.completed_orders,
        rupees(report.total_revenue),
    )
}

pub fn write_order_detail(w: &mut impl Write, order: &Order) -> io::Result<()> {
    writeln!(w, "  Order:    {}", order.order_id)?;
    writeln!(w, "  Customer: {}", order.customer_name)?;
    writeln!(w, "  Email:    {}", order.customer_email.as_deref().unwrap_or("-"))?;
    writeln!(w, "  Address:  {}", order.address.as_deref().unwrap_or("-"))?;
    writeln!(w, "  Region:   {}", order.region.as_deref().unwrap_or("-"))?;
    writeln!(w, "  Status:   {}", order.status)?;
    writeln!(w, "  Delivery: {}", order.delivery_status)?;
    writeln!(w, "  Shipping: {}", rupees(order.shipping_cost))?;
    writeln!(w, "  Total:    {}", rupees(order.total_cost))?;
    if let Some(date) = &order.added_on {
        writeln!(w, "  Date:     {date}")?;
    }
    if !order.order_items.is_empty() {
        writeln!(w, "  Items:")?;
        for item in &order.order_items {
            let price = item.unit_price.map_or_else(|| "-".to_string(), rupees);
            writeln!(
                w,
                "    {} - Qty: {} - {}",
                item.product_name, item.quantity, price
            )?;
        }
    }
    Ok(())
}

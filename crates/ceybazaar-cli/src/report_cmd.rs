//! Report commands: daily and range.

use std::io::Write;

use chrono::{Duration, Local, NaiveDate, Utc};

use crate::console::enter;
use crate::context::PageContext;
use crate::pages::{Navigation, ReportsPage};
use crate::routes::Route;

/// Days covered by `report range` when no bounds are given.
const DEFAULT_RANGE_DAYS: i64 = 7;

#[derive(clap::Subcommand, Debug)]
pub enum ReportAction {
    /// Figures for one day (default: today).
    Daily {
        /// Day as YYYY-MM-DD.
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Per-day figures and totals for a date range (default: last 7 days).
    Range {
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
    },
}

/// Resolve missing range bounds relative to `today`. The default range
/// covers seven days ending today.
pub fn resolve_range(
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    today: NaiveDate,
) -> (NaiveDate, NaiveDate) {
    let end = to.unwrap_or(today);
    let start = from.unwrap_or(end - Duration::days(DEFAULT_RANGE_DAYS - 1));
    (start, end)
}

pub async fn run(
    action: ReportAction,
    ctx: &PageContext,
    out: &mut impl Write,
) -> anyhow::Result<Navigation> {
    if let nav @ Navigation::Redirect(_) = enter(ctx, Route::Reports, Utc::now(), out)? {
        return Ok(nav);
    }
    let today = Local::now().date_naive();
    let mut page = ReportsPage::new(ctx);
    match action {
        ReportAction::Daily { date } => {
            let date = date.unwrap_or(today);
            let nav = page.load_daily(ctx, date).await;
            if nav == Navigation::Stay {
                page.render_daily(out, date)?;
            }
            Ok(nav)
        }
        ReportAction::Range { from, to } => {
            let (start, end) = resolve_range(from, to, today);
            let nav = page.load_range(ctx, start, end).await;
            if nav == Navigation::Stay {
                page.render_range(out, start, end)?;
            }
            Ok(nav)
        }
    }
}

//! Reports page (`/Reports`): one day's figures, or a date range with totals.

use std::io::{self, Write};

use chrono::NaiveDate;

use ceybazaar_core::model::DailyReport;
use ceybazaar_core::report::aggregate;

use super::{Halt, Navigation, PageState, call};
use crate::context::PageContext;
use crate::fmt::{write_breakdown_row, write_daily_report, write_totals};
use crate::scope::PageScope;

#[derive(Debug)]
pub struct ReportsPage {
    scope: PageScope,
    pub daily: PageState<Option<DailyReport>>,
    pub range: PageState<Vec<DailyReport>>,
}

impl ReportsPage {
    pub fn new(ctx: &PageContext) -> Self {
        Self {
            scope: ctx.scope(),
            daily: PageState::Loading,
            range: PageState::Loading,
        }
    }

    /// Fetch the report for `date`. A success with no payload is kept as
    /// `None` and renders as zeros.
    pub async fn load_daily(&mut self, ctx: &PageContext, date: NaiveDate) -> Navigation {
        match call(ctx, &self.scope, ctx.backend.admin.daily_report(date)).await {
            Ok(envelope) if envelope.is_success() => {
                self.daily = PageState::Ready(envelope.response_object);
                Navigation::Stay
            }
            Ok(envelope) => {
                ctx.notices.error("Failed to fetch daily report");
                self.daily.fail(envelope.description());
                Navigation::Stay
            }
            Err(Halt::Failed(e)) => {
                ctx.notices.error("Failed to fetch daily report");
                self.daily.fail(e);
                Navigation::Stay
            }
            Err(halt) => halt.navigation(),
        }
    }

    pub async fn load_range(
        &mut self,
        ctx: &PageContext,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Navigation {
        if start > end {
            ctx.notices.error("Start date must not be after end date");
            return Navigation::Stay;
        }
        match call(ctx, &self.scope, ctx.backend.admin.range_report(start, end)).await {
            Ok(envelope) => {
                let description = envelope.description().to_string();
                match envelope.into_list() {
                    Some(list) => self.range = PageState::Ready(list),
                    None => {
                        ctx.notices.error("Failed to fetch range report");
                        self.range.fail(description);
                    }
                }
                Navigation::Stay
            }
            Err(Halt::Failed(e)) => {
                ctx.notices.error("Failed to fetch range report");
                self.range.fail(e);
                Navigation::Stay
            }
            Err(halt) => halt.navigation(),
        }
    }

    pub fn render_daily(&self, w: &mut impl Write, date: NaiveDate) -> io::Result<()> {
        writeln!(w, "Daily Report: {date}")?;
        match &self.daily {
            PageState::Loading => writeln!(w, "Loading report..."),
            PageState::Failed(reason) => writeln!(w, "Report unavailable: {reason}"),
            PageState::Ready(report) => {
                write_daily_report(w, &report.clone().unwrap_or_default())
            }
        }
    }

    pub fn render_range(
        &self,
        w: &mut impl Write,
        start: NaiveDate,
        end: NaiveDate,
    ) -> io::Result<()> {
        writeln!(w, "Range Report: {start} to {end}")?;
        let list = match &self.range {
            PageState::Loading => return writeln!(w, "Loading report..."),
            PageState::Failed(reason) => return writeln!(w, "Report unavailable: {reason}"),
            PageState::Ready(list) => list,
        };
        let Some(totals) = aggregate(list) else {
            return writeln!(w, "No report data for this range.");
        };
        writeln!(w, "Summary")?;
        write_totals(w, &totals)?;
        writeln!(w)?;
        writeln!(w, "Daily Breakdown")?;
        for report in list {
            write_breakdown_row(w, report)?;
        }
        Ok(())
    }
}

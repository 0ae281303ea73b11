//! Route activation and navigation.
//!
//! Every command enters its route through [`enter`], which runs the session
//! guard and prints the layout header. Redirects returned by pages are
//! followed by [`follow`] until the console settles on a page or needs a
//! fresh login.

use std::io::Write;

use chrono::{DateTime, Local, Utc};
use tracing::debug;

use crate::context::PageContext;
use crate::fmt::write_layout_header;
use crate::guard::{GuardOutcome, check_session};
use crate::pages::{
    CategoryPage, DashboardPage, Navigation, NewProductPage, OrderFilter, OrdersPage,
    ProductListPage, RegionPage, ReportsPage,
};
use crate::routes::Route;

/// Activate `route`: guard the session and print the layout header.
///
/// Returns [`Navigation::Redirect`] when the guard found an expired session.
pub fn enter(
    ctx: &PageContext,
    route: Route,
    now: DateTime<Utc>,
    out: &mut impl Write,
) -> anyhow::Result<Navigation> {
    if !route.is_guarded() {
        return Ok(Navigation::Stay);
    }
    match check_session(ctx.session.as_ref(), now)? {
        GuardOutcome::Proceed => {}
        GuardOutcome::Redirect { to, notice } => {
            ctx.notices.push(notice);
            return Ok(Navigation::Redirect(to));
        }
    }
    write_layout_header(out, route, ctx.current_session().as_ref())?;
    Ok(Navigation::Stay)
}

/// Open the default view of `route`.
pub async fn open(
    ctx: &PageContext,
    route: Route,
    out: &mut impl Write,
) -> anyhow::Result<Navigation> {
    debug!(route = %route, "Opening route");
    if let Navigation::Redirect(to) = enter(ctx, route, Utc::now(), out)? {
        return Ok(Navigation::Redirect(to));
    }

    let nav = match route {
        Route::Login => Navigation::Redirect(Route::Login),
        Route::Home => {
            let mut page = DashboardPage::new(ctx);
            let nav = page.activate(ctx, Local::now().date_naive()).await;
            page.render(out, &ctx.dashboard)?;
            nav
        }
        Route::ProductCategory => {
            let mut page = CategoryPage::new(ctx);
            let nav = page.activate(ctx).await;
            page.render(out)?;
            nav
        }
        Route::NewProduct => {
            let mut page = NewProductPage::new(ctx);
            let nav = page.activate(ctx).await;
            page.render(out)?;
            nav
        }
        Route::ViewProducts => {
            let mut page = ProductListPage::new(ctx);
            let nav = page.activate(ctx).await;
            page.render(out, &ctx.asset_base_url)?;
            nav
        }
        Route::DeliveryRegion => {
            let mut page = RegionPage::new(ctx);
            let nav = page.activate(ctx).await;
            page.render(out)?;
            nav
        }
        Route::Orders => {
            let mut page = OrdersPage::new(ctx, OrderFilter::All);
            let nav = page.activate(ctx).await;
            page.render(out)?;
            nav
        }
        Route::Reports => {
            let today = Local::now().date_naive();
            let mut page = ReportsPage::new(ctx);
            let nav = page.load_daily(ctx, today).await;
            page.render_daily(out, today)?;
            nav
        }
    };
    Ok(nav)
}

/// Follow redirects starting from `nav`.
///
/// Stops at [`Navigation::Stay`] or at a redirect to the login route, which
/// the caller reports; login cannot be completed without new credentials.
pub async fn follow(
    ctx: &PageContext,
    mut nav: Navigation,
    out: &mut impl Write,
) -> anyhow::Result<Navigation> {
    loop {
        match nav {
            Navigation::Stay | Navigation::Redirect(Route::Login) => return Ok(nav),
            Navigation::Redirect(route) => {
                writeln!(out)?;
                nav = open(ctx, route, out).await?;
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use ceybazaar_core::config::Config;
    use ceybazaar_core::{MemorySessionStore, Session, SessionStore};
    use chrono::Duration;

    use crate::notice::NoticeLevel;

    fn context(store: MemorySessionStore) -> PageContext {
        PageContext::new(&Config::default(), Arc::new(store)).unwrap()
    }

    #[test]
    fn login_route_is_not_guarded() {
        let t0 = Utc::now() - Duration::hours(3);
        let session = Session::new("tok", "admin", t0, Duration::hours(1)).unwrap();
        let ctx = context(MemorySessionStore::with_session(Duration::hours(1), session));
        let mut out = Vec::new();
        let nav = enter(&ctx, Route::Login, Utc::now(), &mut out).unwrap();
        assert_eq!(nav, Navigation::Stay);
        assert!(out.is_empty());
        assert!(ctx.session.get().unwrap().is_some());
    }

    #[test]
    fn active_session_prints_layout_header() {
        let t0 = Utc::now();
        let session = Session::new("tok", "admin@ceybazaar.lk", t0, Duration::hours(1)).unwrap();
        let ctx = context(MemorySessionStore::with_session(Duration::hours(1), session));
        let mut out = Vec::new();
        let nav = enter(&ctx, Route::Orders, t0, &mut out).unwrap();
        assert_eq!(nav, Navigation::Stay);
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("CeyBazaar Admin | Orders | admin@ceybazaar.lk"));
    }

    #[test]
    fn expired_session_redirects_and_clears() {
        let t0 = Utc::now() - Duration::hours(2);
        let session = Session::new("tok", "admin", t0, Duration::hours(1)).unwrap();
        let ctx = context(MemorySessionStore::with_session(Duration::hours(1), session));
        let mut out = Vec::new();
        let nav = enter(&ctx, Route::Reports, Utc::now(), &mut out).unwrap();
        assert_eq!(nav, Navigation::Redirect(Route::Login));
        assert!(ctx.session.get().unwrap().is_none());
        let notices = ctx.notices.drain();
        assert_eq!(notices[0].level, NoticeLevel::Warning);
    }

    #[tokio::test]
    async fn follow_stops_at_login() {
        let ctx = context(MemorySessionStore::default());
        let mut out = Vec::new();
        let nav = follow(&ctx, Navigation::Redirect(Route::Login), &mut out)
            .await
            .unwrap();
        assert_eq!(nav, Navigation::Redirect(Route::Login));
    }
}

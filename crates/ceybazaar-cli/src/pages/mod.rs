//! View layer.
//!
//! Each page is a small state machine: it fetches through the facades inside
//! its own [`PageScope`](crate::scope::PageScope), keeps what it fetched in a
//! [`PageState`], and renders to any writer. Submissions call a facade and,
//! only on a success envelope, reset the form and re-read the list.

pub mod categories;
pub mod dashboard;
pub mod login;
pub mod orders;
pub mod products;
pub mod regions;
pub mod reports;

use std::future::Future;

use tracing::warn;

use ceybazaar_client::ApiError;

use crate::context::PageContext;
use crate::routes::Route;
use crate::scope::PageScope;

pub use categories::{CategoryForm, CategoryPage};
pub use dashboard::{DashboardData, DashboardPage};
pub use login::{LoginForm, LoginPage};
pub use orders::{OrderActions, OrderFilter, OrdersPage};
pub use products::{NewProductForm, NewProductPage, ProductListPage};
pub use regions::{RegionForm, RegionPage};
pub use reports::ReportsPage;

pub const SESSION_REJECTED: &str = "Your session is no longer valid. Please login again.";

/// Fetch state of a page's data.
#[derive(Debug, Clone, PartialEq)]
pub enum PageState<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> PageState<T> {
    pub const fn data(&self) -> Option<&T> {
        match self {
            Self::Ready(data) => Some(data),
            Self::Loading | Self::Failed(_) => None,
        }
    }

    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Record a failed fetch. Data already on screen stays (stale beats empty).
    pub(crate) fn fail(&mut self, reason: impl Into<String>) {
        if !matches!(self, Self::Ready(_)) {
            *self = Self::Failed(reason.into());
        }
    }
}

/// Where the console goes after a page step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Stay,
    Redirect(Route),
}

/// Why a scoped facade call produced no value.
#[derive(Debug)]
pub(crate) enum Halt {
    /// Page deactivated; nothing may be written to page state.
    Cancelled,
    /// Transport-level failure, already logged.
    Failed(String),
    /// Backend rejected the session; it has been cleared.
    Redirect(Route),
}

impl Halt {
    pub(crate) const fn navigation(&self) -> Navigation {
        match self {
            Self::Redirect(route) => Navigation::Redirect(*route),
            Self::Cancelled | Self::Failed(_) => Navigation::Stay,
        }
    }
}

/// Run one facade call under `scope`.
///
/// A rejected session pushes the re-login warning and yields a redirect to
/// the login route; other failures are handed back for the page to report.
pub(crate) async fn call<T, F>(ctx: &PageContext, scope: &PageScope, fut: F) -> Result<T, Halt>
where
    F: Future<Output = Result<T, ApiError>>,
{
    match scope.run(fut).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(ApiError::Unauthenticated)) => {
            ctx.notices.warning(SESSION_REJECTED);
            Err(Halt::Redirect(Route::Login))
        }
        Ok(Err(e)) => {
            warn!(error = %e, "Backend call failed");
            Err(Halt::Failed(e.to_string()))
        }
        Err(_) => Err(Halt::Cancelled),
    }
}

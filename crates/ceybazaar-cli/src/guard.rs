//! Session guard, run once per page activation.

use chrono::{DateTime, Utc};
use tracing::warn;

use ceybazaar_core::{SessionStatus, SessionStore};

use crate::notice::{Notice, NoticeLevel};
use crate::routes::Route;

pub const SESSION_EXPIRED: &str = "Your session has expired. Please login again.";

/// What the page should do after the guard ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    Proceed,
    Redirect { to: Route, notice: Notice },
}

/// Check the stored expiry against `now`.
///
/// An expired session is cleared before the redirect is returned. A missing
/// session or missing expiry is left alone; requests then go out
/// unauthenticated and the backend's 401 is handled by the transport.
pub fn check_session(
    store: &dyn SessionStore,
    now: DateTime<Utc>,
) -> ceybazaar_core::Result<GuardOutcome> {
    let Some(session) = store.get()? else {
        return Ok(GuardOutcome::Proceed);
    };
    match session.status_at(now) {
        SessionStatus::Active => Ok(GuardOutcome::Proceed),
        SessionStatus::Expired => {
            warn!(user = %session.user_name, expired_at = %session.expiration_time, "Session expired");
            store.clear()?;
            Ok(GuardOutcome::Redirect {
                to: Route::Login,
                notice: Notice::new(NoticeLevel::Warning, SESSION_EXPIRED),
            })
        }
    }
}

//! Auth commands: login, logout, status.
//!
//! User-facing output uses writeln! to stdout (this is a CLI binary, not debug output).

use std::io::Write;

use chrono::{DateTime, Utc};

use crate::context::PageContext;
use crate::fmt::write_session_status;
use crate::guard::{GuardOutcome, check_session};
use crate::pages::{LoginForm, LoginPage, Navigation};
use crate::prompt::{prompt_email, prompt_password};

/// Log in, prompting for whatever was not given.
pub async fn login(
    ctx: &PageContext,
    email: Option<String>,
    password: Option<String>,
) -> anyhow::Result<Navigation> {
    let form = LoginForm {
        user_email: prompt_email(email)?,
        password: prompt_password(password)?,
    };
    let mut page = LoginPage::new(ctx);
    Ok(page.submit(ctx, &form).await)
}

pub fn logout(ctx: &PageContext) -> Navigation {
    crate::pages::login::logout(ctx)
}

/// Print the signed-in user. An expired session is cleared first and reads
/// as "Not logged in".
pub fn status(ctx: &PageContext, out: &mut impl Write) -> anyhow::Result<()> {
    status_at(ctx, Utc::now(), out)
}

fn status_at(ctx: &PageContext, now: DateTime<Utc>, out: &mut impl Write) -> anyhow::Result<()> {
    if let GuardOutcome::Redirect { notice, .. } = check_session(ctx.session.as_ref(), now)? {
        ctx.notices.push(notice);
    }
    match ctx.session.active_at(now)? {
        Some(session) => write_session_status(out, &session, now)?,
        None => writeln!(out, "Not logged in")?,
    }
    Ok(())
}

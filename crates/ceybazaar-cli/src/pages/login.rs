//! Login page (`/`).

use chrono::Utc;
use tracing::{info, warn};

use ceybazaar_client::ApiError;
use ceybazaar_core::model::LoginRequest;

use super::Navigation;
use crate::context::PageContext;
use crate::routes::Route;
use crate::scope::PageScope;

/// Credentials entered on the login form.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub user_email: String,
    pub password: String,
}

impl LoginForm {
    fn validate(&self) -> Result<(), &'static str> {
        if self.user_email.trim().is_empty() {
            return Err("Please enter your username!");
        }
        if self.password.is_empty() {
            return Err("Please enter your password!");
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct LoginPage {
    scope: PageScope,
}

impl LoginPage {
    pub fn new(ctx: &PageContext) -> Self {
        Self { scope: ctx.scope() }
    }

    /// Authenticate. Only `ADMIN` users get a session; on success the
    /// console navigates to the dashboard.
    pub async fn submit(&mut self, ctx: &PageContext, form: &LoginForm) -> Navigation {
        if let Err(msg) = form.validate() {
            ctx.notices.error(msg);
            return Navigation::Stay;
        }

        let request = LoginRequest {
            user_email: form.user_email.trim().to_string(),
            password: form.password.clone(),
        };
        // A 401 here means bad credentials, not an expired session.
        let envelope = match self.scope.run(ctx.backend.auth.login(&request)).await {
            Ok(Ok(envelope)) => envelope,
            Ok(Err(ApiError::Unauthenticated)) => {
                ctx.notices.error("Login Failed : invalid username or password");
                return Navigation::Stay;
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Login request failed");
                ctx.notices.error(format!("Login Failed : {e}"));
                return Navigation::Stay;
            }
            Err(_) => return Navigation::Stay,
        };

        let description = envelope.description().to_string();
        match envelope.into_success() {
            Some(result) if result.is_admin() => {
                if let Err(e) = ctx.session.set(&result.token, &result.user_name, Utc::now()) {
                    warn!(error = %e, "Failed to persist session");
                    ctx.notices.error(format!("Login Failed : {e}"));
                    return Navigation::Stay;
                }
                info!(user = %result.user_name, "Logged in");
                ctx.notices.success("Login successful!");
                Navigation::Redirect(Route::Home)
            }
            Some(result) => {
                warn!(user = %result.user_name, user_type = %result.user_type, "Non-admin login refused");
                ctx.notices
                    .error("Login Failed : administrator access required");
                Navigation::Stay
            }
            None => {
                ctx.notices.error(format!("Login Failed : {description}"));
                Navigation::Stay
            }
        }
    }
}

/// Clear the session and return to the login route.
pub fn logout(ctx: &PageContext) -> Navigation {
    match ctx.session.clear() {
        Ok(()) => {
            info!("Logged out");
            ctx.notices.success("Logged out successfully");
        }
        Err(e) => ctx.notices.error(format!("Failed to clear session: {e}")),
    }
    Navigation::Redirect(Route::Login)
}

//! Dependencies shared by every page.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use ceybazaar_client::{ApiClient, ApiError, Backend, ClientConfig};
use ceybazaar_core::config::{Config, DashboardConfig};
use ceybazaar_core::{Session, SessionStore};

use crate::notice::Notices;
use crate::scope::PageScope;

/// Injected page dependencies: facades, session store, notice queue and
/// the root cancellation token. Cheap to clone.
#[derive(Debug, Clone)]
pub struct PageContext {
    pub backend: Backend,
    pub session: Arc<dyn SessionStore>,
    pub notices: Notices,
    pub asset_base_url: String,
    pub dashboard: DashboardConfig,
    root: CancellationToken,
}

impl PageContext {
    /// Wire the transport and facades for `config` around `session`.
    pub fn new(config: &Config, session: Arc<dyn SessionStore>) -> Result<Self, ApiError> {
        let api = ApiClient::new(&ClientConfig::from(&config.backend), Arc::clone(&session))?;
        Ok(Self {
            backend: Backend::new(&api),
            session,
            notices: Notices::default(),
            asset_base_url: config.backend.asset_base_url.clone(),
            dashboard: config.dashboard.clone(),
            root: CancellationToken::new(),
        })
    }

    /// A fresh scope for one page activation.
    pub fn scope(&self) -> PageScope {
        PageScope::new(&self.root)
    }

    /// Cancel every in-flight page request.
    pub fn shutdown(&self) {
        self.root.cancel();
    }

    pub fn root_token(&self) -> CancellationToken {
        self.root.clone()
    }

    /// The stored session, ignoring read failures.
    pub fn current_session(&self) -> Option<Session> {
        self.session.get().ok().flatten()
    }

    /// User name stamped on submissions as `addedBy`.
    pub fn user_name(&self) -> Option<String> {
        self.current_session().map(|s| s.user_name)
    }
}

//! Cancellation scope tied to a page's active lifetime.

use std::future::Future;

use tokio_util::sync::CancellationToken;

/// The page was deactivated while its request was in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("page deactivated before the request finished")]
pub struct Cancelled;

/// Runs a page's requests under a child of the console's root token.
///
/// Dropping the scope (deactivating the page) cancels whatever is still in
/// flight; cancelling the root (Ctrl-C) cancels every page.
#[derive(Debug)]
pub struct PageScope {
    token: CancellationToken,
}

impl PageScope {
    pub fn new(parent: &CancellationToken) -> Self {
        Self {
            token: parent.child_token(),
        }
    }

    pub fn is_active(&self) -> bool {
        !self.token.is_cancelled()
    }

    /// Deactivate the page.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Drive `fut` unless the scope is cancelled first.
    pub async fn run<F: Future>(&self, fut: F) -> Result<F::Output, Cancelled> {
        tokio::select! {
            biased;
            () = self.token.cancelled() => Err(Cancelled),
            out = fut => Ok(out),
        }
    }
}

impl Drop for PageScope {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

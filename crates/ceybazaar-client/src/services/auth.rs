use ceybazaar_core::Envelope;
use ceybazaar_core::model::{LoginRequest, LoginResult};

use crate::error::ApiError;
use crate::transport::ApiClient;

/// `User/*` endpoints.
#[derive(Debug, Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Exchange credentials for a token. Refused credentials never clear a
    /// session that is already stored.
    pub async fn login(&self, request: &LoginRequest) -> Result<Envelope<LoginResult>, ApiError> {
        self.api.post_credentials("User/Login", request).await
    }
}

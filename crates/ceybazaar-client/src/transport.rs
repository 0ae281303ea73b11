//! Shared HTTP transport.
//!
//! One `reqwest` client bound to the backend base address. Every request
//! reads the credential from the injected session store and, when present,
//! sends it as a bearer token. Responses pass through one inspection point:
//! HTTP 401 clears the session and becomes [`ApiError::Unauthenticated`],
//! except on the login call, where it only means the credentials were wrong.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use ceybazaar_core::config::BackendConfig;
use ceybazaar_core::{Envelope, SessionStore};

use crate::error::ApiError;

/// Transport configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base address (e.g., "<http://localhost:8080/CeyBazaar>").
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl From<&BackendConfig> for ClientConfig {
    fn from(cfg: &BackendConfig) -> Self {
        Self {
            base_url: cfg.base_url.clone(),
            connect_timeout: cfg.connect_timeout(),
            request_timeout: cfg.request_timeout(),
        }
    }
}

/// What a 401 answer does to the stored session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OnUnauthorized {
    ClearSession,
    KeepSession,
}

/// Client for the backend REST API. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<dyn SessionStore>,
}

impl ApiClient {
    /// Create a new client bound to `config.base_url`.
    pub fn new(config: &ClientConfig, session: Arc<dyn SessionStore>) -> Result<Self, ApiError> {
        if config.base_url.trim().is_empty() {
            return Err(ApiError::Config("base_url is empty".into()));
        }
        if !config.base_url.starts_with("http://") && !config.base_url.starts_with("https://") {
            return Err(ApiError::Config(format!(
                "base_url must start with http:// or https://, got {}",
                config.base_url
            )));
        }

        // Ensure a TLS crypto provider is installed (reqwest uses rustls-no-provider).
        // The `Err` case just means it was already installed.
        let _ = rustls::crypto::ring::default_provider().install_default();

        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()?;

        let base_url = config.base_url.trim_end_matches('/').to_string();
        Ok(Self {
            http,
            base_url,
            session,
        })
    }

    /// The injected session store.
    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the absolute URL for an endpoint path. Leading slashes are optional.
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Start a request, attaching the bearer credential when one is stored.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match self.session.token() {
            Some(token) => builder.header(AUTHORIZATION, format!("Bearer {token}")),
            None => builder,
        }
    }

    /// Send and inspect the response, decoding the envelope.
    async fn send<T: DeserializeOwned>(
        &self,
        method: &Method,
        path: &str,
        req: RequestBuilder,
    ) -> Result<Envelope<T>, ApiError> {
        self.send_with(method, path, req, OnUnauthorized::ClearSession)
            .await
    }

    async fn send_with<T: DeserializeOwned>(
        &self,
        method: &Method,
        path: &str,
        req: RequestBuilder,
        on_unauthorized: OnUnauthorized,
    ) -> Result<Envelope<T>, ApiError> {
        debug!(%method, path, "Backend request");
        let resp = req.send().await?;
        let status = resp.status();

        if status == StatusCode::UNAUTHORIZED {
            return match on_unauthorized {
                OnUnauthorized::ClearSession => {
                    warn!(path, "Backend rejected the session; clearing it");
                    self.session.clear()?;
                    Err(ApiError::Unauthenticated)
                }
                // Credentials were refused; whatever session is stored stays valid.
                OnUnauthorized::KeepSession => {
                    let body = resp.bytes().await?;
                    match serde_json::from_slice::<Envelope<T>>(&body) {
                        Ok(envelope) if !envelope.is_success() => Ok(envelope),
                        _ => Err(ApiError::Unauthenticated),
                    }
                }
            };
        }

        let body = resp.bytes().await?;
        match serde_json::from_slice::<Envelope<T>>(&body) {
            Ok(envelope) => {
                debug!(
                    path,
                    status = status.as_u16(),
                    code = %envelope.response_code,
                    "Backend response"
                );
                Ok(envelope)
            }
            Err(_) if !status.is_success() => Err(ApiError::Api {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("Unknown").into(),
            }),
            Err(source) => Err(ApiError::Decode {
                path: path.to_string(),
                source,
            }),
        }
    }

    /// `GET path?query`.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Envelope<T>, ApiError> {
        let mut req = self.request(Method::GET, path);
        if !query.is_empty() {
            req = req.query(query);
        }
        self.send(&Method::GET, path, req).await
    }

    /// `POST path` with a JSON body.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<Envelope<T>, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let req = self.request(Method::POST, path).json(body);
        self.send(&Method::POST, path, req).await
    }

    /// `POST path` with a JSON body carrying credentials.
    ///
    /// A 401 answer leaves the stored session alone and, when the body is an
    /// envelope, returns it so its description reaches the caller.
    pub async fn post_credentials<B, T>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Envelope<T>, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let req = self.request(Method::POST, path).json(body);
        self.send_with(&Method::POST, path, req, OnUnauthorized::KeepSession)
            .await
    }

    /// `POST path` with a multipart form body.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<Envelope<T>, ApiError> {
        let req = self.request(Method::POST, path).multipart(form);
        self.send(&Method::POST, path, req).await
    }
}

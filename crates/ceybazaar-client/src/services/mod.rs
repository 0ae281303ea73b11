//! Backend service facades.
//!
//! Each function maps 1:1 to a backend endpoint and returns the envelope
//! unmodified: no retries, no caching, no interpretation of the response code.

mod admin;
mod auth;
mod products;
mod regions;

pub use admin::AdminService;
pub use auth::AuthService;
pub use products::{ImageUpload, ProductService, ProductSubmission};
pub use regions::RegionService;

use crate::transport::ApiClient;

/// All facades over one shared transport.
#[derive(Debug, Clone)]
pub struct Backend {
    pub auth: AuthService,
    pub admin: AdminService,
    pub products: ProductService,
    pub regions: RegionService,
}

impl Backend {
    pub fn new(api: &ApiClient) -> Self {
        Self {
            auth: AuthService::new(api.clone()),
            admin: AdminService::new(api.clone()),
            products: ProductService::new(api.clone()),
            regions: RegionService::new(api.clone()),
        }
    }
}

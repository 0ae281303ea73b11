//! `CeyBazaar` Admin Client
//!
//! Typed access to the `CeyBazaar` backend REST API:
//! - [`ApiClient`]: shared transport with bearer injection and 401 handling
//! - [`services`]: one facade per backend resource, returning raw envelopes

pub mod error;
pub mod services;
pub mod transport;

pub use error::ApiError;
pub use services::{
    AdminService, AuthService, Backend, ImageUpload, ProductService, ProductSubmission,
    RegionService,
};
pub use transport::{ApiClient, ClientConfig};

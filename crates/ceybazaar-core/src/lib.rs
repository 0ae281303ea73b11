//! `CeyBazaar` Admin Core Library
//!
//! Shared functionality for the admin client components:
//! - Backend data model and the uniform response envelope
//! - Session store with time-bounded validity
//! - Report aggregation
//! - Configuration resolution and hierarchy
//! - Common error types

pub mod config;
pub mod envelope;
pub mod error;
pub mod model;
pub mod report;
pub mod session;
pub mod tracing_init;

pub use config::Config;
pub use envelope::{Envelope, SUCCESS_CODE};
pub use error::{Error, Result};
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionStatus, SessionStore};

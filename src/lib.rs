//! Formgate - Form Relay Backend
//!
//! This crate accepts website form submissions (career applications and
//! contact messages), validates and sanitizes them, and relays each accepted
//! submission as an email through a configured mail transport (direct SMTP or
//! a provider's REST mail API).

pub mod api;
pub mod client;
pub mod config;
pub mod dispatch;
pub mod domain;
pub mod error;
pub mod server;
pub mod transport;
pub mod validation;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};

//! # Saints
//!
//! Collects biographical records of saints through a web form and serves
//! them back as JSON.
//!
//! The [`form`] module is the client side: it keeps dynamic place-detail
//! fields in step with the checked place categories and shapes the raw input
//! into a [`NewRecord`]. The server side validates that record in
//! [`service`], persists it through a [`store`] backend and exposes it over
//! HTTP in [`server`].

pub mod config;
pub mod errors;
pub mod form;
pub mod record;
pub mod server;
pub mod service;
pub mod store;

pub use config::ServerConfig;
pub use errors::{ConfigError, RecordError, StoreError, ValidationError};
pub use form::{Notice, RecordForm};
pub use record::{NewRecord, PlaceCategory, Record};
pub use service::RecordService;

/// Crate version, reported by `/health`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

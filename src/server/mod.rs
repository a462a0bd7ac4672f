//! HTTP server for the saint record service.
//!
//! # Endpoints
//!
//! - `GET  /`            — The submission form
//! - `GET  /health`      — Liveness check
//! - `POST /api/records` — Store a record
//! - `GET  /api/records` — List records, newest first
//!
//! Any other path serves the form page.

pub mod page;
pub mod routes;

pub use routes::{app_router, ApiError, AppState};

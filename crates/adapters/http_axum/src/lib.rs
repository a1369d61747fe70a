//! # leavehub-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a **JSON API** for the application lifecycle
//!   (`/api/applications`, `/api/applications/{id}/decision`, `/api/employees`, …)
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map service errors into status codes with a `{"error": "..."}` body
//!
//! ## Dependency rule
//! Depends on `leavehub-app` (for port traits and services) and `leavehub-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;

//! # aquahub-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a **JSON API** for the three subsystems
//!   (`/cover/*`, `/water/*`, `/water/threshold`)
//! - Map HTTP requests into coordinator calls (driving adapter)
//! - Map coordinator results and errors into HTTP responses
//!
//! ## Dependency rule
//! Depends on `aquahub-app` (for the coordinator and port traits) and
//! `aquahub-domain` (for the types used in request/response mapping). Never
//! leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;

//! # aquahub-domain
//!
//! Pure domain model for the aquahub device gateway.
//!
//! ## Responsibilities
//! - Foundational types: error taxonomy, controller endpoints, timestamps
//! - Define the three **subsystems** and their shadow state:
//!   - [`Cover`](cover::Cover): open / closed
//!   - [`Reservoir`](reservoir::Reservoir): remaining volume out of a fixed capacity
//!   - [`Threshold`](threshold::Threshold): analog trigger level
//! - Define **commands** and the endpoint each one maps to
//! - Enforce every invariant through the
//!   [`Subsystem`](subsystem::Subsystem) validate / reserve / commit contract
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! The remote controller is expressed as a port trait in the `app` crate.

pub mod endpoint;
pub mod error;
pub mod subsystem;
pub mod time;

pub mod cover;
pub mod reservoir;
pub mod threshold;

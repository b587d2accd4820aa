//! # aquahub-app
//!
//! Application layer: the **state coordinator** and its **port definitions**.
//!
//! ## Responsibilities
//! - Define the driven port [`RemoteDevice`](ports::RemoteDevice) that the
//!   HTTP controller adapter implements
//! - Own the three shadow states behind independent locks
//! - Run every command through validate → reserve → remote call → commit,
//!   leaving the shadow state untouched when the controller does not confirm
//! - Merge local shadow state with the controller's status report
//!
//! ## Dependency rule
//! Depends on `aquahub-domain` only (plus `tokio::sync` for locks).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod coordinator;
pub mod ports;

//! # accounthub-service
//!
//! Application services for Accounthub. Services orchestrate repositories,
//! the auth crate, and the cache; route handlers stay thin and call into
//! this layer.

pub mod account;
pub mod context;
pub mod stats;

pub use context::RequestContext;

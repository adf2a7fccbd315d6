//! # accounthub-api
//!
//! HTTP API layer for Accounthub built on Axum.
//!
//! Every inbound page request passes through the authorization gateway
//! middleware before any handler runs; API routes authenticate through the
//! [`extractors::AuthUser`] extractor instead. Handlers stay thin and call
//! into `accounthub-service`.

pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::{AppState, GatewayState};

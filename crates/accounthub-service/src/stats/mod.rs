//! Admin statistics aggregation.

pub mod service;

pub use service::{StatsService, UserCounts};

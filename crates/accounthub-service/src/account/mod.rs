//! Account services: profile, registration, credentials, password reset.

pub mod reset;
pub mod service;

pub use reset::{ResetMailer, ResetService};
pub use service::AccountService;

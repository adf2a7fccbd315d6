//! # accounthub-auth
//!
//! Authorization and credential handling for Accounthub.
//!
//! ## Modules
//!
//! - `gateway` — per-request authorization decisions (allow / redirect / reject)
//! - `session` — the session fact consumed by the gateway
//! - `jwt` — session cookie encoding and validation
//! - `password` — Argon2id password hashing and policy enforcement
//! - `reset` — password-reset token issuance, validation, and consumption

pub mod gateway;
pub mod jwt;
pub mod password;
pub mod reset;
pub mod session;

pub use gateway::{Decision, Gateway, RouteClass, RoutePolicy};
pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::{PasswordHasher, PasswordValidator};
pub use reset::{ResetTokenManager, ResetTokenStore};
pub use session::SessionFact;

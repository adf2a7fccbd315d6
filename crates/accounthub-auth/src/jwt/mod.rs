//! Session cookie encoding and validation.
//!
//! This is the identity-provider adapter: it turns a signed session cookie
//! into a [`crate::session::SessionFact`]. The gateway itself never touches
//! credentials.

pub mod claims;
pub mod decoder;
pub mod encoder;

pub use claims::Claims;
pub use decoder::JwtDecoder;
pub use encoder::JwtEncoder;

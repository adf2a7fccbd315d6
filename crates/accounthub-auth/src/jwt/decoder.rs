//! Session token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use accounthub_core::config::auth::AuthConfig;
use accounthub_core::error::AppError;

use crate::session::SessionFact;

use super::claims::Claims;

/// Validates session tokens and resolves them into session facts.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // 5 seconds leeway for clock skew

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates a session token string.
    ///
    /// Checks signature validity and expiration.
    pub fn decode_session_token(&self, token: &str) -> Result<Claims, AppError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| AppError::unauthorized(format!("Invalid session token: {e}")))?;

        Ok(token_data.claims)
    }

    /// Resolves an optional session cookie into the request's session fact.
    ///
    /// A missing, malformed, or expired token yields the anonymous fact —
    /// the gateway treats all three identically.
    pub fn resolve_session(&self, token: Option<&str>) -> SessionFact {
        match token {
            Some(token) => self
                .decode_session_token(token)
                .map(|claims| claims.session_fact())
                .unwrap_or_else(|_| SessionFact::anonymous()),
            None => SessionFact::anonymous(),
        }
    }
}

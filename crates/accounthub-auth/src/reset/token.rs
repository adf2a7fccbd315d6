//! Opaque reset token generation.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;

/// Number of random bytes in a reset token.
const TOKEN_ENTROPY_BYTES: usize = 32;

/// Generates a cryptographically random, URL-safe reset token.
pub fn generate_reset_token() -> String {
    let mut bytes = [0u8; TOKEN_ENTROPY_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_unique() {
        let a = generate_reset_token();
        let b = generate_reset_token();
        assert_ne!(a, b);
    }

    #[test]
    fn test_token_is_url_safe() {
        let token = generate_reset_token();
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
        // 32 bytes of entropy, base64-encoded without padding.
        assert_eq!(token.len(), 43);
    }
}

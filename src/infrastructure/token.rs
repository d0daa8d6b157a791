//! Credential token generation
//!
//! Generates opaque, URL-safe random tokens with a type prefix so a token's
//! kind is recognizable in logs and support requests.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::RngCore;

/// Generator for prefixed random tokens
#[derive(Debug, Clone)]
pub struct TokenGenerator {
    /// Prefix for all generated tokens (e.g. "inv_", "mlk_", "ses_")
    prefix: String,
    /// Number of random bytes per token
    token_bytes: usize,
}

impl TokenGenerator {
    /// Create a new token generator
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            token_bytes: 24,
        }
    }

    /// Generator for invite tokens
    pub fn invite() -> Self {
        Self::new("inv_")
    }

    /// Generator for magic link tokens
    pub fn magic_link() -> Self {
        Self::new("mlk_")
    }

    /// Generator for session tokens
    pub fn session() -> Self {
        Self::new("ses_")
    }

    /// Set the number of random bytes
    pub fn with_token_bytes(mut self, bytes: usize) -> Self {
        self.token_bytes = bytes;
        self
    }

    /// Generate a fresh token
    pub fn generate(&self) -> String {
        let mut random_bytes = vec![0u8; self.token_bytes];
        rand::thread_rng().fill_bytes(&mut random_bytes);

        format!("{}{}", self.prefix, URL_SAFE_NO_PAD.encode(&random_bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_has_prefix() {
        assert!(TokenGenerator::invite().generate().starts_with("inv_"));
        assert!(TokenGenerator::magic_link().generate().starts_with("mlk_"));
        assert!(TokenGenerator::session().generate().starts_with("ses_"));
    }

    #[test]
    fn test_generate_unique() {
        let generator = TokenGenerator::invite();
        let a = generator.generate();
        let b = generator.generate();

        assert_ne!(a, b);
    }

    #[test]
    fn test_token_length() {
        // 24 bytes -> 32 base64 chars
        let token = TokenGenerator::session().generate();
        assert_eq!(token.len(), "ses_".len() + 32);

        let short = TokenGenerator::new("t_").with_token_bytes(6).generate();
        assert_eq!(short.len(), "t_".len() + 8);
    }

    #[test]
    fn test_token_is_url_safe() {
        let token = TokenGenerator::invite().generate();
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-'));
    }
}

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use secrecy::ExposeSecret;

use crate::claims::Claims;
use crate::config::AuthConfig;
use crate::errors::AuthError;

/// Validates a raw bearer token and extracts its claims.
///
/// Object-safe so the middleware can hold `Arc<dyn TokenValidator>` and tests
/// can substitute their own implementation.
#[async_trait]
pub trait TokenValidator: Send + Sync {
    async fn validate_and_parse(&self, token: &str) -> Result<Claims, AuthError>;
}

/// HS256 validator over a base64-encoded shared secret.
pub struct JwtTokenValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtTokenValidator {
    /// Builds a validator from configuration.
    ///
    /// The configured secret must be valid base64; a bad secret is a startup
    /// error, never a per-request one.
    pub fn new(config: &AuthConfig) -> Result<Self, AuthError> {
        let decoding_key =
            DecodingKey::from_base64_secret(config.access_token_secret.expose_secret())
                .map_err(|e| AuthError::Internal(format!("invalid access token secret: {e}")))?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp"]);

        Ok(Self {
            decoding_key,
            validation,
        })
    }
}

#[async_trait]
impl TokenValidator for JwtTokenValidator {
    async fn validate_and_parse(&self, token: &str) -> Result<Claims, AuthError> {
        // Signature, expiry and claim-shape failures all collapse into one
        // terminal InvalidCredential; the distinction only matters in logs.
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| {
                tracing::debug!("token rejected: {err}");
                AuthError::InvalidCredential
            })
    }
}

use secrecy::SecretString;
use serde::Deserialize;

fn default_require_auth_by_default() -> bool {
    true
}

/// Authentication configuration.
///
/// Passed into [`JwtTokenValidator::new`](crate::JwtTokenValidator::new) at
/// construction rather than read from ambient process state, so tests can
/// inject their own secrets.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// Base64-encoded HMAC secret shared with the token issuer.
    pub access_token_secret: SecretString,

    /// If true, routes without an explicit security declaration still require
    /// authentication.
    #[serde(default = "default_require_auth_by_default")]
    pub require_auth_by_default: bool,
}

impl AuthConfig {
    #[must_use]
    pub fn new(access_token_secret: impl Into<String>) -> Self {
        Self {
            access_token_secret: SecretString::from(access_token_secret.into()),
            require_auth_by_default: default_require_auth_by_default(),
        }
    }
}

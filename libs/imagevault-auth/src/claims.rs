use serde::{Deserialize, Deserializer, Serialize};

use imagevault_security::{Capability, SecurityContext};

/// Verified JWT claims.
///
/// The legacy token issuer emits `email` and `permissionLevel`; both are
/// accepted as aliases for the standard field names so tokens from either
/// issuer generation verify identically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject identity, e.g. an email address.
    #[serde(rename = "sub", alias = "email")]
    pub subject: String,

    /// Capability bitmask granted to the subject.
    ///
    /// Absent or non-numeric values are read as `0` (no capabilities), not
    /// as an error; downstream capability checks then deny naturally.
    #[serde(
        alias = "permissionLevel",
        default,
        deserialize_with = "lenient_permission_level"
    )]
    pub permission_level: u32,

    /// Expiry, seconds since the epoch. Required and enforced by validation.
    pub exp: u64,

    /// Issued-at, seconds since the epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<u64>,
}

impl Claims {
    /// Builds the per-request [`SecurityContext`] from these verified claims.
    ///
    /// Unknown bits in the permission level grant nothing.
    #[must_use]
    pub fn to_security_context(&self) -> SecurityContext {
        SecurityContext::builder()
            .subject_id(self.subject.as_str())
            .permissions(Capability::from_level(self.permission_level))
            .build()
    }
}

fn lenient_permission_level<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value
        .as_u64()
        .and_then(|level| u32::try_from(level).ok())
        .unwrap_or(0))
}

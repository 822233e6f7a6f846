use crate::capability::Capability;

/// `SecurityContext` encapsulates the security-related information for one
/// request.
///
/// Built by the authentication middleware from verified token claims and
/// passed through the request lifecycle; never constructed from an unverified
/// credential. Dropped when the request completes.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SecurityContext {
    /// Subject identity — the authenticated user making the request.
    subject_id: String,
    /// Capabilities granted to the subject by its credential.
    permissions: Capability,
}

impl SecurityContext {
    /// Create a new `SecurityContext` builder.
    #[must_use]
    pub fn builder() -> SecurityContextBuilder {
        SecurityContextBuilder::default()
    }

    /// An anonymous context with no identity and no capabilities.
    #[must_use]
    pub fn anonymous() -> Self {
        SecurityContextBuilder::default().build()
    }

    /// The subject identity associated with this context.
    #[must_use]
    pub fn subject_id(&self) -> &str {
        &self.subject_id
    }

    /// The capability set granted to the subject.
    #[must_use]
    pub fn permissions(&self) -> Capability {
        self.permissions
    }
}

#[derive(Default)]
pub struct SecurityContextBuilder {
    subject_id: Option<String>,
    permissions: Capability,
}

impl SecurityContextBuilder {
    #[must_use]
    pub fn subject_id(mut self, subject_id: impl Into<String>) -> Self {
        self.subject_id = Some(subject_id.into());
        self
    }

    #[must_use]
    pub fn permissions(mut self, permissions: Capability) -> Self {
        self.permissions = permissions;
        self
    }

    #[must_use]
    pub fn build(self) -> SecurityContext {
        SecurityContext {
            subject_id: self.subject_id.unwrap_or_default(),
            permissions: self.permissions,
        }
    }
}

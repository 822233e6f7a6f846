use serde::Deserialize;

use imagevault_security::Capability;

fn default_max_description_length() -> usize {
    500
}

fn default_max_location_length() -> usize {
    200
}

/// Configuration for the images module.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ImagesConfig {
    pub max_description_length: usize,
    pub max_location_length: usize,

    /// Capability bit required for each operation class.
    ///
    /// The evaluator treats the exact bit assignment as configuration:
    /// deployments that gate everything on `READ` (as older router variants
    /// did) can say so here without code changes.
    pub capabilities: OperationCapabilities,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            max_description_length: default_max_description_length(),
            max_location_length: default_max_location_length(),
            capabilities: OperationCapabilities::default(),
        }
    }
}

/// Per-operation capability requirements.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct OperationCapabilities {
    pub list: Capability,
    pub create: Capability,
    pub get: Capability,
    pub replace: Capability,
    pub patch: Capability,
    pub delete: Capability,
}

impl Default for OperationCapabilities {
    fn default() -> Self {
        Self {
            list: Capability::READ,
            create: Capability::CREATE,
            get: Capability::READ,
            replace: Capability::UPDATE,
            patch: Capability::UPDATE,
            delete: Capability::DELETE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_differentiate_by_operation() {
        let cfg = ImagesConfig::default();
        assert_eq!(cfg.capabilities.list, Capability::READ);
        assert_eq!(cfg.capabilities.create, Capability::CREATE);
        assert_eq!(cfg.capabilities.replace, Capability::UPDATE);
        assert_eq!(cfg.capabilities.delete, Capability::DELETE);
    }

    #[test]
    fn capability_overrides_deserialize_from_names() {
        let cfg: ImagesConfig = serde_json::from_value(serde_json::json!({
            "capabilities": {
                "create": "READ",
                "delete": "READ",
            }
        }))
        .expect("deserialize");

        // Overridden operations use the configured bit, the rest keep defaults.
        assert_eq!(cfg.capabilities.create, Capability::READ);
        assert_eq!(cfg.capabilities.delete, Capability::READ);
        assert_eq!(cfg.capabilities.patch, Capability::UPDATE);
    }
}

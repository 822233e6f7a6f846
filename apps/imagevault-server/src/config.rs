use std::path::Path;

use figment::Figment;
use figment::providers::{Env, Format, Yaml};
use serde::Deserialize;

use imagevault_auth::AuthConfig;
use images::ImagesConfig;

fn default_bind_addr() -> String {
    "127.0.0.1:8080".to_owned()
}

fn default_database_url() -> String {
    "sqlite://imagevault.db?mode=rwc".to_owned()
}

/// Top-level server configuration.
///
/// Sources, later wins: YAML file, then `IMAGEVAULT_`-prefixed environment
/// variables (`IMAGEVAULT_AUTH__ACCESS_TOKEN_SECRET=...`).
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub images: ImagesConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ServerConfig {
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct DatabaseConfig {
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
        }
    }
}

impl AppConfig {
    pub fn load(path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::new();
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment
            .merge(Env::prefixed("IMAGEVAULT_").split("__"))
            .extract()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use std::io::Write;

    #[test]
    fn loads_from_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            concat!(
                "server:\n",
                "  bind_addr: \"0.0.0.0:9000\"\n",
                "auth:\n",
                "  access_token_secret: \"c2VjcmV0\"\n",
                "images:\n",
                "  capabilities:\n",
                "    delete: \"READ\"\n",
            )
        )
        .unwrap();

        let cfg = AppConfig::load(Some(file.path())).expect("load");

        assert_eq!(cfg.server.bind_addr, "0.0.0.0:9000");
        assert_eq!(cfg.database.url, default_database_url());
        assert!(cfg.auth.require_auth_by_default);
        assert_eq!(
            cfg.images.capabilities.delete,
            imagevault_security::Capability::READ
        );
    }

    #[test]
    fn missing_secret_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "server:\n  bind_addr: \"0.0.0.0:9000\"").unwrap();

        assert!(AppConfig::load(Some(file.path())).is_err());
    }
}

//! Backend configuration resolution
//!
//! Connection parameters resolve in priority order:
//! 1. Environment variables (highest priority)
//! 2. TOML config file
//! 3. Unconfigured — fallback-only mode
//!
//! Absence of configuration is a supported deployment mode (static content,
//! no persistence), never an error.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::{info, warn};

/// Environment variable supplying the backend base URL
pub const ENV_BACKEND_URL: &str = "CAMERATA_BACKEND_URL";
/// Environment variable supplying the backend public API key
pub const ENV_BACKEND_ANON_KEY: &str = "CAMERATA_BACKEND_ANON_KEY";
/// Environment variables supplying admin credentials for CLI tools
pub const ENV_ADMIN_EMAIL: &str = "CAMERATA_ADMIN_EMAIL";
pub const ENV_ADMIN_PASSWORD: &str = "CAMERATA_ADMIN_PASSWORD";

/// Connection parameters for the hosted backend service
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Service base URL, e.g. `https://project.example.co`
    pub base_url: String,
    /// Public (anonymous) API key sent with every request
    pub anon_key: String,
}

/// Admin credentials for tools that need an authenticated session
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    pub email: String,
    pub password: String,
}

/// Schema of the optional TOML config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub backend_url: Option<String>,
    pub backend_anon_key: Option<String>,
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

impl TomlConfig {
    /// Load the config file if one exists; a missing file yields defaults.
    pub fn load() -> Self {
        let Some(path) = config_file_path() else {
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str::<TomlConfig>(&content) {
                Ok(config) => {
                    info!("Loaded config file: {}", path.display());
                    config
                }
                Err(e) => {
                    warn!("Ignoring malformed config file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Parse TOML content directly (used by tests and custom config paths).
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }
}

/// Resolve backend connection parameters.
///
/// Returns `None` when neither environment nor config file supply both the
/// base URL and the API key — the caller runs in fallback-only mode.
pub fn resolve_backend_config(toml_config: &TomlConfig) -> Option<BackendConfig> {
    // Priority 1: environment variables
    let env_url = std::env::var(ENV_BACKEND_URL).ok().filter(|v| !v.is_empty());
    let env_key = std::env::var(ENV_BACKEND_ANON_KEY)
        .ok()
        .filter(|v| !v.is_empty());

    if let (Some(base_url), Some(anon_key)) = (env_url.clone(), env_key.clone()) {
        info!("Backend config loaded from environment");
        return Some(BackendConfig { base_url, anon_key });
    }

    // Priority 2: TOML config file, allowing env to override either half
    let base_url = env_url.or_else(|| toml_config.backend_url.clone());
    let anon_key = env_key.or_else(|| toml_config.backend_anon_key.clone());

    match (base_url, anon_key) {
        (Some(base_url), Some(anon_key)) if !base_url.is_empty() && !anon_key.is_empty() => {
            info!("Backend config loaded from config file");
            Some(BackendConfig { base_url, anon_key })
        }
        _ => {
            info!(
                "Backend not configured ({} / {} unset) - fallback-only mode",
                ENV_BACKEND_URL, ENV_BACKEND_ANON_KEY
            );
            None
        }
    }
}

/// Resolve admin credentials for CLI tools (env first, then config file).
pub fn resolve_admin_credentials(toml_config: &TomlConfig) -> Option<AdminCredentials> {
    let email = std::env::var(ENV_ADMIN_EMAIL)
        .ok()
        .filter(|v| !v.is_empty())
        .or_else(|| toml_config.admin_email.clone())?;
    let password = std::env::var(ENV_ADMIN_PASSWORD)
        .ok()
        .filter(|v| !v.is_empty())
        .or_else(|| toml_config.admin_password.clone())?;
    Some(AdminCredentials { email, password })
}

/// Platform config file location: `~/.config/camerata/config.toml` on Linux
/// (falling back to `/etc/camerata/config.toml`), the platform config dir
/// elsewhere.
fn config_file_path() -> Option<PathBuf> {
    if cfg!(target_os = "linux") {
        if let Some(user_config) = dirs::config_dir().map(|d| d.join("camerata").join("config.toml"))
        {
            if user_config.exists() {
                return Some(user_config);
            }
        }
        let system_config = PathBuf::from("/etc/camerata/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
        None
    } else {
        dirs::config_dir()
            .map(|d| d.join("camerata").join("config.toml"))
            .filter(|p| p.exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_config_parses_all_fields() {
        let config = TomlConfig::from_str(
            r#"
            backend_url = "https://demo.example.co"
            backend_anon_key = "anon-key"
            admin_email = "admin@example.com"
            admin_password = "secret"
            "#,
        )
        .unwrap();

        assert_eq!(config.backend_url.as_deref(), Some("https://demo.example.co"));
        assert_eq!(config.backend_anon_key.as_deref(), Some("anon-key"));
        assert_eq!(config.admin_email.as_deref(), Some("admin@example.com"));
        assert_eq!(config.admin_password.as_deref(), Some("secret"));
    }

    #[test]
    fn test_toml_config_tolerates_missing_fields() {
        let config = TomlConfig::from_str("").unwrap();
        assert!(config.backend_url.is_none());
        assert!(config.backend_anon_key.is_none());
    }

    #[test]
    fn test_toml_config_rejects_invalid_toml() {
        assert!(TomlConfig::from_str("backend_url = [").is_err());
    }
}

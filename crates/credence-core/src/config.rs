//! Local defaults consulted when guessing credentials.
//!
//! Loaded from a TOML file such as:
//!
//! ```toml
//! domain = "SAMBA"
//! realm = "samba.example.com"
//! workstation = "build-host"
//! skip_os_account_when_kerberos_required = true
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CredentialError, Result};

/// Local system configuration for the environment guesser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuessConfig {
    /// Default domain (workgroup).
    pub domain: Option<String>,

    /// Default Kerberos realm.
    pub realm: Option<String>,

    /// Workstation name. Falls back to the host name when unset.
    pub workstation: Option<String>,

    /// Do not fall back to the local OS account for the username while
    /// Kerberos is required.
    pub skip_os_account_when_kerberos_required: bool,
}

impl Default for GuessConfig {
    fn default() -> Self {
        Self {
            domain: None,
            realm: None,
            workstation: None,
            skip_os_account_when_kerberos_required: true,
        }
    }
}

impl GuessConfig {
    /// Load configuration from a TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CredentialError::ConfigNotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| CredentialError::ConfigRead(format!("{}: {}", path.display(), e)))?;

        toml::from_str(&content)
            .map_err(|e| CredentialError::ConfigParse(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a TOML file.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| CredentialError::ConfigParse(format!("Failed to serialize: {}", e)))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CredentialError::ConfigRead(format!("Failed to create directory: {}", e)))?;
        }

        std::fs::write(path, content)
            .map_err(|e| CredentialError::ConfigRead(format!("Failed to write file: {}", e)))?;

        Ok(())
    }

    /// Default global configuration file path (`~/.credence/config.toml`).
    pub fn default_global_path() -> PathBuf {
        // Allow env::var for HOME environment variable (path discovery)
        #[allow(clippy::disallowed_methods)]
        let home = std::env::var("HOME").map_or_else(|_| PathBuf::from("."), PathBuf::from);
        home.join(".credence").join("config.toml")
    }

    /// Loads `path` if given, else the global file if it exists, else defaults.
    ///
    /// An explicitly named file must exist; the global one is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }
        let global = Self::default_global_path();
        if global.exists() { Self::load_from_file(&global) } else { Ok(Self::default()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = GuessConfig::default();
        assert_eq!(config.domain, None);
        assert_eq!(config.realm, None);
        assert_eq!(config.workstation, None);
        assert!(config.skip_os_account_when_kerberos_required);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: GuessConfig = toml::from_str("realm = \"example.com\"").unwrap();
        assert_eq!(config.realm.as_deref(), Some("example.com"));
        assert_eq!(config.domain, None);
        assert!(config.skip_os_account_when_kerberos_required);
    }

    #[test]
    fn test_deserialize_full() {
        let toml_src = r#"
            domain = "SAMBA"
            realm = "samba.example.com"
            workstation = "build-host"
            skip_os_account_when_kerberos_required = false
        "#;
        let config: GuessConfig = toml::from_str(toml_src).unwrap();
        assert_eq!(config.domain.as_deref(), Some("SAMBA"));
        assert_eq!(config.workstation.as_deref(), Some("build-host"));
        assert!(!config.skip_os_account_when_kerberos_required);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");
        let config = GuessConfig { domain: Some("CORP".to_string()), ..GuessConfig::default() };

        config.save_to_file(&path).unwrap();
        let loaded = GuessConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = GuessConfig::load_from_file(&temp_dir.path().join("missing.toml"));
        assert!(matches!(result, Err(CredentialError::ConfigNotFound(_))));
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "realm = [not valid").unwrap();
        let result = GuessConfig::load_from_file(&path);
        assert!(matches!(result, Err(CredentialError::ConfigParse(_))));
    }

    #[test]
    fn test_load_explicit_path_must_exist() {
        let temp_dir = TempDir::new().unwrap();
        let result = GuessConfig::load(Some(&temp_dir.path().join("nope.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_default_global_path() {
        let path = GuessConfig::default_global_path();
        assert!(path.ends_with(".credence/config.toml"));
    }
}

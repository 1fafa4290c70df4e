//! Persisted CLI state: the per-user credential store and the per-directory
//! project link.
//!
//! The credential store lives at `$YGM_CONFIG_DIR/config.yml` when the variable
//! is set, otherwise under the platform config directory (`~/.config/ygm` on
//! Linux). It holds bearer tokens, so it is only ever readable by its owner.

pub mod project;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use project::ProjectLink;

pub const CONFIG_VERSION: u32 = 1;
pub const DEFAULT_API_URL: &str = "https://ygm.app";
const CONFIG_DIR_ENV: &str = "YGM_CONFIG_DIR";
const CONFIG_FILE: &str = "config.yml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine config directory")]
    NoConfigDir,

    #[error("could not determine working directory")]
    NoWorkingDir(#[source] std::io::Error),

    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to serialize config")]
    Serialize(#[source] serde_yaml::Error),

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One logged-in organization. Always replaced as a whole, never patched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    #[serde(rename = "token")]
    pub bearer_token: String,
    pub user_email: String,
    pub org_id: i64,
    pub org_name: String,
}

/// Contents of `config.yml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(rename = "version")]
    pub schema_version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_org: Option<String>,
    #[serde(rename = "api_url", default = "default_api_url")]
    pub api_base_url: String,
    #[serde(default)]
    pub accounts: BTreeMap<String, Account>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            schema_version: CONFIG_VERSION,
            default_org: None,
            api_base_url: default_api_url(),
            accounts: BTreeMap::new(),
        }
    }
}

/// Directory holding `config.yml`.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }

    dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
        .map(|dir| dir.join("ygm"))
        .ok_or(ConfigError::NoConfigDir)
}

pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join(CONFIG_FILE))
}

impl GlobalConfig {
    /// Load the store from its well-known location. `None` means nobody has
    /// logged in yet.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        Self::load_from(&config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config = serde_yaml::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Some(config))
    }

    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = config_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Write the store with owner-only permissions.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let data = serde_yaml::to_string(self).map_err(ConfigError::Serialize)?;

        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            create_private_dir(parent).map_err(write_err)?;
        }

        write_private_file(path, data.as_bytes()).map_err(write_err)?;

        tracing::debug!(path = %path.display(), "saved credential store");
        Ok(())
    }

    /// Insert or replace the account for `slug`. The first account ever added
    /// becomes the default.
    pub fn add_account(&mut self, slug: &str, account: Account) {
        self.accounts.insert(slug.to_string(), account);

        if self.default_org.as_deref().is_none_or(str::is_empty) {
            self.default_org = Some(slug.to_string());
        }
    }

    /// Remove the account for `slug`. When it was the default, the default
    /// moves to the first remaining slug in sorted order.
    pub fn remove_account(&mut self, slug: &str) -> Option<Account> {
        let removed = self.accounts.remove(slug)?;

        if self.default_org.as_deref() == Some(slug) {
            self.default_org = self.accounts.keys().next().cloned();
        }

        Some(removed)
    }
}

/// Write `data` to a file only the owner can read, even while it is being written.
#[cfg(unix)]
fn write_private_file(path: &Path, data: &[u8]) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // `mode` only applies to newly created files.
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    file.write_all(data)
}

#[cfg(not(unix))]
fn write_private_file(path: &Path, data: &[u8]) -> std::io::Result<()> {
    fs::write(path, data)
}

#[cfg(unix)]
fn create_private_dir(dir: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    fs::DirBuilder::new().recursive(true).mode(0o700).create(dir)
}

#[cfg(not(unix))]
fn create_private_dir(dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(name: &str) -> Account {
        Account {
            bearer_token: format!("tok_{name}"),
            user_email: format!("me@{name}.test"),
            org_id: 7,
            org_name: name.to_string(),
        }
    }

    #[test]
    fn first_account_becomes_default() {
        let mut config = GlobalConfig::default();
        config.add_account("acme", account("Acme"));
        config.add_account("globex", account("Globex"));

        assert_eq!(config.default_org.as_deref(), Some("acme"));
        assert_eq!(config.accounts.len(), 2);
    }

    #[test]
    fn relogin_replaces_account_wholesale() {
        let mut config = GlobalConfig::default();
        config.add_account("acme", account("Acme"));

        let fresh = Account {
            bearer_token: "tok_new".to_string(),
            user_email: "other@acme.test".to_string(),
            org_id: 8,
            org_name: "Acme Inc".to_string(),
        };
        config.add_account("acme", fresh.clone());

        assert_eq!(config.accounts["acme"], fresh);
        assert_eq!(config.accounts.len(), 1);
    }

    #[test]
    fn removing_default_promotes_next_slug() {
        let mut config = GlobalConfig::default();
        config.add_account("globex", account("Globex"));
        config.add_account("acme", account("Acme"));
        config.add_account("initech", account("Initech"));

        assert!(config.remove_account("globex").is_some());
        assert_eq!(config.default_org.as_deref(), Some("acme"));

        assert!(config.remove_account("missing").is_none());

        config.remove_account("acme");
        config.remove_account("initech");
        assert_eq!(config.default_org, None);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);

        let mut config = GlobalConfig {
            api_base_url: "http://localhost:3000".to_string(),
            ..GlobalConfig::default()
        };
        config.add_account("acme", account("Acme"));
        config.add_account("globex", account("Globex"));

        config.save_to(&path).unwrap();
        let loaded = GlobalConfig::load_from(&path).unwrap().unwrap();

        assert_eq!(loaded, config);
    }

    #[cfg(unix)]
    #[test]
    fn saved_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "version: 1\napi_url: x\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        GlobalConfig::default().save_to(&path).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn new_file_is_created_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fresh").join(CONFIG_FILE);

        let mut config = GlobalConfig::default();
        config.add_account("acme", account("Acme"));
        config.save_to(&path).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        let dir_mode = fs::metadata(path.parent().unwrap()).unwrap().permissions().mode();
        assert_eq!(dir_mode & 0o777, 0o700);

        // Rewriting a longer store with a shorter one leaves no stale tail.
        config.remove_account("acme");
        config.save_to(&path).unwrap();
        assert_eq!(GlobalConfig::load_from(&path).unwrap().unwrap(), config);
    }

    #[test]
    fn missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = GlobalConfig::load_from(&dir.path().join(CONFIG_FILE)).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn reads_existing_yaml_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(
            &path,
            "version: 1\n\
             default_org: acme\n\
             api_url: https://ygm.app\n\
             accounts:\n  \
               acme:\n    \
                 token: secret\n    \
                 user_email: me@acme.test\n    \
                 org_id: 3\n    \
                 org_name: Acme\n",
        )
        .unwrap();

        let config = GlobalConfig::load_from(&path).unwrap().unwrap();
        assert_eq!(config.default_org.as_deref(), Some("acme"));
        assert_eq!(config.accounts["acme"].bearer_token, "secret");
        assert_eq!(config.accounts["acme"].org_id, 3);
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "accounts: [unterminated").unwrap();

        let err = GlobalConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}

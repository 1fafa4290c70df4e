use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::ConfigError;

pub const LINK_FILE: &str = ".ygm.yml";

/// Binds a directory tree to one organization. Contains no secrets and is
/// safe to commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectLink {
    pub org: String,
}

impl ProjectLink {
    /// Nearest `.ygm.yml` at or above `start`, like git locates `.git`.
    ///
    /// Walks lexical parents only, so symlinked ancestors cannot loop.
    pub fn find(start: &Path) -> Option<PathBuf> {
        let mut dir = Some(start);

        while let Some(current) = dir {
            let candidate = current.join(LINK_FILE);
            if candidate.is_file() {
                return Some(candidate);
            }
            dir = current.parent();
        }

        None
    }

    /// Load the nearest link, returning the file it came from.
    pub fn load(start: &Path) -> Result<Option<(PathBuf, Self)>, ConfigError> {
        let Some(path) = Self::find(start) else {
            return Ok(None);
        };

        let data = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;

        let link = serde_yaml::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;

        Ok(Some((path, link)))
    }

    /// Write the link into `dir` itself, not into an ancestor.
    pub fn save(&self, dir: &Path) -> Result<PathBuf, ConfigError> {
        let path = dir.join(LINK_FILE);
        let data = serde_yaml::to_string(self).map_err(ConfigError::Serialize)?;

        fs::write(&path, data).map_err(|source| ConfigError::Write {
            path: path.clone(),
            source,
        })?;

        Ok(path)
    }

    /// Delete the nearest link. Returns the removed path, if there was one.
    pub fn remove(start: &Path) -> Result<Option<PathBuf>, ConfigError> {
        let Some(path) = Self::find(start) else {
            return Ok(None);
        };

        fs::remove_file(&path).map_err(|source| ConfigError::Write {
            path: path.clone(),
            source,
        })?;

        Ok(Some(path))
    }
}

/// Absolute current directory, the starting point for link discovery.
pub fn current_dir() -> Result<PathBuf, ConfigError> {
    std::env::current_dir().map_err(ConfigError::NoWorkingDir)
}

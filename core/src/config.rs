// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::path::{Path, PathBuf};

use pinmap_rtdb::{AuthMethod, RtdbConfig};

use crate::auth::Credentials;
use crate::map::MapConfig;

/// The name of the application.
pub const APP_NAME: &str = "pinmap";

/// File name of the SQLite database inside the state directory.
const DB_FILE_NAME: &str = "pinmap.db";

/// Configuration for the pinmap application.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct Config {
    /// Directory for storing application state.
    #[serde(default)]
    pub state_dir: Option<PathBuf>,

    /// Where points are kept.
    #[serde(default)]
    pub store: StoreConfig,

    /// Map defaults.
    #[serde(default)]
    pub map: MapConfig,

    /// Accepted login.
    #[serde(default)]
    pub auth: Credentials,
}

impl Config {
    /// Normalize the configuration.
    pub fn normalize(&mut self) -> Result<(), Box<dyn Error>> {
        // Normalize state directory
        match &self.state_dir {
            Some(a) => {
                self.state_dir = Some(
                    expand_path(a)
                        .map_err(|e| format!("Failed to expand state directory path: {e}"))?,
                );
            }

            None => match get_state_dir() {
                Ok(a) => self.state_dir = Some(a.join(APP_NAME)),
                Err(e) => tracing::warn!(err = %e, "failed to get state directory"),
            },
        }

        if let StoreConfig::Sqlite { path: Some(path) } = &mut self.store {
            *path = expand_path(path)
                .map_err(|e| format!("Failed to expand database path: {e}"))?;
        }

        Ok(())
    }

    /// The SQLite database file, `None` for an in-memory database.
    pub fn database_path(&self) -> Option<PathBuf> {
        match &self.store {
            StoreConfig::Sqlite { path: Some(path) } => Some(path.clone()),
            StoreConfig::Sqlite { path: None } => {
                self.state_dir.as_ref().map(|dir| dir.join(DB_FILE_NAME))
            }
            StoreConfig::Memory | StoreConfig::Remote(_) => None,
        }
    }
}

/// Backend keeping the points.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StoreConfig {
    /// A local SQLite database.
    Sqlite {
        /// Database file, defaults to a file in the state directory.
        #[serde(default)]
        path: Option<PathBuf>,
    },

    /// An in-memory SQLite database, discarded on exit.
    Memory,

    /// A remote Realtime-Database style JSON tree.
    Remote(RemoteConfig),
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::Sqlite { path: None }
    }
}

/// Connection to a remote JSON tree.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct RemoteConfig {
    /// Base URL of the database.
    pub base_url: String,

    /// Node holding the points.
    #[serde(default = "default_collection")]
    pub collection: String,

    #[serde(default)]
    pub auth: AuthMethod,

    /// Request timeout in seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    #[serde(default)]
    pub user_agent: Option<String>,
}

impl RemoteConfig {
    pub fn rtdb(&self) -> RtdbConfig {
        let defaults = RtdbConfig::default();
        RtdbConfig {
            base_url: self.base_url.clone(),
            auth: self.auth.clone(),
            timeout_secs: self.timeout_secs.unwrap_or(defaults.timeout_secs),
            user_agent: self.user_agent.clone().unwrap_or(defaults.user_agent),
        }
    }
}

fn default_collection() -> String {
    "points".to_string()
}

/// Handle tilde (~) and environment variables in the path
fn expand_path(path: &Path) -> Result<PathBuf, Box<dyn Error>> {
    if path.is_absolute() {
        return Ok(path.to_owned());
    }

    let path = path.to_str().ok_or("Invalid path")?;

    // Handle tilde and home directory
    let home_prefixes: &[&str] = if cfg!(unix) {
        &["~/", "$HOME/", "${HOME}/"]
    } else {
        &[r"~\", "~/", r"%UserProfile%\", r"%UserProfile%/"]
    };
    for prefix in home_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_home_dir()?.join(stripped));
        }
    }

    // Handle config directories
    let config_prefixes: &[&str] = if cfg!(unix) {
        &["$XDG_CONFIG_HOME/", "${XDG_CONFIG_HOME}/"]
    } else {
        &[r"%LOCALAPPDATA%\", "%LOCALAPPDATA%/"]
    };
    for prefix in config_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_config_dir()?.join(stripped));
        }
    }

    Ok(path.into())
}

fn get_home_dir() -> Result<PathBuf, Box<dyn Error>> {
    dirs::home_dir().ok_or("User-specific home directory not found".into())
}

fn get_config_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(windows)]
    let config_dir = dirs::config_dir();
    config_dir.ok_or("User-specific home directory not found".into())
}

fn get_state_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let state_dir = xdg::BaseDirectories::new().get_state_home();
    #[cfg(windows)]
    let state_dir = dirs::data_dir();
    state_dir.ok_or("User-specific state directory not found".into())
}

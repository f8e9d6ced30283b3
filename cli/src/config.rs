// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, path::PathBuf, str::FromStr};

use tokio::fs;

use pinmap_core::{APP_NAME, Config as CoreConfig};

pub(crate) const PINMAP_CONFIG_ENV: &str = "PINMAP_CONFIG";
pub(crate) const PINMAP_DEV_ENV: &str = "PINMAP_DEV";

const PINMAP_DEV_VALID_TRUE: &[&str] = &["1", "true", "yes"];
const PINMAP_DEV_VALID_FALSE: &[&str] = &["0", "false", "no"];

#[tracing::instrument]
pub async fn parse_config(path: Option<PathBuf>) -> Result<(CoreConfig, Config), Box<dyn Error>> {
    let path = if let Some(path) = path {
        path
    } else if let Ok(env_path) = std::env::var(PINMAP_CONFIG_ENV) {
        PathBuf::from(env_path)
    } else {
        if let Some(true) = is_dev_mode() {
            return Err(format!(
                "Development environment detected ({PINMAP_DEV_ENV} is set): config must be explicitly specified via --config or {PINMAP_CONFIG_ENV} environment variable",
            ).into());
        }
        let config = get_config_dir()?.join(format!("{APP_NAME}/config.toml"));
        if !config.exists() {
            return Err(format!("No config found at: {}", config.display()).into());
        }
        config
    };

    tracing::debug!(path = %path.display(), "reading configuration");
    fs::read_to_string(&path)
        .await
        .map_err(|e| format!("Failed to read config file at {}: {}", path.display(), e))?
        .parse::<ConfigRaw>()
        .map(|a| (a.core, a.tui))
}

/// Settings of the terminal interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    /// Capture the mouse so that markers can be clicked and dragged.
    pub mouse: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self { mouse: true }
    }
}

#[derive(Debug, serde::Deserialize)]
struct ConfigRaw {
    #[serde(default)]
    core: CoreConfig,

    #[serde(default)]
    tui: Config,
}

impl FromStr for ConfigRaw {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

fn get_config_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(windows)]
    let config_dir = dirs::config_dir();
    config_dir.ok_or_else(|| "User-specific home directory not found".into())
}

fn is_dev_mode() -> Option<bool> {
    let val = std::env::var(PINMAP_DEV_ENV).ok()?;
    let lower = val.to_lowercase();
    if PINMAP_DEV_VALID_TRUE.contains(&lower.as_str()) {
        Some(true)
    } else if PINMAP_DEV_VALID_FALSE.contains(&lower.as_str()) {
        Some(false)
    } else {
        tracing::warn!(
            value = %val,
            "unrecognized value for {PINMAP_DEV_ENV}, expected one of true: {}, false: {}; treating as unset",
            PINMAP_DEV_VALID_TRUE.join(", "),
            PINMAP_DEV_VALID_FALSE.join(", "),
        );
        None
    }
}

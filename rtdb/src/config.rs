// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

/// Authentication method for the database.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(tag = "type")]
pub enum AuthMethod {
    /// No authentication, the rules of the database allow public access.
    #[serde(rename = "none")]
    #[default]
    None,

    /// Database secret or ID token sent as the `auth` query parameter.
    #[serde(rename = "token")]
    Token {
        /// Secret or ID token.
        token: String,
    },

    /// OAuth2 access token sent as a bearer token.
    #[serde(rename = "bearer")]
    Bearer {
        /// Access token.
        token: String,
    },
}

/// Database server configuration.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct RtdbConfig {
    /// Base URL of the database, e.g. `https://example-default-rtdb.firebaseio.com`.
    pub base_url: String,

    /// Authentication method.
    #[serde(default)]
    pub auth: AuthMethod,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// User agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

const fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("pinmap-rtdb/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for RtdbConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            auth: AuthMethod::default(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

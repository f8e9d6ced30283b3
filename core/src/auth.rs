// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use crate::error::AuthError;

/// The accepted username and password.
///
/// This is a plain comparison with configured values, not a security boundary.
#[derive(Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "password".to_string(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Checks credentials before any point can be seen or changed.
#[derive(Debug, Clone)]
pub struct LoginGate {
    credentials: Credentials,
}

impl LoginGate {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    pub fn login(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        if username == self.credentials.username && password == self.credentials.password {
            tracing::info!(username, "logged in");
            Ok(Session {
                username: username.to_string(),
            })
        } else {
            tracing::warn!(username, "login rejected");
            Err(AuthError::InvalidCredentials)
        }
    }
}

/// Proof of a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    username: String,
}

impl Session {
    pub fn username(&self) -> &str {
        &self.username
    }
}

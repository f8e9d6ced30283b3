// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

/// Database client errors.
#[non_exhaustive]
#[derive(Debug)]
pub enum RtdbError {
    /// HTTP layer error.
    Http(String),

    /// The server answered with a non-success status.
    Status {
        /// HTTP status code.
        code: u16,
        /// Response body, usually `{"error": "..."}`.
        body: String,
    },

    /// Authentication or rules rejected the request.
    PermissionDenied(String),

    /// JSON encoding or decoding error.
    Json(String),

    /// The response did not have the expected shape.
    InvalidResponse(String),

    /// Configuration error.
    Config(String),
}

impl fmt::Display for RtdbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) => write!(f, "HTTP error: {e}"),
            Self::Status { code, body } => write!(f, "Server returned {code}: {body}"),
            Self::PermissionDenied(e) => write!(f, "Permission denied: {e}"),
            Self::Json(e) => write!(f, "JSON error: {e}"),
            Self::InvalidResponse(e) => write!(f, "Invalid server response: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
        }
    }
}

impl std::error::Error for RtdbError {}

impl From<reqwest::Error> for RtdbError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e.to_string())
    }
}

impl From<serde_json::Error> for RtdbError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e.to_string())
    }
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use pinmap_rtdb::RtdbError;

use crate::coordinate::CoordinateError;
use crate::point::PointId;

/// Errors surfaced by the point flows.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The form input is not acceptable, nothing was sent to the store.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The store failed to carry out the operation.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// No point is stored under the id.
    #[error("Point not found: {0}")]
    NotFound(PointId),

    /// A stored point carries coordinates that do not parse.
    #[error("Malformed coordinates: {0}")]
    MalformedCoordinates(#[source] CoordinateError),

    /// The credential check failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The browse map has not been constructed yet.
    #[error("The map is not ready yet")]
    MapNotReady,

    /// The operation is not allowed in the current state of the flow.
    #[error("Cannot {operation} while {state}")]
    InvalidState {
        /// The attempted operation.
        operation: &'static str,
        /// The state the flow was in.
        state: &'static str,
    },
}

/// Rejected form input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The name is empty or only whitespace.
    #[error("Name is required")]
    EmptyName,

    /// No coordinates were picked.
    #[error("Coordinates are required")]
    EmptyCoordinates,

    /// The coordinates do not parse.
    #[error("Invalid coordinates: {0}")]
    Coordinates(#[from] CoordinateError),
}

/// A failure reported by a point store, with a human readable message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct StoreError {
    message: String,
}

impl StoreError {
    /// Creates a store error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The human readable message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        Self::new(format!("Database error: {e}"))
    }
}

impl From<RtdbError> for StoreError {
    fn from(e: RtdbError) -> Self {
        Self::new(e.to_string())
    }
}

/// Login failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Username or password do not match.
    #[error("Invalid Credentials")]
    InvalidCredentials,
}

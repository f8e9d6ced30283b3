// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use crate::coordinate::{Coordinate, CoordinateError};
use crate::error::ValidationError;

/// Opaque identifier assigned by the store when a point is created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct PointId(String);

impl PointId {
    /// Wraps an identifier handed out by a store.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for PointId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for PointId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// The stored shape of a point, exactly what the store keeps under an id.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PointRecord {
    /// Display name.
    pub name: String,

    /// Coordinates in `"lat, lng"` text form.
    pub coordinates: String,
}

impl PointRecord {
    /// Parses the coordinates.
    pub fn coordinate(&self) -> Result<Coordinate, CoordinateError> {
        self.coordinates.parse()
    }
}

/// Unvalidated name and coordinates, as typed into a form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PointDraft {
    /// Display name.
    pub name: String,

    /// Coordinates in `"lat, lng"` text form.
    pub coordinates: String,
}

impl PointDraft {
    /// Checks the draft and turns it into a record ready for the store.
    ///
    /// Surrounding whitespace is dropped; the coordinate text is kept as typed once it
    /// parses.
    pub fn validate(&self) -> Result<PointRecord, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }

        let coordinates = self.coordinates.trim();
        if coordinates.is_empty() {
            return Err(ValidationError::EmptyCoordinates);
        }
        coordinates.parse::<Coordinate>()?;

        Ok(PointRecord {
            name: name.to_string(),
            coordinates: coordinates.to_string(),
        })
    }
}

/// A stored point together with its id.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Point {
    /// Identifier assigned by the store.
    pub id: PointId,

    /// Display name.
    pub name: String,

    /// Coordinates in `"lat, lng"` text form.
    pub coordinates: String,
}

impl Point {
    /// Joins an id with the record stored under it.
    pub fn new(id: PointId, record: PointRecord) -> Self {
        Self {
            id,
            name: record.name,
            coordinates: record.coordinates,
        }
    }

    /// Parses the coordinates.
    pub fn coordinate(&self) -> Result<Coordinate, CoordinateError> {
        self.coordinates.parse()
    }

    /// The stored record, without the id.
    pub fn record(&self) -> PointRecord {
        PointRecord {
            name: self.name.clone(),
            coordinates: self.coordinates.clone(),
        }
    }
}

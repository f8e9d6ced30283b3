// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::num::ParseFloatError;
use std::str::FromStr;

use serde::de;

/// A latitude/longitude pair in degrees.
///
/// The text form is always `"<lat>, <lng>"`, which is also how points are stored.
/// Ranges are not checked, any pair of finite numbers is accepted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Latitude in degrees.
    pub lat: f64,

    /// Longitude in degrees.
    pub lng: f64,
}

impl Coordinate {
    /// Creates a coordinate from two finite numbers.
    pub fn new(lat: f64, lng: f64) -> Result<Self, CoordinateError> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(CoordinateError::NotFinite(format!("{lat}, {lng}")));
        }
        Ok(Self { lat, lng })
    }

    /// Rounds both components to `decimals` decimal places.
    pub fn rounded(self, decimals: i32) -> Self {
        let factor = 10f64.powi(decimals);
        Self {
            lat: (self.lat * factor).round() / factor,
            lng: (self.lng * factor).round() / factor,
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.lat, self.lng)
    }
}

impl FromStr for Coordinate {
    type Err = CoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(',');
        let (Some(lat), Some(lng), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(CoordinateError::Arity(s.to_string()));
        };

        let parse = |part: &str| {
            part.trim()
                .parse::<f64>()
                .map_err(|source| CoordinateError::Number {
                    input: s.to_string(),
                    source,
                })
        };

        let (lat, lng) = (parse(lat)?, parse(lng)?);
        if !lat.is_finite() || !lng.is_finite() {
            return Err(CoordinateError::NotFinite(s.to_string()));
        }
        Ok(Self { lat, lng })
    }
}

impl serde::Serialize for Coordinate {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Coordinate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct CoordinateVisitor;

        impl de::Visitor<'_> for CoordinateVisitor {
            type Value = Coordinate;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str(r#"a coordinate string like "-7.7956, 110.3695""#)
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                value.parse().map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_str(CoordinateVisitor)
    }
}

/// Why a coordinate string could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoordinateError {
    /// Not exactly two comma separated parts.
    #[error("expected \"lat, lng\", got {0:?}")]
    Arity(String),

    /// A part is not a number.
    #[error("invalid number in {input:?}: {source}")]
    Number {
        /// The whole input.
        input: String,
        /// The underlying parse error.
        source: ParseFloatError,
    },

    /// A part is NaN or infinite.
    #[error("coordinates must be finite, got {0:?}")]
    NotFinite(String),
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::ops::Deref;

use crate::error::RtdbError;

/// Characters the database refuses in keys.
const FORBIDDEN: &[char] = &['.', '$', '#', '[', ']', '/'];

/// Key of a child node.
///
/// Keys returned by [`crate::RtdbClient::push`] are generated by the server and
/// sort chronologically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key(String);

impl Key {
    /// Creates a new `Key` from a string.
    #[must_use]
    pub const fn new(key: String) -> Self {
        Self(key)
    }

    /// Returns the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for Key {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for Key {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for Key {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl From<&str> for Key {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

/// Slash separated path to a node, e.g. `points/-NxA1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodePath(Vec<String>);

impl NodePath {
    /// Parses a path, ignoring leading and trailing slashes.
    ///
    /// # Errors
    ///
    /// Returns an error if a segment is empty or contains a character the database
    /// does not accept in keys.
    pub fn parse(path: &str) -> Result<Self, RtdbError> {
        let trimmed = path.trim_matches('/');
        if trimmed.is_empty() {
            return Ok(Self(Vec::new()));
        }

        let mut segments = Vec::new();
        for segment in trimmed.split('/') {
            validate_segment(segment)?;
            segments.push(segment.to_string());
        }
        Ok(Self(segments))
    }

    /// Returns the path of the child with the given key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is not a valid segment.
    pub fn child(&self, key: &str) -> Result<Self, RtdbError> {
        validate_segment(key)?;
        let mut segments = self.0.clone();
        segments.push(key.to_string());
        Ok(Self(segments))
    }

    /// Whether this is the root of the tree.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Builds the REST URL of the node below `base_url`.
    #[must_use]
    pub fn url(&self, base_url: &str) -> String {
        format!("{}/{}.json", base_url.trim_end_matches('/'), self.0.join("/"))
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.0.join("/"))
    }
}

fn validate_segment(segment: &str) -> Result<(), RtdbError> {
    if segment.is_empty() {
        return Err(RtdbError::Config("empty path segment".to_string()));
    }
    if let Some(c) = segment.chars().find(|c| FORBIDDEN.contains(c) || c.is_control()) {
        return Err(RtdbError::Config(format!(
            "invalid character {c:?} in path segment {segment:?}"
        )));
    }
    Ok(())
}

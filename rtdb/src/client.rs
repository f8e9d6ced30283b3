// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! REST client for node operations.

use std::sync::Arc;

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::RtdbConfig;
use crate::error::RtdbError;
use crate::http::HttpClient;
use crate::types::{Key, NodePath};

/// Client for a Realtime-Database style JSON tree.
///
/// # Example
///
/// ```ignore
/// use pinmap_rtdb::{NodePath, RtdbClient, RtdbConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = RtdbConfig {
///     base_url: "https://example-default-rtdb.firebaseio.com".to_string(),
///     ..Default::default()
/// };
///
/// let client = RtdbClient::new(config)?;
/// let points = NodePath::parse("points")?;
/// let key = client.push(&points, &serde_json::json!({ "name": "Tugu" })).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RtdbClient {
    http: Arc<HttpClient>,
    config: RtdbConfig,
}

impl RtdbClient {
    /// Creates a new client.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is empty or HTTP client initialization fails.
    pub fn new(config: RtdbConfig) -> Result<Self, RtdbError> {
        if config.base_url.trim().is_empty() {
            return Err(RtdbError::Config("base_url must not be empty".to_string()));
        }

        let http = HttpClient::new(config.clone())?;
        Ok(Self {
            http: Arc::new(http),
            config,
        })
    }

    /// Appends `value` as a new child of `path` and returns the key chosen by the server.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response carries no key.
    pub async fn push<T: Serialize + ?Sized>(
        &self,
        path: &NodePath,
        value: &T,
    ) -> Result<Key, RtdbError> {
        #[derive(serde::Deserialize)]
        struct PushResponse {
            name: String,
        }

        tracing::debug!(%path, "pushing child node");
        let resp = self
            .http
            .execute(self.request(Method::POST, path).json(value))
            .await?;

        let body = resp.text().await?;
        let PushResponse { name } = serde_json::from_str(&body)
            .map_err(|e| RtdbError::InvalidResponse(format!("push response: {e}")))?;
        Ok(Key::new(name))
    }

    /// Reads the node at `path`, `None` if nothing is stored there.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the node cannot be decoded as `T`.
    pub async fn get<T: DeserializeOwned>(&self, path: &NodePath) -> Result<Option<T>, RtdbError> {
        tracing::debug!(%path, "reading node");
        match self.get_value(path).await? {
            Value::Null => Ok(None),
            value => Ok(Some(serde_json::from_value(value)?)),
        }
    }

    /// Reads all children of `path` in the order the server returned them.
    ///
    /// Children that cannot be decoded as `T` are logged and left out.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the node is not a collection.
    pub async fn children<T: DeserializeOwned>(
        &self,
        path: &NodePath,
    ) -> Result<Vec<(Key, T)>, RtdbError> {
        tracing::debug!(%path, "listing child nodes");
        let entries: Vec<(String, Value)> = match self.get_value(path).await? {
            Value::Null => Vec::new(),
            Value::Object(map) => map.into_iter().collect(),
            // integer-like keys come back as a sparse array
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .filter(|(_, v)| !v.is_null())
                .map(|(i, v)| (i.to_string(), v))
                .collect(),
            other => {
                return Err(RtdbError::InvalidResponse(format!(
                    "expected an object at {path}, got {other}"
                )));
            }
        };

        Ok(entries
            .into_iter()
            .filter_map(|(key, value)| match serde_json::from_value(value) {
                Ok(child) => Some((Key::new(key), child)),
                Err(e) => {
                    tracing::warn!(%path, %key, error = %e, "skipping undecodable child");
                    None
                }
            })
            .collect())
    }

    /// Replaces the node at `path` with `value`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn set<T: Serialize + ?Sized>(
        &self,
        path: &NodePath,
        value: &T,
    ) -> Result<(), RtdbError> {
        tracing::debug!(%path, "replacing node");
        self.http
            .execute(self.request(Method::PUT, path).json(value))
            .await?;
        Ok(())
    }

    /// Merges the fields of `value` into the node at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn update<T: Serialize + ?Sized>(
        &self,
        path: &NodePath,
        value: &T,
    ) -> Result<(), RtdbError> {
        tracing::debug!(%path, "patching node");
        self.http
            .execute(self.request(Method::PATCH, path).json(value))
            .await?;
        Ok(())
    }

    /// Removes the node at `path`. Removing a missing node succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn remove(&self, path: &NodePath) -> Result<(), RtdbError> {
        tracing::debug!(%path, "removing node");
        self.http
            .execute(self.request(Method::DELETE, path))
            .await?;
        Ok(())
    }

    /// Returns the configuration of this client.
    #[must_use]
    pub fn config(&self) -> &RtdbConfig {
        &self.config
    }

    async fn get_value(&self, path: &NodePath) -> Result<Value, RtdbError> {
        let resp = self.http.execute(self.request(Method::GET, path)).await?;
        let body = resp.text().await?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }

    fn request(&self, method: Method, path: &NodePath) -> reqwest::RequestBuilder {
        self.http
            .build_request(method, &path.url(&self.config.base_url))
    }
}

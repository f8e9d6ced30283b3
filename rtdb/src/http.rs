// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP client wrapper with authentication and status handling.

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};

use crate::config::{AuthMethod, RtdbConfig};
use crate::error::RtdbError;

/// HTTP client for database operations.
#[derive(Debug)]
pub struct HttpClient {
    client: Client,
    config: RtdbConfig,
}

impl HttpClient {
    /// Creates a new HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if HTTP client creation fails.
    pub fn new(config: RtdbConfig) -> Result<Self, RtdbError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self { client, config })
    }

    /// Builds a request with authentication applied.
    pub fn build_request(&self, method: Method, url: &str) -> RequestBuilder {
        let req = self.client.request(method, url);
        match &self.config.auth {
            AuthMethod::Token { token } => req.query(&[("auth", token)]),
            AuthMethod::Bearer { token } => req.bearer_auth(token),
            AuthMethod::None => req,
        }
    }

    /// Executes a request and checks for HTTP errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or returns an error status code.
    pub async fn execute(&self, req: RequestBuilder) -> Result<Response, RtdbError> {
        let resp = req.send().await?;

        match resp.status() {
            StatusCode::OK | StatusCode::NO_CONTENT => Ok(resp),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                let text = read_body(resp).await;
                Err(RtdbError::PermissionDenied(text))
            }
            status => {
                let code = status.as_u16();
                let body = read_body(resp).await;
                Err(RtdbError::Status { code, body })
            }
        }
    }
}

async fn read_body(resp: Response) -> String {
    resp.text()
        .await
        .unwrap_or_else(|_| "Unable to read response".to_string())
}

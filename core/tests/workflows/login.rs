// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! The login gate in front of the flows.

use std::sync::Arc;

use pinmap_core::{AuthError, Credentials, Error, LocalDb, PinMap};

use crate::common::{memory_pinmap, test_config};

#[tokio::test]
async fn login_with_default_credentials() {
    let pinmap = memory_pinmap().await;
    let session = pinmap.login("admin", "password").unwrap();
    assert_eq!(session.username(), "admin");
}

#[tokio::test]
async fn login_rejects_wrong_password() {
    let pinmap = memory_pinmap().await;
    let err = pinmap.login("admin", "admin").unwrap_err();
    assert!(matches!(err, Error::Auth(AuthError::InvalidCredentials)));
    assert_eq!(err.to_string(), "Invalid Credentials");
}

#[tokio::test]
async fn login_uses_configured_credentials() {
    // Arrange
    let mut config = test_config(None);
    config.auth = Credentials {
        username: "ranger".to_string(),
        password: "merapi".to_string(),
    };
    let db = LocalDb::open(None).await.unwrap();
    let pinmap = PinMap::with_store(config, Arc::new(db));

    // Act & Assert
    assert!(pinmap.login("admin", "password").is_err());
    let session = pinmap.login("ranger", "merapi").unwrap();
    assert!(pinmap.list_points(&session).await.unwrap().is_empty());
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Points kept in the SQLite database of the state directory.

use pinmap_core::{PinMap, StoreConfig};

use crate::common::{session, setup_temp_dirs, test_config};

#[tokio::test]
async fn persistence_points_survive_restart() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let config = test_config(Some(&temp_dirs.state_dir));
    let pinmap = PinMap::new(config.clone()).await.unwrap();
    let first = session(&pinmap);
    let mut flow = pinmap.create_flow(&first);
    flow.set_name("Borobudur");
    flow.surface_mut().set_coordinates("-7.6079, 110.2038");
    let id = flow.save().await.unwrap().point.id;
    pinmap.close().await.unwrap();

    // Act
    let pinmap = PinMap::new(config).await.unwrap();
    let session = session(&pinmap);
    let points = pinmap.list_points(&session).await.unwrap();

    // Assert
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].id, id);
    assert_eq!(points[0].name, "Borobudur");
    assert!(temp_dirs.state_dir.join("pinmap.db").exists());
}

#[tokio::test]
async fn persistence_creates_missing_state_dir() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let nested = temp_dirs.state_dir.join("nested").join("deeper");
    let config = test_config(Some(&nested));

    // Act
    let pinmap = PinMap::new(config).await.unwrap();

    // Assert
    assert!(nested.join("pinmap.db").exists());
    pinmap.close().await.unwrap();
}

#[tokio::test]
async fn persistence_explicit_database_path() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let path = temp_dirs.state_dir.join("custom.db");
    let mut config = test_config(Some(&temp_dirs.state_dir));
    config.store = StoreConfig::Sqlite {
        path: Some(path.clone()),
    };

    // Act
    let pinmap = PinMap::new(config).await.unwrap();
    pinmap.close().await.unwrap();

    // Assert
    assert!(path.exists());
    assert!(!temp_dirs.state_dir.join("pinmap.db").exists());
}

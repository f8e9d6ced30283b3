// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Creating points by picking a location on the map and naming it.

use std::sync::Arc;

use pinmap_core::{Coordinate, Error, PointStore, Route, ValidationError};

use crate::common::{FlakyStore, Op, memory_pinmap, pinmap_over, session};

#[tokio::test]
async fn create_point_saves_and_lists_borobudur() {
    // Arrange
    let pinmap = memory_pinmap().await;
    let session = session(&pinmap);
    let mut flow = pinmap.create_flow(&session);

    // Act
    flow.set_name("Borobudur");
    flow.surface_mut().set_coordinates("-7.6079, 110.2038");
    let saved = flow.save().await.unwrap();

    // Assert
    assert_eq!(saved.next, Route::Browse);
    let points = pinmap.list_points(&session).await.unwrap();
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].id, saved.point.id);
    assert_eq!(points[0].name, "Borobudur");
    assert_eq!(points[0].coordinates, "-7.6079, 110.2038");
}

#[tokio::test]
async fn create_point_from_map_click() {
    // Arrange
    let pinmap = memory_pinmap().await;
    let session = session(&pinmap);
    let mut flow = pinmap.create_flow(&session);
    flow.set_name("Tugu");

    // Act
    flow.surface_mut().on_map_click(Coordinate {
        lat: -7.7829,
        lng: 110.3671,
    });
    let saved = flow.save().await.unwrap();

    // Assert
    let stored = pinmap.get_point(&session, &saved.point.id).await.unwrap();
    assert_eq!(stored.coordinates, "-7.7829, 110.3671");
}

#[tokio::test]
async fn create_point_from_marker_drag() {
    // Arrange
    let pinmap = memory_pinmap().await;
    let session = session(&pinmap);
    let mut flow = pinmap.create_flow(&session);
    flow.set_name("North of center");

    // Act
    flow.surface_mut().drag_marker(0.01, 0.0);
    assert!(flow.can_save().is_err(), "dragging alone picks nothing");
    flow.surface_mut().release_marker();
    let saved = flow.save().await.unwrap();

    // Assert
    let coordinate = saved.point.coordinate().unwrap();
    assert!((coordinate.lat - -7.7856).abs() < 1e-9);
    assert!((coordinate.lng - 110.3695).abs() < 1e-9);
}

#[tokio::test]
async fn create_point_rejects_empty_name_without_store_call() {
    // Arrange
    let store = Arc::new(FlakyStore::new().await);
    let pinmap = pinmap_over(store.clone());
    let session = session(&pinmap);
    let mut flow = pinmap.create_flow(&session);
    flow.surface_mut().set_coordinates("-7.6079, 110.2038");

    // Act
    let err = flow.save().await.unwrap_err();

    // Assert
    assert!(matches!(
        err,
        Error::Validation(ValidationError::EmptyName)
    ));
    assert!(store.calls().is_empty());
    assert!(flow.alert().is_none());
    assert!(store.inner().list().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_point_rejects_missing_coordinates() {
    // Arrange
    let pinmap = memory_pinmap().await;
    let session = session(&pinmap);
    let mut flow = pinmap.create_flow(&session);
    flow.set_name("Nowhere");

    // Act
    let err = flow.save().await.unwrap_err();

    // Assert
    assert!(matches!(
        err,
        Error::Validation(ValidationError::EmptyCoordinates)
    ));
    assert!(pinmap.list_points(&session).await.unwrap().is_empty());
}

#[tokio::test]
async fn create_point_store_failure_raises_alert_and_keeps_form() {
    // Arrange
    let store = Arc::new(FlakyStore::new().await);
    store.fail(Op::Create);
    let pinmap = pinmap_over(store.clone());
    let session = session(&pinmap);
    let mut flow = pinmap.create_flow(&session);
    flow.set_name("Prambanan");
    flow.surface_mut().set_coordinates("-7.7520, 110.4915");

    // Act
    let err = flow.save().await.unwrap_err();

    // Assert
    assert!(matches!(err, Error::Store(_)));
    let alert = flow.alert().unwrap();
    assert_eq!(alert.header, "Save Failed");
    assert_eq!(alert.message, "Service unavailable");
    assert_eq!(flow.name(), "Prambanan");
    assert_eq!(flow.surface().coordinates(), "-7.7520, 110.4915");

    // Act - the user tries again once the store is back
    store.recover(Op::Create);
    flow.dismiss_alert();
    let saved = flow.save().await.unwrap();

    // Assert
    assert_eq!(saved.point.name, "Prambanan");
    assert_eq!(pinmap.list_points(&session).await.unwrap().len(), 1);
}

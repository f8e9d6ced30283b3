// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Editing a stored point.

use std::sync::Arc;

use pinmap_core::flow::EditState;
use pinmap_core::{Coordinate, Error, PointId, PointRecord, PointStore, Route, ValidationError};

use crate::common::{FlakyStore, GatedStore, Op, memory_pinmap, pinmap_over, session};

fn record(name: &str, coordinates: &str) -> PointRecord {
    PointRecord {
        name: name.to_string(),
        coordinates: coordinates.to_string(),
    }
}

#[tokio::test]
async fn edit_point_updates_prambanan_keeping_id() {
    // Arrange
    let pinmap = memory_pinmap().await;
    let session = session(&pinmap);
    let mut create = pinmap.create_flow(&session);
    create.set_name("Candi");
    create.surface_mut().set_coordinates("-7.7, 110.4");
    let id = create.save().await.unwrap().point.id;

    // Act
    let mut flow = pinmap.edit_flow(&session, id.clone());
    flow.load().await.unwrap();
    assert_eq!(flow.state(), EditState::Ready);
    assert_eq!(flow.name(), "Candi");
    flow.set_name("Prambanan");
    flow.surface_mut()
        .unwrap()
        .set_coordinates("-7.7520, 110.4915");
    let saved = flow.update().await.unwrap();

    // Assert
    assert_eq!(saved.next, Route::Browse);
    assert_eq!(saved.point.id, id);
    let stored = pinmap.get_point(&session, &id).await.unwrap();
    assert_eq!(stored.name, "Prambanan");
    assert_eq!(stored.coordinates, "-7.7520, 110.4915");
    assert_eq!(pinmap.list_points(&session).await.unwrap().len(), 1);
}

#[tokio::test]
async fn edit_point_load_centers_map_on_point() {
    // Arrange
    let pinmap = memory_pinmap().await;
    let session = session(&pinmap);
    let mut create = pinmap.create_flow(&session);
    create.set_name("Borobudur");
    create.surface_mut().set_coordinates("-7.6079, 110.2038");
    let id = create.save().await.unwrap().point.id;

    // Act
    let mut flow = pinmap.edit_flow(&session, id);
    flow.load().await.unwrap();

    // Assert
    let surface = flow.surface().unwrap();
    let expected = Coordinate {
        lat: -7.6079,
        lng: 110.2038,
    };
    assert_eq!(surface.view().center(), expected);
    assert_eq!(surface.marker_position(), expected);
    assert_eq!(surface.coordinates(), "-7.6079, 110.2038");
}

#[tokio::test]
async fn edit_point_missing_id_is_not_found() {
    // Arrange
    let pinmap = memory_pinmap().await;
    let session = session(&pinmap);
    let mut flow = pinmap.edit_flow(&session, PointId::new("missing"));

    // Act
    let err = flow.load().await.unwrap_err();

    // Assert
    assert!(matches!(err, Error::NotFound(id) if id.as_str() == "missing"));
    assert_eq!(flow.state(), EditState::NotFound);
    assert!(matches!(
        flow.update().await,
        Err(Error::InvalidState { .. })
    ));
}

#[tokio::test]
async fn edit_point_malformed_coordinates_fail_to_load() {
    // Arrange
    let store = Arc::new(FlakyStore::new().await);
    let id = store
        .inner()
        .create(&record("Broken", "somewhere"))
        .await
        .unwrap();
    let pinmap = pinmap_over(store.clone());
    let session = session(&pinmap);
    let mut flow = pinmap.edit_flow(&session, id);

    // Act
    let err = flow.load().await.unwrap_err();

    // Assert
    assert!(matches!(err, Error::MalformedCoordinates(_)));
    assert!(flow.surface().is_none());
    assert_eq!(flow.alert().unwrap().header, "Load Failed");
}

#[tokio::test]
async fn edit_point_load_failure_can_be_retried() {
    // Arrange
    let store = Arc::new(FlakyStore::new().await);
    let id = store
        .inner()
        .create(&record("Tugu", "-7.7829, 110.3671"))
        .await
        .unwrap();
    store.fail(Op::Read);
    let pinmap = pinmap_over(store.clone());
    let session = session(&pinmap);
    let mut flow = pinmap.edit_flow(&session, id);

    // Act
    assert!(matches!(flow.load().await, Err(Error::Store(_))));
    assert_eq!(flow.state(), EditState::Uninitialized);
    store.recover(Op::Read);
    flow.load().await.unwrap();

    // Assert
    assert_eq!(flow.state(), EditState::Ready);
    assert_eq!(flow.name(), "Tugu");
}

#[tokio::test]
async fn edit_point_update_failure_keeps_form_and_retry_succeeds() {
    // Arrange
    let store = Arc::new(FlakyStore::new().await);
    let id = store
        .inner()
        .create(&record("Malioboro", "-7.7925, 110.3658"))
        .await
        .unwrap();
    let pinmap = pinmap_over(store.clone());
    let session = session(&pinmap);
    let mut flow = pinmap.edit_flow(&session, id.clone());
    flow.load().await.unwrap();
    flow.set_name("Jalan Malioboro");
    store.fail(Op::Update);

    // Act
    let err = flow.update().await.unwrap_err();

    // Assert
    assert!(matches!(err, Error::Store(_)));
    assert_eq!(flow.state(), EditState::Error);
    let alert = flow.alert().unwrap();
    assert_eq!(alert.header, "Update Failed");
    assert_eq!(alert.message, "Service unavailable");
    assert_eq!(flow.name(), "Jalan Malioboro");
    assert_eq!(
        store.inner().read(&id).await.unwrap().unwrap().name,
        "Malioboro"
    );

    // Act - retry
    store.recover(Op::Update);
    let saved = flow.update().await.unwrap();

    // Assert
    assert_eq!(flow.state(), EditState::Ready);
    assert!(flow.alert().is_none());
    assert_eq!(saved.point.id, id);
    assert_eq!(
        store.inner().read(&id).await.unwrap().unwrap().name,
        "Jalan Malioboro"
    );
}

#[tokio::test]
async fn edit_point_dropped_update_can_be_retried() {
    // Arrange
    let store = Arc::new(GatedStore::new().await);
    let id = store
        .inner()
        .create(&record("Kotagede", "-7.8296, 110.4003"))
        .await
        .unwrap();
    let pinmap = pinmap_over(store.clone());
    let session = session(&pinmap);
    let mut flow = pinmap.edit_flow(&session, id.clone());
    flow.load().await.unwrap();
    flow.set_name("Pasar Kotagede");

    // Act - the update stalls in the store and is cancelled
    store.hold_next_update();
    tokio::select! {
        _ = flow.update() => panic!("held update should not finish"),
        () = store.wait_holding() => {}
    }
    assert_eq!(flow.state(), EditState::Saving);
    let saved = flow.update().await.unwrap();

    // Assert
    assert_eq!(flow.state(), EditState::Ready);
    assert_eq!(saved.point.id, id);
    assert_eq!(
        store.inner().read(&id).await.unwrap().unwrap().name,
        "Pasar Kotagede"
    );
}

#[tokio::test]
async fn edit_point_rejects_cleared_name_without_store_call() {
    // Arrange
    let store = Arc::new(FlakyStore::new().await);
    let id = store
        .inner()
        .create(&record("Kraton", "-7.8053, 110.3642"))
        .await
        .unwrap();
    let pinmap = pinmap_over(store.clone());
    let session = session(&pinmap);
    let mut flow = pinmap.edit_flow(&session, id);
    flow.load().await.unwrap();
    flow.set_name("  ");

    // Act
    let err = flow.update().await.unwrap_err();

    // Assert
    assert!(matches!(
        err,
        Error::Validation(ValidationError::EmptyName)
    ));
    assert_eq!(flow.state(), EditState::Ready);
    assert_eq!(store.calls(), [Op::Read]);
}

#[tokio::test]
async fn edit_point_cannot_update_before_load() {
    // Arrange
    let pinmap = memory_pinmap().await;
    let session = session(&pinmap);
    let mut flow = pinmap.edit_flow(&session, PointId::new("whatever"));

    // Act
    let err = flow.update().await.unwrap_err();

    // Assert
    assert!(matches!(
        err,
        Error::InvalidState {
            operation: "update",
            state: "uninitialized"
        }
    ));
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Browsing stored points on the map, opening popups and deleting points.

use std::sync::Arc;

use pinmap_core::flow::{BrowseCommand, LoadOutcome};
use pinmap_core::map::{ContainerReady, PopupAction};
use pinmap_core::{Error, PinMap, PointId, PointRecord, PointStore, Route, Session};

use crate::common::{GatedStore, VIEWPORT, memory_pinmap, pinmap_over, session};

fn record(name: &str, coordinates: &str) -> PointRecord {
    PointRecord {
        name: name.to_string(),
        coordinates: coordinates.to_string(),
    }
}

async fn create(pinmap: &PinMap, session: &Session, name: &str, coordinates: &str) -> PointId {
    let mut flow = pinmap.create_flow(session);
    flow.set_name(name);
    flow.surface_mut().set_coordinates(coordinates);
    flow.save().await.unwrap().point.id
}

#[tokio::test]
async fn browse_points_shows_one_marker_per_point() {
    // Arrange
    let pinmap = memory_pinmap().await;
    let session = session(&pinmap);
    let a = create(&pinmap, &session, "Tugu", "-7.7829, 110.3671").await;
    let b = create(&pinmap, &session, "Kraton", "-7.8053, 110.3642").await;
    let flow = pinmap.browse_flow(&session);

    // Act
    let outcome = flow.enter(VIEWPORT).await.unwrap();

    // Assert
    assert_eq!(
        outcome,
        LoadOutcome::Loaded {
            markers: 2,
            skipped: 0
        }
    );
    let snapshot = flow.snapshot().unwrap();
    let ids: Vec<_> = snapshot.markers.iter().map(|m| m.id.clone()).collect();
    assert_eq!(ids, [a.clone(), b]);
    assert_eq!(snapshot.markers.get(&a).unwrap().popup.name, "Tugu");
}

#[tokio::test]
async fn browse_points_requires_visible_map() {
    // Arrange
    let pinmap = memory_pinmap().await;
    let session = session(&pinmap);
    let flow = pinmap.browse_flow(&session);

    // Act
    let err = flow.load_points().await.unwrap_err();

    // Assert
    assert!(matches!(err, Error::MapNotReady));
    assert!(flow.snapshot().is_none());
}

#[tokio::test]
async fn browse_points_builds_map_once() {
    // Arrange
    let pinmap = memory_pinmap().await;
    let session = session(&pinmap);
    let flow = pinmap.browse_flow(&session);
    flow.on_visible(VIEWPORT);
    flow.with_view(|view| {
        view.pan(3, 0);
        view.zoom_in();
    })
    .unwrap();
    let before = flow.snapshot().unwrap().view;

    // Act - the screen is entered again, with another size
    let resized = ContainerReady {
        width: 120,
        height: 40,
    };
    flow.on_visible(resized);
    flow.on_visible(resized);

    // Assert
    let after = flow.snapshot().unwrap().view;
    assert_eq!(after.center(), before.center());
    assert_eq!(after.zoom(), before.zoom());
    assert_eq!(after.viewport(), resized);
}

#[tokio::test]
async fn browse_points_skips_malformed_coordinates() {
    // Arrange
    let store = Arc::new(GatedStore::new().await);
    store.inner().create(&record("Good", "-7.8, 110.4")).await.unwrap();
    store.inner().create(&record("Bad", "110.4")).await.unwrap();
    let pinmap = pinmap_over(store.clone());
    let session = session(&pinmap);
    let flow = pinmap.browse_flow(&session);

    // Act
    let outcome = flow.enter(VIEWPORT).await.unwrap();

    // Assert
    assert_eq!(
        outcome,
        LoadOutcome::Loaded {
            markers: 1,
            skipped: 1
        }
    );
}

#[tokio::test]
async fn browse_points_stale_load_does_not_clobber_newer_result() {
    // Arrange
    let store = Arc::new(GatedStore::new().await);
    store.inner().create(&record("First", "-7.8, 110.4")).await.unwrap();
    let pinmap = pinmap_over(store.clone());
    let session = session(&pinmap);
    let flow = Arc::new(pinmap.browse_flow(&session));
    flow.on_visible(VIEWPORT);

    // Act - an old load reads one point and stalls
    store.hold_next_list();
    let slow = {
        let flow = flow.clone();
        tokio::spawn(async move { flow.load_points().await })
    };
    store.wait_holding().await;

    // Act - a second point is added and a newer load finishes first
    store.inner().create(&record("Second", "-7.7, 110.3")).await.unwrap();
    let fresh = flow.load_points().await.unwrap();
    store.release();
    let stale = slow.await.unwrap().unwrap();

    // Assert
    assert_eq!(
        fresh,
        LoadOutcome::Loaded {
            markers: 2,
            skipped: 0
        }
    );
    assert_eq!(stale, LoadOutcome::Stale);
    assert_eq!(flow.snapshot().unwrap().markers.len(), 2);
}

#[tokio::test]
async fn browse_points_load_in_flight_does_not_restore_deleted_marker() {
    // Arrange
    let store = Arc::new(GatedStore::new().await);
    let gone = store
        .inner()
        .create(&record("Gone", "-7.8, 110.4"))
        .await
        .unwrap();
    let pinmap = pinmap_over(store.clone());
    let session = session(&pinmap);
    let flow = Arc::new(pinmap.browse_flow(&session));
    flow.on_visible(VIEWPORT);

    // Act - a load reads the point and stalls, then the point is deleted
    store.hold_next_list();
    let slow = {
        let flow = flow.clone();
        tokio::spawn(async move { flow.load_points().await })
    };
    store.wait_holding().await;
    flow.request_delete(gone.clone())
        .confirm(&flow)
        .await
        .unwrap();
    store.release();
    let outcome = slow.await.unwrap().unwrap();

    // Assert
    assert_eq!(outcome, LoadOutcome::Stale);
    assert!(flow.snapshot().unwrap().markers.get(&gone).is_none());
    assert!(pinmap.list_points(&session).await.unwrap().is_empty());
}

#[tokio::test]
async fn browse_points_confirmed_delete_removes_point_and_marker() {
    // Arrange
    let pinmap = memory_pinmap().await;
    let session = session(&pinmap);
    let keep = create(&pinmap, &session, "Keep", "-7.8, 110.4").await;
    let gone = create(&pinmap, &session, "Gone", "-7.8, 110.4").await;
    let flow = pinmap.browse_flow(&session);
    flow.enter(VIEWPORT).await.unwrap();
    flow.open_popup(&gone).unwrap();

    // Act
    let BrowseCommand::Confirm(confirmation) = flow.popup_action(gone.clone(), PopupAction::Delete)
    else {
        panic!("delete should ask for confirmation");
    };
    assert_eq!(confirmation.header(), "Confirm Delete");
    assert_eq!(
        confirmation.message(),
        "Are you sure you want to delete this point?"
    );
    confirmation.confirm(&flow).await.unwrap();

    // Assert - the marker at the same position but with another id stays
    let snapshot = flow.snapshot().unwrap();
    assert!(snapshot.markers.get(&gone).is_none());
    assert!(snapshot.markers.get(&keep).is_some());
    assert_eq!(snapshot.popup, None);

    let points = pinmap.list_points(&session).await.unwrap();
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].id, keep);
    assert!(matches!(
        pinmap.get_point(&session, &gone).await,
        Err(Error::NotFound(_))
    ));
    let mut edit = pinmap.edit_flow(&session, gone);
    assert!(matches!(edit.load().await, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn browse_points_cancelled_delete_keeps_point() {
    // Arrange
    let pinmap = memory_pinmap().await;
    let session = session(&pinmap);
    let id = create(&pinmap, &session, "Stay", "-7.8, 110.4").await;
    let flow = pinmap.browse_flow(&session);
    flow.enter(VIEWPORT).await.unwrap();

    // Act
    flow.request_delete(id.clone()).cancel();

    // Assert
    assert!(flow.snapshot().unwrap().markers.get(&id).is_some());
    assert_eq!(pinmap.list_points(&session).await.unwrap().len(), 1);
}

#[tokio::test]
async fn browse_points_edit_action_navigates_to_edit() {
    // Arrange
    let pinmap = memory_pinmap().await;
    let session = session(&pinmap);
    let id = create(&pinmap, &session, "Tugu", "-7.7829, 110.3671").await;
    let flow = pinmap.browse_flow(&session);
    flow.enter(VIEWPORT).await.unwrap();

    // Act
    let command = flow.popup_action(id.clone(), PopupAction::Edit);

    // Assert
    assert!(matches!(command, BrowseCommand::Navigate(Route::Edit(target)) if target == id));
}

#[tokio::test]
async fn browse_points_select_at_opens_popup_of_marker_under_cursor() {
    // Arrange
    let pinmap = memory_pinmap().await;
    let session = session(&pinmap);
    let flow = pinmap.browse_flow(&session);
    flow.on_visible(VIEWPORT);
    let target = flow.with_view(|view| view.coordinate_at(10, 5)).unwrap();
    let id = create(&pinmap, &session, "Here", &target.to_string()).await;
    flow.load_points().await.unwrap();

    // Act
    let selected = flow.select_at(10, 5).unwrap();
    let missed = flow.select_at(70, 20).unwrap();

    // Assert
    assert_eq!(selected, Some(id));
    assert_eq!(missed, None);
    assert_eq!(flow.snapshot().unwrap().popup, None);
}

#[tokio::test]
async fn browse_points_reload_reflects_changes() {
    // Arrange
    let pinmap = memory_pinmap().await;
    let session = session(&pinmap);
    let flow = pinmap.browse_flow(&session);
    flow.enter(VIEWPORT).await.unwrap();
    assert!(flow.snapshot().unwrap().markers.is_empty());

    // Act
    create(&pinmap, &session, "Later", "-7.8, 110.4").await;
    flow.enter(VIEWPORT).await.unwrap();

    // Assert
    assert_eq!(flow.snapshot().unwrap().markers.len(), 1);
}

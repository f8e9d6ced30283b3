// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! The flows against a remote JSON tree, served by wiremock.

use std::sync::Arc;

use pinmap_core::flow::LoadOutcome;
use pinmap_core::{Error, PointId, PointStore, RemoteStore};
use pinmap_rtdb::RtdbConfig;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{VIEWPORT, pinmap_over, session};

fn store(server: &MockServer) -> RemoteStore {
    let config = RtdbConfig {
        base_url: server.uri(),
        ..Default::default()
    };
    RemoteStore::new(config, "points").unwrap()
}

#[tokio::test]
async fn remote_store_create_posts_record() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/points.json"))
        .and(body_json(json!({
            "name": "Borobudur",
            "coordinates": "-7.6079, 110.2038"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "name": "-NxBoro" })))
        .expect(1)
        .mount(&server)
        .await;
    let pinmap = pinmap_over(Arc::new(store(&server)));
    let session = session(&pinmap);
    let mut flow = pinmap.create_flow(&session);
    flow.set_name("Borobudur");
    flow.surface_mut().set_coordinates("-7.6079, 110.2038");

    // Act
    let saved = flow.save().await.unwrap();

    // Assert
    assert_eq!(saved.point.id.as_str(), "-NxBoro");
}

#[tokio::test]
async fn remote_store_edit_reads_then_replaces() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/points/-Na.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Candi",
            "coordinates": "-7.7, 110.4"
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/points/-Na.json"))
        .and(body_json(json!({
            "name": "Prambanan",
            "coordinates": "-7.7520, 110.4915"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Prambanan",
            "coordinates": "-7.7520, 110.4915"
        })))
        .expect(1)
        .mount(&server)
        .await;
    let pinmap = pinmap_over(Arc::new(store(&server)));
    let session = session(&pinmap);
    let mut flow = pinmap.edit_flow(&session, PointId::new("-Na"));

    // Act
    flow.load().await.unwrap();
    flow.set_name("Prambanan");
    flow.surface_mut()
        .unwrap()
        .set_coordinates("-7.7520, 110.4915");
    let saved = flow.update().await.unwrap();

    // Assert
    assert_eq!(saved.point.id.as_str(), "-Na");
}

#[tokio::test]
async fn remote_store_missing_point_is_not_found() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/points/-Nz.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(null)))
        .mount(&server)
        .await;
    let pinmap = pinmap_over(Arc::new(store(&server)));
    let session = session(&pinmap);

    // Act
    let err = pinmap
        .get_point(&session, &PointId::new("-Nz"))
        .await
        .unwrap_err();

    // Assert
    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn remote_store_browse_and_delete() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/points.json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{
  "-Nb": {"name": "Borobudur", "coordinates": "-7.6079, 110.2038"},
  "-Na": {"name": "Prambanan", "coordinates": "-7.752, 110.4915"}
}"#,
            "application/json",
        ))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/points/-Na.json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("null", "application/json"))
        .expect(1)
        .mount(&server)
        .await;
    let pinmap = pinmap_over(Arc::new(store(&server)));
    let session = session(&pinmap);
    let flow = pinmap.browse_flow(&session);

    // Act
    let outcome = flow.enter(VIEWPORT).await.unwrap();
    flow.request_delete(PointId::new("-Na"))
        .confirm(&flow)
        .await
        .unwrap();

    // Assert
    assert_eq!(
        outcome,
        LoadOutcome::Loaded {
            markers: 2,
            skipped: 0
        }
    );
    let ids: Vec<_> = flow
        .snapshot()
        .unwrap()
        .markers
        .iter()
        .map(|m| m.id.as_str().to_string())
        .collect();
    assert_eq!(ids, ["-Nb"]);
}

#[tokio::test]
async fn remote_store_browse_skips_undecodable_records() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/points.json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{
  "-Na": {"name": "Tugu", "coordinates": "-7.7829, 110.3671"},
  "-Nb": {"name": "Kraton"},
  "-Nc": {"name": 5, "coordinates": "-7.8, 110.4"},
  "-Nd": {"name": "Malioboro", "coordinates": "110.3"}
}"#,
            "application/json",
        ))
        .mount(&server)
        .await;
    let pinmap = pinmap_over(Arc::new(store(&server)));
    let session = session(&pinmap);
    let flow = pinmap.browse_flow(&session);

    // Act
    let outcome = flow.enter(VIEWPORT).await.unwrap();

    // Assert - undecodable records never reach the map, bad coordinates are counted
    assert_eq!(
        outcome,
        LoadOutcome::Loaded {
            markers: 1,
            skipped: 1
        }
    );
    let points = pinmap.list_points(&session).await.unwrap();
    let ids: Vec<_> = points.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["-Na", "-Nd"]);
}

#[tokio::test]
async fn remote_store_server_error_becomes_store_error() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/points.json"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;
    let store = store(&server);

    // Act
    let err = store.list().await.unwrap_err();

    // Assert
    assert!(err.message().contains("503"), "{}", err.message());
}

#[test]
fn remote_store_rejects_empty_collection() {
    let config = RtdbConfig {
        base_url: "http://127.0.0.1:9".to_string(),
        ..Default::default()
    };
    assert!(RemoteStore::new(config, "/").is_err());
}

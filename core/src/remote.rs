// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use pinmap_rtdb::{NodePath, RtdbClient, RtdbConfig};

use crate::error::StoreError;
use crate::point::{Point, PointId, PointRecord};
use crate::store::PointStore;

/// Point store kept in a collection of a remote Realtime-Database style JSON tree.
#[derive(Debug, Clone)]
pub struct RemoteStore {
    client: RtdbClient,
    collection: NodePath,
}

impl RemoteStore {
    /// Creates a store over `collection`, e.g. `points`.
    pub fn new(config: RtdbConfig, collection: &str) -> Result<Self, StoreError> {
        let client = RtdbClient::new(config)?;
        let collection = NodePath::parse(collection)?;
        if collection.is_root() {
            return Err(StoreError::new("The collection path must not be empty"));
        }

        tracing::info!(base_url = %client.config().base_url, %collection, "using remote point store");
        Ok(Self { client, collection })
    }

    fn node(&self, id: &PointId) -> Result<NodePath, StoreError> {
        Ok(self.collection.child(id.as_str())?)
    }
}

#[async_trait]
impl PointStore for RemoteStore {
    async fn create(&self, record: &PointRecord) -> Result<PointId, StoreError> {
        let key = self.client.push(&self.collection, record).await?;
        Ok(PointId::new(key.as_str()))
    }

    async fn read(&self, id: &PointId) -> Result<Option<PointRecord>, StoreError> {
        Ok(self.client.get(&self.node(id)?).await?)
    }

    async fn update(&self, id: &PointId, record: &PointRecord) -> Result<(), StoreError> {
        Ok(self.client.set(&self.node(id)?, record).await?)
    }

    async fn delete(&self, id: &PointId) -> Result<(), StoreError> {
        Ok(self.client.remove(&self.node(id)?).await?)
    }

    async fn list(&self) -> Result<Vec<Point>, StoreError> {
        let children = self.client.children::<PointRecord>(&self.collection).await?;
        Ok(children
            .into_iter()
            .map(|(key, record)| Point::new(PointId::new(key.as_str()), record))
            .collect())
    }
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt::Debug;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::point::{Point, PointId, PointRecord};

/// Persistence for map points.
///
/// Ids are assigned by the store on [`create`](PointStore::create). Every call may suspend;
/// failures carry a message meant for the user.
#[async_trait]
pub trait PointStore: Send + Sync + Debug {
    /// Stores a new record and returns the id assigned to it.
    async fn create(&self, record: &PointRecord) -> Result<PointId, StoreError>;

    /// Fetches the record stored under `id`, `None` when there is none.
    async fn read(&self, id: &PointId) -> Result<Option<PointRecord>, StoreError>;

    /// Replaces the whole record stored under `id`.
    async fn update(&self, id: &PointId, record: &PointRecord) -> Result<(), StoreError>;

    /// Removes the record stored under `id`. Removing an unknown id is not an error.
    async fn delete(&self, id: &PointId) -> Result<(), StoreError>;

    /// Every stored point, in the store's natural order.
    async fn list(&self) -> Result<Vec<Point>, StoreError>;
}

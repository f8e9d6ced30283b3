// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Point stores wrapping an in-memory database, failing or stalling on demand.

use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use pinmap_core::{LocalDb, Point, PointId, PointRecord, PointStore, StoreError};
use tokio::sync::Notify;

/// Store operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Create,
    Read,
    Update,
    Delete,
    List,
}

/// Fails the operations it is told to, and records every call.
#[derive(Debug)]
pub struct FlakyStore {
    inner: LocalDb,
    failing: Mutex<HashSet<Op>>,
    calls: Mutex<Vec<Op>>,
}

#[allow(dead_code)]
impl FlakyStore {
    pub async fn new() -> Self {
        Self {
            inner: LocalDb::open(None).await.unwrap(),
            failing: Mutex::new(HashSet::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn inner(&self) -> &LocalDb {
        &self.inner
    }

    pub fn fail(&self, op: Op) {
        self.failing.lock().unwrap().insert(op);
    }

    pub fn recover(&self, op: Op) {
        self.failing.lock().unwrap().remove(&op);
    }

    pub fn calls(&self) -> Vec<Op> {
        self.calls.lock().unwrap().clone()
    }

    fn enter(&self, op: Op) -> Result<(), StoreError> {
        self.calls.lock().unwrap().push(op);
        if self.failing.lock().unwrap().contains(&op) {
            Err(StoreError::new("Service unavailable"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl PointStore for FlakyStore {
    async fn create(&self, record: &PointRecord) -> Result<PointId, StoreError> {
        self.enter(Op::Create)?;
        self.inner.create(record).await
    }

    async fn read(&self, id: &PointId) -> Result<Option<PointRecord>, StoreError> {
        self.enter(Op::Read)?;
        self.inner.read(id).await
    }

    async fn update(&self, id: &PointId, record: &PointRecord) -> Result<(), StoreError> {
        self.enter(Op::Update)?;
        self.inner.update(id, record).await
    }

    async fn delete(&self, id: &PointId) -> Result<(), StoreError> {
        self.enter(Op::Delete)?;
        self.inner.delete(id).await
    }

    async fn list(&self) -> Result<Vec<Point>, StoreError> {
        self.enter(Op::List)?;
        self.inner.list().await
    }
}

/// Holds back one `list` or `update` call until released.
///
/// A held `list` reads the points before it waits, so it returns what was stored at the
/// time it started. A held `update` waits before it writes.
#[derive(Debug)]
pub struct GatedStore {
    inner: LocalDb,
    hold_next: AtomicBool,
    hold_update: AtomicBool,
    holding: Notify,
    release: Notify,
}

#[allow(dead_code)]
impl GatedStore {
    pub async fn new() -> Self {
        Self {
            inner: LocalDb::open(None).await.unwrap(),
            hold_next: AtomicBool::new(false),
            hold_update: AtomicBool::new(false),
            holding: Notify::new(),
            release: Notify::new(),
        }
    }

    pub fn inner(&self) -> &LocalDb {
        &self.inner
    }

    /// The next `list` call waits for [`release`](Self::release).
    pub fn hold_next_list(&self) {
        self.hold_next.store(true, Ordering::SeqCst);
    }

    /// The next `update` call waits for [`release`](Self::release) before writing.
    pub fn hold_next_update(&self) {
        self.hold_update.store(true, Ordering::SeqCst);
    }

    /// Waits until a held `list` or `update` call has read its points.
    pub async fn wait_holding(&self) {
        self.holding.notified().await;
    }

    pub fn release(&self) {
        self.release.notify_one();
    }
}

#[async_trait]
impl PointStore for GatedStore {
    async fn create(&self, record: &PointRecord) -> Result<PointId, StoreError> {
        self.inner.create(record).await
    }

    async fn read(&self, id: &PointId) -> Result<Option<PointRecord>, StoreError> {
        self.inner.read(id).await
    }

    async fn update(&self, id: &PointId, record: &PointRecord) -> Result<(), StoreError> {
        if self.hold_update.swap(false, Ordering::SeqCst) {
            self.holding.notify_one();
            self.release.notified().await;
        }
        self.inner.update(id, record).await
    }

    async fn delete(&self, id: &PointId) -> Result<(), StoreError> {
        self.inner.delete(id).await
    }

    async fn list(&self) -> Result<Vec<Point>, StoreError> {
        let points = self.inner.list().await?;
        if self.hold_next.swap(false, Ordering::SeqCst) {
            self.holding.notify_one();
            self.release.notified().await;
        }
        Ok(points)
    }
}

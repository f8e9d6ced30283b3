// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

mod points;


use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::error::StoreError;
use crate::localdb::points::Points;
use crate::point::{Point, PointId, PointRecord};
use crate::store::PointStore;

/// Distinguishes the in-memory databases opened by one process.
pub(crate) static IN_MEMORY_DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Point store backed by a SQLite database.
#[derive(Debug, Clone)]
pub struct LocalDb {
    pool: SqlitePool,
    points: Points,
}

impl LocalDb {
    /// Opens a sqlite database connection.
    /// If `filename` is `None`, it opens an in-memory database.
    pub async fn open(filename: Option<&Path>) -> Result<Self, StoreError> {
        let (options, pool_options) = if let Some(filename) = filename {
            tracing::info!(path = %filename.display(), "connecting to SQLite database");
            let options = SqliteConnectOptions::new()
                .filename(filename)
                .create_if_missing(true);
            (options, SqlitePoolOptions::new())
        } else {
            tracing::info!("connecting to in-memory SQLite database");
            let db_id = IN_MEMORY_DB_COUNTER.fetch_add(1, Ordering::SeqCst);
            let options = SqliteConnectOptions::new()
                .filename(format!("file:pinmap_{db_id}:?mode=memory&cache=shared"))
                .in_memory(true)
                .create_if_missing(true);

            // the database lives as long as its only connection does
            let pool_options = SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
            (options, pool_options)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| StoreError::new(format!("Failed to connect to SQLite database: {e}")))?;

        sqlx::migrate!("src/localdb/migrations") // relative path from the crate root
            .run(&pool)
            .await
            .map_err(|e| StoreError::new(format!("Failed to run migrations: {e}")))?;

        let points = Points::new(pool.clone());
        Ok(LocalDb { pool, points })
    }

    pub async fn close(self) -> Result<(), StoreError> {
        tracing::debug!("closing database connection");
        self.pool.close().await;
        Ok(())
    }
}

#[async_trait]
impl PointStore for LocalDb {
    async fn create(&self, record: &PointRecord) -> Result<PointId, StoreError> {
        let id = PointId::new(uuid::Uuid::new_v4().to_string());
        self.points.insert(id.as_str(), record).await?;
        tracing::debug!(%id, "point inserted");
        Ok(id)
    }

    async fn read(&self, id: &PointId) -> Result<Option<PointRecord>, StoreError> {
        let row = self.points.get(id.as_str()).await?;
        Ok(row.map(PointRecord::from))
    }

    async fn update(&self, id: &PointId, record: &PointRecord) -> Result<(), StoreError> {
        match self.points.update(id.as_str(), record).await? {
            0 => Err(StoreError::new(format!("No point stored under {id}"))),
            _ => Ok(()),
        }
    }

    async fn delete(&self, id: &PointId) -> Result<(), StoreError> {
        let affected = self.points.delete(id.as_str()).await?;
        tracing::debug!(%id, affected, "point deleted");
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Point>, StoreError> {
        let rows = self.points.list().await?;
        Ok(rows.into_iter().map(Point::from).collect())
    }
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use sqlx::SqlitePool;

use crate::point::{Point, PointId, PointRecord};

#[derive(Debug, Clone)]
pub struct Points {
    pool: SqlitePool,
}

impl Points {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, id: &str, record: &PointRecord) -> Result<(), sqlx::Error> {
        const SQL: &str = "\
INSERT INTO points (id, name, coordinates)
VALUES (?, ?, ?);
";

        sqlx::query(SQL)
            .bind(id)
            .bind(&record.name)
            .bind(&record.coordinates)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn get(&self, id: &str) -> Result<Option<PointRow>, sqlx::Error> {
        const SQL: &str = "\
SELECT id, name, coordinates
FROM points
WHERE id = ?;
";

        sqlx::query_as(SQL)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Returns the number of rows touched, zero when the id is unknown.
    pub async fn update(&self, id: &str, record: &PointRecord) -> Result<u64, sqlx::Error> {
        const SQL: &str = "\
UPDATE points
SET name = ?, coordinates = ?
WHERE id = ?;
";

        let result = sqlx::query(SQL)
            .bind(&record.name)
            .bind(&record.coordinates)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn delete(&self, id: &str) -> Result<u64, sqlx::Error> {
        const SQL: &str = "DELETE FROM points WHERE id = ?;";

        let result = sqlx::query(SQL).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    pub async fn list(&self) -> Result<Vec<PointRow>, sqlx::Error> {
        const SQL: &str = "\
SELECT id, name, coordinates
FROM points
ORDER BY seq;
";

        sqlx::query_as(SQL).fetch_all(&self.pool).await
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PointRow {
    id: String,
    name: String,
    coordinates: String,
}

impl From<PointRow> for PointRecord {
    fn from(row: PointRow) -> Self {
        Self {
            name: row.name,
            coordinates: row.coordinates,
        }
    }
}

impl From<PointRow> for Point {
    fn from(row: PointRow) -> Self {
        Self {
            id: PointId::new(row.id),
            name: row.name,
            coordinates: row.coordinates,
        }
    }
}

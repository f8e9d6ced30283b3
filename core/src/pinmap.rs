// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error as StdError;
use std::sync::Arc;

use tokio::fs;

use crate::auth::{LoginGate, Session};
use crate::config::{Config, StoreConfig};
use crate::error::Error;
use crate::flow::{BrowseFlow, CreateFlow, EditFlow};
use crate::localdb::LocalDb;
use crate::map::MapConfig;
use crate::point::{Point, PointId};
use crate::remote::RemoteStore;
use crate::store::PointStore;

/// Map point application core.
#[derive(Debug, Clone)]
pub struct PinMap {
    config: Config,
    store: Arc<dyn PointStore>,
    gate: LoginGate,
    db: Option<LocalDb>,
}

impl PinMap {
    /// Creates a new instance with the given configuration, opening the configured store.
    pub async fn new(mut config: Config) -> Result<Self, Box<dyn StdError>> {
        config.normalize()?;
        prepare(&config).await?;

        let mut db = None;
        let store: Arc<dyn PointStore> = match &config.store {
            StoreConfig::Sqlite { .. } | StoreConfig::Memory => {
                let local = LocalDb::open(config.database_path().as_deref())
                    .await
                    .map_err(|e| format!("Failed to initialize db: {e}"))?;
                db = Some(local.clone());
                Arc::new(local)
            }
            StoreConfig::Remote(remote) => Arc::new(
                RemoteStore::new(remote.rtdb(), &remote.collection)
                    .map_err(|e| format!("Failed to initialize remote store: {e}"))?,
            ),
        };

        Ok(Self::assemble(config, store, db))
    }

    /// Creates an instance over an already opened store.
    pub fn with_store(config: Config, store: Arc<dyn PointStore>) -> Self {
        Self::assemble(config, store, None)
    }

    fn assemble(config: Config, store: Arc<dyn PointStore>, db: Option<LocalDb>) -> Self {
        let gate = LoginGate::new(config.auth.clone());
        Self {
            config,
            store,
            gate,
            db,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn map_config(&self) -> &MapConfig {
        &self.config.map
    }

    /// Checks the credentials, the returned session opens the flows.
    pub fn login(&self, username: &str, password: &str) -> Result<Session, Error> {
        Ok(self.gate.login(username, password)?)
    }

    pub fn create_flow(&self, _session: &Session) -> CreateFlow {
        CreateFlow::new(self.store.clone(), &self.config.map)
    }

    pub fn edit_flow(&self, _session: &Session, id: PointId) -> EditFlow {
        EditFlow::new(self.store.clone(), self.config.map.clone(), id)
    }

    pub fn browse_flow(&self, _session: &Session) -> BrowseFlow {
        BrowseFlow::new(self.store.clone(), self.config.map.clone())
    }

    /// Every stored point, in store order.
    pub async fn list_points(&self, _session: &Session) -> Result<Vec<Point>, Error> {
        Ok(self.store.list().await?)
    }

    pub async fn get_point(&self, _session: &Session, id: &PointId) -> Result<Point, Error> {
        match self.store.read(id).await? {
            Some(record) => Ok(Point::new(id.clone(), record)),
            None => Err(Error::NotFound(id.clone())),
        }
    }

    /// Close the store.
    pub async fn close(self) -> Result<(), Box<dyn StdError>> {
        if let Some(db) = self.db {
            db.close().await?;
        }
        Ok(())
    }
}

async fn prepare(config: &Config) -> Result<(), Box<dyn StdError>> {
    if let Some(parent) = config.database_path().as_deref().and_then(|p| p.parent()) {
        tracing::info!(path = %parent.display(), "ensuring state directory exists");
        fs::create_dir_all(parent)
            .await
            .map_err(|e| format!("Failed to create state directory: {e}"))?;
    }
    Ok(())
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Test data factories.

use std::path::Path;
use std::sync::Arc;

use pinmap_core::map::ContainerReady;
use pinmap_core::{Config, LocalDb, PinMap, PointDraft, PointStore, Session, StoreConfig};

/// A terminal sized viewport.
#[allow(dead_code)]
pub const VIEWPORT: ContainerReady = ContainerReady {
    width: 80,
    height: 24,
};

/// Creates a config keeping its database in `state_dir`, or in memory.
#[allow(dead_code)]
pub fn test_config(state_dir: Option<&Path>) -> Config {
    Config {
        state_dir: state_dir.map(Path::to_path_buf),
        store: match state_dir {
            Some(_) => StoreConfig::Sqlite { path: None },
            None => StoreConfig::Memory,
        },
        ..Default::default()
    }
}

#[allow(dead_code)]
pub fn test_draft(name: &str, coordinates: &str) -> PointDraft {
    PointDraft {
        name: name.to_string(),
        coordinates: coordinates.to_string(),
    }
}

/// Opens an application over a fresh in-memory database.
#[allow(dead_code)]
pub async fn memory_pinmap() -> PinMap {
    let db = LocalDb::open(None).await.unwrap();
    pinmap_over(Arc::new(db))
}

/// Opens an application over `store`.
#[allow(dead_code)]
pub fn pinmap_over(store: Arc<dyn PointStore>) -> PinMap {
    PinMap::with_store(test_config(None), store)
}

/// Logs in with the default credentials.
#[allow(dead_code)]
pub fn session(pinmap: &PinMap) -> Session {
    pinmap.login("admin", "password").unwrap()
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Core of pinmap: named points on a map, kept in a local or remote store.

mod auth;
mod config;
mod coordinate;
mod error;
pub mod flow;
mod localdb;
pub mod map;
mod pinmap;
mod point;
mod remote;
mod store;

pub use crate::auth::{Credentials, LoginGate, Session};
pub use crate::config::{APP_NAME, Config, RemoteConfig, StoreConfig};
pub use crate::coordinate::{Coordinate, CoordinateError};
pub use crate::error::{AuthError, Error, StoreError, ValidationError};
pub use crate::flow::{Alert, Route, Saved};
pub use crate::localdb::LocalDb;
pub use crate::map::MapConfig;
pub use crate::pinmap::PinMap;
pub use crate::point::{Point, PointDraft, PointId, PointRecord};
pub use crate::remote::RemoteStore;
pub use crate::store::PointStore;

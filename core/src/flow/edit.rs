// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::sync::Arc;

use crate::error::{Error, ValidationError};
use crate::flow::{Alert, Route, Saved};
use crate::map::{MapConfig, MapSurface};
use crate::point::{Point, PointDraft, PointId, PointRecord};
use crate::store::PointStore;

/// Lifecycle of an edit form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    /// Nothing loaded yet.
    Uninitialized,
    Loading,
    /// The point is loaded and can be edited.
    Ready,
    Saving,
    /// The last update failed, the form is kept for another try.
    Error,
    /// The point does not exist.
    NotFound,
}

impl EditState {
    pub fn name(self) -> &'static str {
        match self {
            EditState::Uninitialized => "uninitialized",
            EditState::Loading => "loading",
            EditState::Ready => "ready",
            EditState::Saving => "saving",
            EditState::Error => "in error",
            EditState::NotFound => "not found",
        }
    }
}

impl fmt::Display for EditState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Loads one point, lets the user change it and writes it back under the same id.
#[derive(Debug)]
pub struct EditFlow {
    store: Arc<dyn PointStore>,
    config: MapConfig,
    id: PointId,
    state: EditState,
    name: String,
    surface: Option<MapSurface>,
    alert: Option<Alert>,
}

impl EditFlow {
    pub fn new(store: Arc<dyn PointStore>, config: MapConfig, id: PointId) -> Self {
        Self {
            store,
            config,
            id,
            state: EditState::Uninitialized,
            name: String::new(),
            surface: None,
            alert: None,
        }
    }

    pub fn id(&self) -> &PointId {
        &self.id
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// The map, once the point is loaded.
    pub fn surface(&self) -> Option<&MapSurface> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut MapSurface> {
        self.surface.as_mut()
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn draft(&self) -> PointDraft {
        PointDraft {
            name: self.name.clone(),
            coordinates: self
                .surface
                .as_ref()
                .map(|s| s.coordinates().to_string())
                .unwrap_or_default(),
        }
    }

    pub fn can_save(&self) -> Result<PointRecord, ValidationError> {
        self.draft().validate()
    }

    /// Reads the point and fills in the form and the map.
    ///
    /// A transport failure puts the flow back to [`EditState::Uninitialized`] so that the
    /// load can be tried again.
    pub async fn load(&mut self) -> Result<(), Error> {
        if self.state != EditState::Uninitialized {
            return Err(self.invalid("load"));
        }

        self.state = EditState::Loading;
        let record = match self.store.read(&self.id).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                tracing::debug!(id = %self.id, "point to edit not found");
                self.state = EditState::NotFound;
                return Err(Error::NotFound(self.id.clone()));
            }
            Err(e) => {
                tracing::warn!(id = %self.id, error = %e, "failed to load point");
                self.state = EditState::Uninitialized;
                self.alert = Some(Alert::new("Load Failed", e.message()));
                return Err(e.into());
            }
        };

        match MapSurface::for_point(&self.config, &record.coordinates) {
            Ok(surface) => {
                self.name = record.name;
                self.surface = Some(surface);
                self.state = EditState::Ready;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(id = %self.id, coordinates = %record.coordinates, "stored point has malformed coordinates");
                self.state = EditState::Uninitialized;
                self.alert = Some(Alert::new("Load Failed", e.to_string()));
                Err(e)
            }
        }
    }

    /// Replaces the stored point with the form content, keeping its id.
    ///
    /// Allowed once loaded, and again after a failed update. An update still marked as
    /// saving was dropped before it finished, so it may be retried too.
    pub async fn update(&mut self) -> Result<Saved, Error> {
        if !matches!(
            self.state,
            EditState::Ready | EditState::Error | EditState::Saving
        ) {
            return Err(self.invalid("update"));
        }

        let record = self.can_save()?;
        self.state = EditState::Saving;
        match self.store.update(&self.id, &record).await {
            Ok(()) => {
                tracing::info!(id = %self.id, name = %record.name, "point updated");
                self.state = EditState::Ready;
                self.alert = None;
                Ok(Saved {
                    point: Point::new(self.id.clone(), record),
                    next: Route::Browse,
                })
            }
            Err(e) => {
                tracing::warn!(id = %self.id, error = %e, "failed to update point");
                self.state = EditState::Error;
                self.alert = Some(Alert::new("Update Failed", e.message()));
                Err(e.into())
            }
        }
    }

    fn invalid(&self, operation: &'static str) -> Error {
        Error::InvalidState {
            operation,
            state: self.state.name(),
        }
    }
}

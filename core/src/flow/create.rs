// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use crate::error::{Error, ValidationError};
use crate::flow::{Alert, Route, Saved};
use crate::map::{MapConfig, MapSurface};
use crate::point::{Point, PointDraft, PointRecord};
use crate::store::PointStore;

/// A fresh marker and an empty name, saved as a new point.
#[derive(Debug)]
pub struct CreateFlow {
    store: Arc<dyn PointStore>,
    name: String,
    surface: MapSurface,
    alert: Option<Alert>,
}

impl CreateFlow {
    pub fn new(store: Arc<dyn PointStore>, config: &MapConfig) -> Self {
        Self {
            store,
            name: String::new(),
            surface: MapSurface::new(config),
            alert: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn surface(&self) -> &MapSurface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut MapSurface {
        &mut self.surface
    }

    pub fn draft(&self) -> PointDraft {
        PointDraft {
            name: self.name.clone(),
            coordinates: self.surface.coordinates().to_string(),
        }
    }

    /// Whether the form can be saved, and why not.
    pub fn can_save(&self) -> Result<PointRecord, ValidationError> {
        self.draft().validate()
    }

    /// The failure of the last save, until dismissed.
    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    /// Stores the point.
    ///
    /// Invalid input is rejected before the store is contacted. A store failure leaves
    /// the form as it is and raises a "Save Failed" alert.
    pub async fn save(&mut self) -> Result<Saved, Error> {
        let record = self.can_save()?;

        match self.store.create(&record).await {
            Ok(id) => {
                tracing::info!(%id, name = %record.name, "point created");
                self.alert = None;
                Ok(Saved {
                    point: Point::new(id, record),
                    next: Route::Browse,
                })
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to create point");
                self.alert = Some(Alert::new("Save Failed", e.message()));
                Err(e.into())
            }
        }
    }
}

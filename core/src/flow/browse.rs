// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use crate::error::Error;
use crate::flow::Route;
use crate::map::{ContainerReady, MapConfig, MapView, Marker, MarkerLayer, Popup, PopupAction};
use crate::point::PointId;
use crate::store::PointStore;

/// All stored points as markers on one map.
///
/// The flow is shared between the screen and background loads, so every method takes
/// `&self`. The map is built on the first [`on_visible`](Self::on_visible) and kept for
/// the lifetime of the flow.
#[derive(Debug)]
pub struct BrowseFlow {
    store: Arc<dyn PointStore>,
    config: MapConfig,
    map: OnceLock<Mutex<BrowseMap>>,
    generation: AtomicU64,
}

#[derive(Debug)]
struct BrowseMap {
    view: MapView,
    markers: MarkerLayer,
    popup: Option<PointId>,
}

/// A copy of the browse map for drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowseSnapshot {
    pub view: MapView,
    pub markers: MarkerLayer,
    /// The marker whose popup is open.
    pub popup: Option<PointId>,
}

/// What became of a [`BrowseFlow::load_points`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The markers were replaced.
    Loaded {
        markers: usize,
        /// Points left out because their coordinates do not parse.
        skipped: usize,
    },

    /// A newer load started meanwhile, this result was dropped.
    Stale,
}

/// What the screen should do after a popup button was pressed.
#[derive(Debug)]
pub enum BrowseCommand {
    Navigate(Route),
    Confirm(DeleteConfirmation),
}

/// A pending delete, waiting for the user to answer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a delete only happens when confirmed"]
pub struct DeleteConfirmation {
    id: PointId,
}

impl DeleteConfirmation {
    pub fn id(&self) -> &PointId {
        &self.id
    }

    pub fn header(&self) -> &'static str {
        "Confirm Delete"
    }

    pub fn message(&self) -> &'static str {
        "Are you sure you want to delete this point?"
    }

    /// Deletes the point and drops its marker.
    pub async fn confirm(self, flow: &BrowseFlow) -> Result<(), Error> {
        flow.delete_point(&self.id).await
    }

    pub fn cancel(self) {
        tracing::debug!(id = %self.id, "delete cancelled");
    }
}

impl BrowseFlow {
    pub fn new(store: Arc<dyn PointStore>, config: MapConfig) -> Self {
        Self {
            store,
            config,
            map: OnceLock::new(),
            generation: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// The map container was laid out, builds the map on first call.
    pub fn on_visible(&self, ready: ContainerReady) {
        let map = self.map.get_or_init(|| {
            tracing::debug!(width = ready.width, height = ready.height, "building browse map");
            Mutex::new(BrowseMap {
                view: MapView::new(self.config.center, self.config.zoom, self.config.layers.len()),
                markers: MarkerLayer::default(),
                popup: None,
            })
        });
        lock(map).view.resize(ready);
    }

    /// Shows the map and loads the points, as done every time the screen is entered.
    pub async fn enter(&self, ready: ContainerReady) -> Result<LoadOutcome, Error> {
        self.on_visible(ready);
        self.load_points().await
    }

    pub fn is_ready(&self) -> bool {
        self.map.get().is_some()
    }

    /// Replaces all markers with the stored points.
    ///
    /// Only the most recent call applies its result; an older call that finishes later
    /// reports [`LoadOutcome::Stale`] and changes nothing.
    pub async fn load_points(&self) -> Result<LoadOutcome, Error> {
        let map = self.map.get().ok_or(Error::MapNotReady)?;
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let points = self.store.list().await?;

        let mut markers = Vec::with_capacity(points.len());
        let mut skipped = 0;
        for point in points {
            match point.coordinate() {
                Ok(position) => markers.push(Marker {
                    id: point.id,
                    position,
                    popup: Popup { name: point.name },
                }),
                Err(e) => {
                    tracing::warn!(id = %point.id, error = %e, "skipping point with malformed coordinates");
                    skipped += 1;
                }
            }
        }

        let mut map = lock(map);
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(generation, "dropping stale point list");
            return Ok(LoadOutcome::Stale);
        }

        let count = markers.len();
        map.markers.replace(markers);
        if map.popup.as_ref().is_some_and(|id| map.markers.get(id).is_none()) {
            map.popup = None;
        }
        tracing::debug!(markers = count, skipped, "point markers replaced");
        Ok(LoadOutcome::Loaded {
            markers: count,
            skipped,
        })
    }

    pub fn snapshot(&self) -> Option<BrowseSnapshot> {
        let map = lock(self.map.get()?);
        Some(BrowseSnapshot {
            view: map.view.clone(),
            markers: map.markers.clone(),
            popup: map.popup.clone(),
        })
    }

    /// Runs `f` on the map view, for panning, zooming and switching layers.
    pub fn with_view<R>(&self, f: impl FnOnce(&mut MapView) -> R) -> Result<R, Error> {
        let map = self.map.get().ok_or(Error::MapNotReady)?;
        Ok(f(&mut lock(map).view))
    }

    /// Opens the popup of the marker tagged with `id`.
    pub fn open_popup(&self, id: &PointId) -> Result<Option<Popup>, Error> {
        let map = self.map.get().ok_or(Error::MapNotReady)?;
        let mut map = lock(map);
        let popup = map.markers.get(id).map(|m| m.popup.clone());
        map.popup = popup.as_ref().map(|_| id.clone());
        Ok(popup)
    }

    /// Opens the popup of the marker at a cell, or closes any popup when there is none.
    pub fn select_at(&self, col: u16, row: u16) -> Result<Option<PointId>, Error> {
        let map = self.map.get().ok_or(Error::MapNotReady)?;
        let mut map = lock(map);
        let id = map.markers.hit(&map.view, col, row).map(|m| m.id.clone());
        map.popup.clone_from(&id);
        Ok(id)
    }

    pub fn close_popup(&self) {
        if let Some(map) = self.map.get() {
            lock(map).popup = None;
        }
    }

    /// Handles a button pressed in the popup of `id`.
    pub fn popup_action(&self, id: PointId, action: PopupAction) -> BrowseCommand {
        match action {
            PopupAction::Edit => BrowseCommand::Navigate(self.edit_point(id)),
            PopupAction::Delete => BrowseCommand::Confirm(self.request_delete(id)),
        }
    }

    pub fn edit_point(&self, id: PointId) -> Route {
        Route::Edit(id)
    }

    /// Asks for confirmation before deleting `id`.
    pub fn request_delete(&self, id: PointId) -> DeleteConfirmation {
        DeleteConfirmation { id }
    }

    /// Deletes the point, then removes the marker tagged with its id.
    ///
    /// A load still in flight was listed before the delete, so it is marked stale.
    pub async fn delete_point(&self, id: &PointId) -> Result<(), Error> {
        self.store.delete(id).await?;
        tracing::info!(%id, "point deleted");

        match self.map.get() {
            None => {
                self.generation.fetch_add(1, Ordering::SeqCst);
            }
            Some(map) => {
                let mut map = lock(map);
                self.generation.fetch_add(1, Ordering::SeqCst);
                map.markers.remove(id);
                if map.popup.as_ref() == Some(id) {
                    map.popup = None;
                }
            }
        }
        Ok(())
    }
}

fn lock(map: &Mutex<BrowseMap>) -> MutexGuard<'_, BrowseMap> {
    map.lock().unwrap_or_else(PoisonError::into_inner)
}

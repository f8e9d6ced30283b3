// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use crate::coordinate::Coordinate;
use crate::error::Error;
use crate::map::{MapConfig, MapView};

/// Decimal places kept when a gesture picks a coordinate.
const GESTURE_DECIMALS: i32 = 6;

/// A map with exactly one draggable marker, bound to a coordinate text field.
///
/// The marker moves freely while dragged; the coordinate text only follows on drag end
/// or on a click on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapSurface {
    view: MapView,
    marker: Coordinate,
    coordinates: String,
    dragging: bool,
    tooltip: String,
}

impl MapSurface {
    /// A map at the configured default, with the marker at its center and no coordinates
    /// picked yet.
    pub fn new(config: &MapConfig) -> Self {
        Self {
            view: MapView::new(config.center, config.zoom, config.layers.len()),
            marker: config.center,
            coordinates: String::new(),
            dragging: false,
            tooltip: config.tooltip.clone(),
        }
    }

    /// A map centered on and marking stored coordinates.
    pub fn for_point(config: &MapConfig, coordinates: &str) -> Result<Self, Error> {
        let coord: Coordinate = coordinates.parse().map_err(Error::MalformedCoordinates)?;
        Ok(Self {
            view: MapView::new(coord, config.zoom, config.layers.len()),
            marker: coord,
            coordinates: coordinates.to_string(),
            dragging: false,
            tooltip: String::new(),
        })
    }

    pub fn view(&self) -> &MapView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut MapView {
        &mut self.view
    }

    /// Current coordinate text, empty until a position is picked.
    pub fn coordinates(&self) -> &str {
        &self.coordinates
    }

    pub fn marker_position(&self) -> Coordinate {
        self.marker
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Hint for the user, empty when there is none.
    pub fn tooltip(&self) -> &str {
        &self.tooltip
    }

    /// The marker was dropped at `pos`.
    pub fn on_marker_drag_end(&mut self, pos: Coordinate) {
        self.dragging = false;
        self.pick(pos);
    }

    /// The map was clicked at `pos`, the marker jumps there.
    pub fn on_map_click(&mut self, pos: Coordinate) {
        self.dragging = false;
        self.pick(pos);
    }

    /// Moves the marker by the given degrees without committing the coordinate.
    pub fn drag_marker(&mut self, dlat: f64, dlng: f64) {
        self.dragging = true;
        self.marker.lat += dlat;
        self.marker.lng += dlng;
    }

    /// Ends a drag started with [`drag_marker`](Self::drag_marker).
    pub fn release_marker(&mut self) {
        if self.dragging {
            self.on_marker_drag_end(self.marker);
        }
    }

    /// Edits the coordinate text directly; the marker follows when the text parses.
    pub fn set_coordinates(&mut self, text: &str) {
        text.clone_into(&mut self.coordinates);
        if let Ok(coord) = text.parse::<Coordinate>() {
            self.dragging = false;
            self.marker = coord;
        }
    }

    fn pick(&mut self, pos: Coordinate) {
        let pos = pos.rounded(GESTURE_DECIMALS);
        self.marker = pos;
        self.coordinates = pos.to_string();
        tracing::debug!(coordinates = %self.coordinates, "coordinate picked");
    }
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use crate::coordinate::Coordinate;

pub const MIN_ZOOM: u8 = 1;
pub const MAX_ZOOM: u8 = 19;

/// Columns covering the whole world at zoom level 0.
const WORLD_COLUMNS: f64 = 64.0;

/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f64 = 2.0;

/// Size of the area a map is drawn into, known once the container is laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContainerReady {
    pub width: u16,
    pub height: u16,
}

/// Visible area of a map, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    pub fn contains(&self, coord: Coordinate) -> bool {
        (self.south..=self.north).contains(&coord.lat) && (self.west..=self.east).contains(&coord.lng)
    }
}

/// Center, zoom and active layer of a map, projected onto a grid of terminal cells.
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    center: Coordinate,
    zoom: u8,
    layer: usize,
    layer_count: usize,
    viewport: ContainerReady,
}

impl MapView {
    pub fn new(center: Coordinate, zoom: u8, layer_count: usize) -> Self {
        Self {
            center,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            layer: 0,
            layer_count,
            viewport: ContainerReady::default(),
        }
    }

    pub fn center(&self) -> Coordinate {
        self.center
    }

    pub fn set_center(&mut self, center: Coordinate) {
        self.center = center;
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    /// Index of the active base layer.
    pub fn layer(&self) -> usize {
        self.layer
    }

    pub fn viewport(&self) -> ContainerReady {
        self.viewport
    }

    pub fn resize(&mut self, viewport: ContainerReady) {
        self.viewport = viewport;
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + 1).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = self.zoom.saturating_sub(1).max(MIN_ZOOM);
    }

    /// Activates the base layer at `index`, ignored when out of range.
    pub fn switch_layer(&mut self, index: usize) {
        if index < self.layer_count {
            self.layer = index;
        }
    }

    /// Activates the next base layer, wrapping around.
    pub fn next_layer(&mut self) {
        if self.layer_count > 0 {
            self.layer = (self.layer + 1) % self.layer_count;
        }
    }

    /// Moves the center by whole cells, positive `rows` go south.
    pub fn pan(&mut self, cols: i32, rows: i32) {
        self.center.lng += f64::from(cols) * self.degrees_per_col();
        self.center.lat -= f64::from(rows) * self.degrees_per_row();
    }

    /// Longitude degrees covered by one column.
    pub fn degrees_per_col(&self) -> f64 {
        360.0 / (WORLD_COLUMNS * 2f64.powi(i32::from(self.zoom)))
    }

    /// Latitude degrees covered by one row.
    pub fn degrees_per_row(&self) -> f64 {
        self.degrees_per_col() * CELL_ASPECT
    }

    pub fn bounds(&self) -> Bounds {
        let half_w = f64::from(self.viewport.width) / 2.0 * self.degrees_per_col();
        let half_h = f64::from(self.viewport.height) / 2.0 * self.degrees_per_row();
        Bounds {
            south: self.center.lat - half_h,
            west: self.center.lng - half_w,
            north: self.center.lat + half_h,
            east: self.center.lng + half_w,
        }
    }

    /// The coordinate at the middle of a cell, relative to the top left of the viewport.
    pub fn coordinate_at(&self, col: u16, row: u16) -> Coordinate {
        let bounds = self.bounds();
        Coordinate {
            lat: bounds.north - (f64::from(row) + 0.5) * self.degrees_per_row(),
            lng: bounds.west + (f64::from(col) + 0.5) * self.degrees_per_col(),
        }
    }

    /// The cell showing `coord`, `None` when it is outside the viewport.
    pub fn project(&self, coord: Coordinate) -> Option<(u16, u16)> {
        let bounds = self.bounds();
        let col = ((coord.lng - bounds.west) / self.degrees_per_col()).floor();
        let row = ((bounds.north - coord.lat) / self.degrees_per_row()).floor();
        let in_range = |v: f64, max: u16| v >= 0.0 && v < f64::from(max);
        if in_range(col, self.viewport.width) && in_range(row, self.viewport.height) {
            Some((col as u16, row as u16))
        } else {
            None
        }
    }
}

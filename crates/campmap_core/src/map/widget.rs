//! Boundary contract for the external map widget.
//!
//! # Responsibility
//! - Describe the subset of widget behavior the adapter relies on.
//! - Provide [`RecordingWidget`], an in-process widget for the CLI and tests.
//!
//! # Invariants
//! - A marker handle is valid until removed; removing twice is a no-op.

use crate::model::campground::LatLng;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicUsize, Ordering};
use uuid::Uuid;

/// Base layer style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapType {
    Terrain,
    Hybrid,
}

/// Construction options for one widget instance.
#[derive(Debug, Clone, PartialEq)]
pub struct MapOptions {
    pub center: LatLng,
    pub zoom: u8,
    pub map_type: MapType,
}

/// One marker placement request.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerOptions {
    pub position: LatLng,
    pub title: String,
    pub icon: Option<String>,
}

/// Opaque handle to a placed marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkerHandle(Uuid);

impl MarkerHandle {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MarkerHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for MarkerHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "marker-{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetError {
    /// Target container does not exist.
    MissingContainer(String),
    Backend(String),
}

impl Display for WidgetError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingContainer(id) => write!(f, "map container `{id}` is not available"),
            Self::Backend(message) => write!(f, "map widget failed: {message}"),
        }
    }
}

impl Error for WidgetError {}

/// Live map bound to a container.
pub trait MapWidget {
    fn set_center(&mut self, center: LatLng);
    fn center(&self) -> LatLng;
    fn set_zoom(&mut self, zoom: u8);
    /// Current zoom, when the widget can report one.
    fn zoom(&self) -> Option<u8>;
    fn add_marker(&mut self, marker: MarkerOptions) -> MarkerHandle;
    /// Returns `false` when the handle was not placed on this widget.
    fn remove_marker(&mut self, handle: MarkerHandle) -> bool;
    fn marker_count(&self) -> usize;
}

/// Factory binding new widgets to containers once the widget code is loaded.
pub trait WidgetProvider: Send + Sync {
    fn create(
        &self,
        container: &str,
        options: &MapOptions,
    ) -> Result<Box<dyn MapWidget>, WidgetError>;
}

/// In-process widget that records its state instead of drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingWidget {
    container: String,
    map_type: MapType,
    center: LatLng,
    zoom: Option<u8>,
    markers: Vec<(MarkerHandle, MarkerOptions)>,
}

impl RecordingWidget {
    pub fn new(container: impl Into<String>, options: &MapOptions) -> Self {
        Self {
            container: container.into(),
            map_type: options.map_type,
            center: options.center,
            zoom: Some(options.zoom),
            markers: Vec::new(),
        }
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    pub fn map_type(&self) -> MapType {
        self.map_type
    }

    /// Placed markers in placement order.
    pub fn markers(&self) -> impl Iterator<Item = &MarkerOptions> {
        self.markers.iter().map(|(_, marker)| marker)
    }
}

impl MapWidget for RecordingWidget {
    fn set_center(&mut self, center: LatLng) {
        self.center = center;
    }

    fn center(&self) -> LatLng {
        self.center
    }

    fn set_zoom(&mut self, zoom: u8) {
        self.zoom = Some(zoom);
    }

    fn zoom(&self) -> Option<u8> {
        self.zoom
    }

    fn add_marker(&mut self, marker: MarkerOptions) -> MarkerHandle {
        let handle = MarkerHandle::new();
        self.markers.push((handle, marker));
        handle
    }

    fn remove_marker(&mut self, handle: MarkerHandle) -> bool {
        let before = self.markers.len();
        self.markers.retain(|(placed, _)| *placed != handle);
        self.markers.len() != before
    }

    fn marker_count(&self) -> usize {
        self.markers.len()
    }
}

/// Provider creating [`RecordingWidget`]s and counting constructions.
#[derive(Debug, Default)]
pub struct RecordingProvider {
    created: AtomicUsize,
}

impl RecordingProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of widgets constructed so far.
    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }
}

impl WidgetProvider for RecordingProvider {
    fn create(
        &self,
        container: &str,
        options: &MapOptions,
    ) -> Result<Box<dyn MapWidget>, WidgetError> {
        if container.trim().is_empty() {
            return Err(WidgetError::MissingContainer(container.to_string()));
        }
        self.created.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(RecordingWidget::new(container, options)))
    }
}

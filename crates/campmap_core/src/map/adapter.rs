//! Map adapter binding catalog records to an external widget.
//!
//! # Responsibility
//! - Create one widget per adapter once the widget capability is ready.
//! - Keep exactly one marker per visible location on that widget.
//! - Translate marker clicks into record identifiers.
//!
//! # Invariants
//! - The widget is created at most once per mount and reused across
//!   location and region changes.
//! - Every previously placed marker is removed before new ones are placed.
//! - The adapter exclusively owns its widget and markers; unmount (or drop)
//!   releases both.
//! - Load outcomes are applied only while the adapter waits in `Loading`.

use crate::config::MapConfig;
use crate::map::geolocation::{GeolocationError, Geolocator};
use crate::map::loader::{CapabilityState, LoadStatus, ScriptInjector, WidgetLoader};
use crate::map::viewport::{viewport_for, Viewport, DETAIL_ZOOM, FALLBACK_ZOOM, LOCATE_ZOOM};
use crate::map::widget::{
    MapOptions, MapType, MapWidget, MarkerHandle, MarkerOptions, WidgetProvider,
};
use crate::model::campground::{CampgroundId, CampgroundRecord, LatLng};
use crate::model::taxonomy::{CampgroundKind, Region, Selector};
use log::{debug, error, info};
use std::sync::Arc;

/// Marker-relevant projection of a campground record.
#[derive(Debug, Clone, PartialEq)]
pub struct MapLocation {
    pub id: CampgroundId,
    pub name: String,
    pub position: LatLng,
    pub region: Region,
    pub kind: CampgroundKind,
}

impl From<&CampgroundRecord> for MapLocation {
    fn from(record: &CampgroundRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            position: record.position(),
            region: record.region,
            kind: record.kind,
        }
    }
}

/// Which page the map belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
enum MapMode {
    /// Listing map: region viewports, terrain layer.
    Overview,
    /// Detail map: fixed on one campground, hybrid layer.
    Focused(Viewport),
}

struct PlacedMarker {
    handle: MarkerHandle,
    location_id: CampgroundId,
}

type MarkerClickHandler = Box<dyn FnMut(&str)>;

/// Owner of one widget instance and its markers.
pub struct MapAdapter {
    container: String,
    provider: Arc<dyn WidgetProvider>,
    mode: MapMode,
    region: Selector<Region>,
    locations: Vec<MapLocation>,
    widget: Option<Box<dyn MapWidget>>,
    placed: Vec<PlacedMarker>,
    capability: CapabilityState,
    on_marker_click: Option<MarkerClickHandler>,
}

impl MapAdapter {
    /// Listing map over `locations`, framed by the `region` viewport.
    pub fn overview(
        container: impl Into<String>,
        provider: Arc<dyn WidgetProvider>,
        locations: Vec<MapLocation>,
        region: Selector<Region>,
    ) -> Self {
        Self::with_mode(container, provider, MapMode::Overview, locations, region)
    }

    /// Detail map centered on one campground.
    pub fn focused(
        container: impl Into<String>,
        provider: Arc<dyn WidgetProvider>,
        record: &CampgroundRecord,
    ) -> Self {
        let viewport = Viewport {
            center: record.position(),
            zoom: DETAIL_ZOOM,
        };
        Self::with_mode(
            container,
            provider,
            MapMode::Focused(viewport),
            vec![MapLocation::from(record)],
            Selector::All,
        )
    }

    fn with_mode(
        container: impl Into<String>,
        provider: Arc<dyn WidgetProvider>,
        mode: MapMode,
        locations: Vec<MapLocation>,
        region: Selector<Region>,
    ) -> Self {
        Self {
            container: container.into(),
            provider,
            mode,
            region,
            locations,
            widget: None,
            placed: Vec::new(),
            capability: CapabilityState::Unrequested,
            on_marker_click: None,
        }
    }

    /// Sets the callback invoked with the record id of a clicked marker.
    pub fn on_marker_click(mut self, handler: impl FnMut(&str) + 'static) -> Self {
        self.on_marker_click = Some(Box::new(handler));
        self
    }

    /// Requests the widget and initializes immediately when it is ready.
    ///
    /// When the widget is still loading, the host must forward the settled
    /// outcome to [`MapAdapter::on_widget_settled`].
    pub fn mount(
        &mut self,
        loader: &WidgetLoader,
        injector: &dyn ScriptInjector,
        config: &MapConfig,
    ) -> &CapabilityState {
        match loader.ensure_loaded(injector, config) {
            CapabilityState::Ready => self.initialize(),
            other => {
                debug!(
                    "event=map_mount module=map status=ok container={} capability={:?}",
                    self.container, other
                );
                self.capability = other;
            }
        }
        &self.capability
    }

    /// Applies a settled widget load reported by the loader.
    ///
    /// Ignored unless this adapter is mounted and still waiting for the load;
    /// late notifications after unmount or after settling change nothing.
    pub fn on_widget_settled(&mut self, status: &LoadStatus) -> &CapabilityState {
        if self.capability != CapabilityState::Loading {
            debug!(
                "event=map_settle module=map status=ok container={} ignored=true capability={:?}",
                self.container, self.capability
            );
            return &self.capability;
        }
        match status {
            LoadStatus::Ready => self.initialize(),
            LoadStatus::Failed(reason) => {
                self.capability = CapabilityState::Unavailable(reason.clone());
            }
        }
        &self.capability
    }

    fn initialize(&mut self) {
        if self.widget.is_none() {
            let viewport = self.viewport();
            let options = MapOptions {
                center: viewport.center,
                zoom: viewport.zoom,
                map_type: match self.mode {
                    MapMode::Overview => MapType::Terrain,
                    MapMode::Focused(_) => MapType::Hybrid,
                },
            };
            match self.provider.create(&self.container, &options) {
                Ok(widget) => self.widget = Some(widget),
                Err(err) => {
                    error!(
                        "event=map_init module=map status=error container={} reason={}",
                        self.container, err
                    );
                    self.capability = CapabilityState::Unavailable(err.to_string());
                    return;
                }
            }
            info!(
                "event=map_init module=map status=ok container={} zoom={}",
                self.container, viewport.zoom
            );
        }
        self.capability = CapabilityState::Ready;
        self.replace_markers();
    }

    /// Replaces the location set and redraws markers on the same widget.
    pub fn set_locations(&mut self, locations: Vec<MapLocation>) {
        self.locations = locations;
        self.replace_markers();
    }

    /// Switches the active region: recenters, rezooms and redraws markers.
    ///
    /// Detail maps keep their fixed viewport and single marker.
    pub fn set_region(&mut self, region: Selector<Region>) {
        self.region = region;
        if let (MapMode::Overview, Some(widget)) = (self.mode, self.widget.as_mut()) {
            let viewport = viewport_for(region);
            widget.set_center(viewport.center);
            widget.set_zoom(viewport.zoom);
        }
        self.replace_markers();
    }

    pub fn zoom_in(&mut self) {
        if let Some(widget) = self.widget.as_mut() {
            let zoom = widget.zoom().unwrap_or(FALLBACK_ZOOM);
            widget.set_zoom(zoom.saturating_add(1));
        }
    }

    pub fn zoom_out(&mut self) {
        if let Some(widget) = self.widget.as_mut() {
            let zoom = widget.zoom().unwrap_or(FALLBACK_ZOOM);
            widget.set_zoom(zoom.saturating_sub(1));
        }
    }

    /// Centers on the visitor's position when a geolocator is available.
    ///
    /// Failures are logged and leave the map unchanged.
    pub fn locate_me(&mut self, geolocator: Option<&dyn Geolocator>) {
        let position = match geolocator {
            Some(geolocator) => geolocator.current_position(),
            None => Err(GeolocationError::Unsupported),
        };
        self.apply_position(position);
    }

    /// Applies an asynchronously delivered geolocation result.
    pub fn apply_position(&mut self, position: Result<LatLng, GeolocationError>) {
        match position {
            Ok(center) => {
                if let Some(widget) = self.widget.as_mut() {
                    widget.set_center(center);
                    widget.set_zoom(LOCATE_ZOOM);
                }
            }
            Err(err) => error!("event=map_locate module=map status=error reason={err}"),
        }
    }

    /// Dispatches a click on `handle`; returns the record id it belongs to.
    pub fn click_marker(&mut self, handle: MarkerHandle) -> Option<CampgroundId> {
        let id = self
            .placed
            .iter()
            .find(|marker| marker.handle == handle)
            .map(|marker| marker.location_id.clone())?;
        if let Some(handler) = self.on_marker_click.as_mut() {
            handler(&id);
        }
        Some(id)
    }

    /// Releases markers and the widget.
    pub fn unmount(&mut self) {
        self.clear_markers();
        if self.widget.take().is_some() {
            debug!(
                "event=map_unmount module=map status=ok container={}",
                self.container
            );
        }
        self.capability = CapabilityState::Unrequested;
    }

    pub fn capability(&self) -> &CapabilityState {
        &self.capability
    }

    pub fn region(&self) -> Selector<Region> {
        self.region
    }

    pub fn widget(&self) -> Option<&dyn MapWidget> {
        self.widget.as_deref()
    }

    pub fn marker_count(&self) -> usize {
        self.placed.len()
    }

    /// Handles of placed markers, in placement order.
    pub fn marker_handles(&self) -> Vec<MarkerHandle> {
        self.placed.iter().map(|marker| marker.handle).collect()
    }

    /// Record ids of placed markers, in placement order.
    pub fn marker_ids(&self) -> Vec<&str> {
        self.placed
            .iter()
            .map(|marker| marker.location_id.as_str())
            .collect()
    }

    fn viewport(&self) -> Viewport {
        match self.mode {
            MapMode::Overview => viewport_for(self.region),
            MapMode::Focused(viewport) => viewport,
        }
    }

    fn clear_markers(&mut self) {
        let placed = std::mem::take(&mut self.placed);
        if let Some(widget) = self.widget.as_mut() {
            for marker in placed {
                widget.remove_marker(marker.handle);
            }
        }
    }

    fn replace_markers(&mut self) {
        self.clear_markers();
        let Some(widget) = self.widget.as_mut() else {
            return;
        };

        let overview = matches!(self.mode, MapMode::Overview);
        for location in &self.locations {
            if overview && !self.region.accepts(location.region) {
                continue;
            }
            let handle = widget.add_marker(MarkerOptions {
                position: location.position,
                title: location.name.clone(),
                icon: Some(location.kind.marker_icon()),
            });
            self.placed.push(PlacedMarker {
                handle,
                location_id: location.id.clone(),
            });
        }
        debug!(
            "event=map_markers module=map status=ok container={} region={} markers={}",
            self.container,
            self.region,
            self.placed.len()
        );
    }
}

impl Drop for MapAdapter {
    fn drop(&mut self) {
        self.clear_markers();
    }
}

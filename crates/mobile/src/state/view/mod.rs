use std::sync::Arc;

use ecoroute_core::annotation::{Annotation, annotations_for};
use ecoroute_core::providers::default_sources;
use ecoroute_core::session::MapSession;
use ecoroute_core::viewport::{Region, default_region};
use ecoroute_stops::models::types::{Stop, StopCategory};
use ecoroute_stops::spatial::StopIndex;
use geo::Point;
use tokio::runtime::Runtime;
use tokio::sync::{Mutex, watch};

#[derive(Debug, thiserror::Error, uniffi::Error)]
#[uniffi(flat_error)]
pub enum MapError {
    #[error("{0}")]
    Runtime(String),
}

/// Category tag the shell uses to pick a marker style.
#[derive(uniffi::Enum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnnotationCategory {
    Bus,
    Tram,
    Train,
    Bike,
    Unknown,
}

impl From<StopCategory> for AnnotationCategory {
    fn from(category: StopCategory) -> Self {
        match category {
            StopCategory::Bus => Self::Bus,
            StopCategory::Tram => Self::Tram,
            StopCategory::Train => Self::Train,
            StopCategory::Bike => Self::Bike,
            StopCategory::Unknown => Self::Unknown,
        }
    }
}

/// One marker for the native map widget.
#[derive(uniffi::Record, Clone, Debug)]
pub struct AnnotationData {
    pub id: Option<String>,
    pub label: String,
    pub latitude: f64,
    pub longitude: f64,
    pub category: AnnotationCategory,
}

impl From<Annotation> for AnnotationData {
    fn from(annotation: Annotation) -> Self {
        Self {
            id: annotation.id.map(|id| id.to_string()),
            label: annotation.label.to_string(),
            latitude: annotation.position.y(),
            longitude: annotation.position.x(),
            category: annotation.category.into(),
        }
    }
}

/// A camera rectangle for the native map widget.
#[derive(uniffi::Record, Clone, Copy, Debug)]
pub struct RegionData {
    pub center_latitude: f64,
    pub center_longitude: f64,
    pub lat_span_deg: f64,
    pub lon_span_deg: f64,
}

impl From<Region> for RegionData {
    fn from(region: Region) -> Self {
        Self {
            center_latitude: region.center.y(),
            center_longitude: region.center.x(),
            lat_span_deg: region.lat_span_deg,
            lon_span_deg: region.lon_span_deg,
        }
    }
}

#[derive(uniffi::Object)]
pub struct ViewState {
    #[allow(dead_code)] // Kept alive so session tasks keep running
    runtime: Runtime,
    session: MapSession,
    stops_rx: Mutex<watch::Receiver<Vec<Stop>>>,
    camera_rx: Mutex<watch::Receiver<Option<Region>>>,
    location_rx: Mutex<watch::Receiver<u64>>,
}

#[uniffi::export]
impl ViewState {
    #[uniffi::constructor]
    pub fn new() -> Result<Arc<Self>, MapError> {
        let runtime = Runtime::new().map_err(|e| MapError::Runtime(e.to_string()))?;
        let session = runtime.block_on(async { MapSession::start(default_sources()) });
        tracing::info!("map session started");

        let stops_rx = Mutex::new(session.subscribe_stops());
        let camera_rx = Mutex::new(session.subscribe_camera());
        let location_rx = Mutex::new(session.subscribe_location_requests());

        Ok(Arc::new(Self {
            runtime,
            session,
            stops_rx,
            camera_rx,
            location_rx,
        }))
    }

    /// Camera applied at startup, before any location is known.
    pub fn initial_region(&self) -> RegionData {
        default_region().into()
    }

    /// Report a map camera change. Spans are in degrees.
    pub fn viewport_changed(
        &self,
        center_latitude: f64,
        center_longitude: f64,
        lat_span_deg: f64,
        lon_span_deg: f64,
    ) {
        let region = Region {
            center: Point::new(center_longitude, center_latitude),
            lat_span_deg,
            lon_span_deg,
        };
        self.session.viewport_changed(region.viewport());
    }

    /// The user tapped the recenter button.
    pub fn request_recenter(&self) {
        self.session.request_recenter();
    }

    /// A fix arrived from the platform location service.
    pub fn location_update(&self, latitude: f64, longitude: f64) {
        self.session.location_update(Point::new(longitude, latitude));
    }

    /// Current annotation set.
    pub fn annotations(&self) -> Vec<AnnotationData> {
        annotations_for(&self.session.stops())
            .into_iter()
            .map(AnnotationData::from)
            .collect()
    }

    /// Wait for the next annotation publication and return the full set.
    ///
    /// The set is re-issued wholesale on every provider update; the shell
    /// replaces its annotations rather than diffing.
    pub async fn wait_for_annotations(&self) -> Vec<AnnotationData> {
        let stops = {
            let mut rx = self.stops_rx.lock().await;
            if rx.changed().await.is_err() {
                return Vec::new();
            }
            rx.borrow_and_update().clone()
        };
        annotations_for(&stops)
            .into_iter()
            .map(AnnotationData::from)
            .collect()
    }

    /// Wait for the next recenter camera region to apply.
    pub async fn wait_for_camera(&self) -> Option<RegionData> {
        let mut rx = self.camera_rx.lock().await;
        loop {
            if rx.changed().await.is_err() {
                return None;
            }
            if let Some(region) = *rx.borrow_and_update() {
                return Some(region.into());
            }
        }
    }

    /// Resolves when the core wants a one-shot platform location fix.
    ///
    /// Returns `false` if the session has ended.
    pub async fn wait_for_location_request(&self) -> bool {
        let mut rx = self.location_rx.lock().await;
        rx.changed().await.is_ok()
    }

    /// The stop nearest to a tap point, if any lies within `max_distance_m`.
    pub fn annotation_at(
        &self,
        latitude: f64,
        longitude: f64,
        max_distance_m: f64,
    ) -> Option<AnnotationData> {
        let stops = self.session.stops();
        let index = StopIndex::build(&stops);
        index
            .nearest_within(Point::new(longitude, latitude), max_distance_m)
            .map(|stop| AnnotationData {
                id: stop.id.clone().map(|id| id.to_string()),
                label: stop.name.to_string(),
                latitude: stop.latitude(),
                longitude: stop.longitude(),
                category: stop.category.into(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecoroute_stops::identifiers::StopIdentifier;

    #[test]
    fn test_annotation_data_from_annotation() {
        let annotation = Annotation {
            id: Some(StopIdentifier::new("8501181")),
            label: "Lausanne-Flon".into(),
            position: Point::new(6.6306, 46.5205),
            category: StopCategory::Train,
        };

        let data = AnnotationData::from(annotation);
        assert_eq!(data.id.as_deref(), Some("8501181"));
        assert_eq!(data.label, "Lausanne-Flon");
        assert_eq!(data.latitude, 46.5205);
        assert_eq!(data.longitude, 6.6306);
        assert_eq!(data.category, AnnotationCategory::Train);
    }

    #[test]
    fn test_region_data_from_region() {
        let data = RegionData::from(default_region());
        assert_eq!(data.center_latitude, 46.5247);
        assert_eq!(data.center_longitude, 6.5690);
        assert_eq!(data.lat_span_deg, 0.02);
        assert_eq!(data.lon_span_deg, 0.02);
    }
}

//! The map session reducer.
//!
//! All mutable view state (stop lists, fetch policy, recenter flow, last
//! known location) lives in one task fed by a message channel. The shell and
//! the fetch tasks only ever send events in and watch outputs, so there is a
//! single logical thread of mutation and results apply in arrival order.

use std::sync::Arc;

use ecoroute_stops::identifiers::ProviderIdentifier;
use ecoroute_stops::models::types::{RawStop, Stop, StopError};
use ecoroute_stops::provider::{RefreshMode, StopSource};
use geo::Point;
use tokio::sync::{mpsc, watch};
use tracing::{debug, warn};

use crate::store::StopStore;
use crate::viewport::{
    FetchDecision, FetchPolicy, RECENTER_AWAITED_SPAN_DEG, RECENTER_SPAN_DEG, Region, Viewport,
    default_region,
};

/// Recenter flow states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RecenterState {
    Idle,
    AwaitingLocation,
}

enum Event {
    ViewportChanged(Viewport),
    ProviderStops(ProviderIdentifier, Result<Vec<RawStop>, StopError>),
    RecenterRequested,
    LocationUpdate(Point),
}

/// Handle to a running map session.
///
/// Cheap to clone. The reducer task ends once every handle is dropped.
/// [`MapSession::start`] must be called from within a Tokio runtime.
#[derive(Clone)]
pub struct MapSession {
    tx: mpsc::UnboundedSender<Event>,
    stops_rx: watch::Receiver<Vec<Stop>>,
    camera_rx: watch::Receiver<Option<Region>>,
    location_requests_rx: watch::Receiver<u64>,
}

impl MapSession {
    /// Start a session over the given sources.
    ///
    /// `Once` sources are fetched immediately; `OnViewportChange` sources
    /// wait for the first qualifying viewport event.
    pub fn start(sources: Vec<Arc<dyn StopSource>>) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let store = StopStore::new();
        let stops_rx = store.subscribe();
        let (camera_tx, camera_rx) = watch::channel(None);
        let (location_tx, location_requests_rx) = watch::channel(0u64);

        let mut reducer = Reducer {
            store,
            policy: FetchPolicy::default(),
            recenter: RecenterState::Idle,
            last_location: None,
            sources,
            events: tx.downgrade(),
            camera_tx,
            location_tx,
        };

        tokio::spawn(async move {
            reducer.fetch_startup_sources();
            while let Some(event) = rx.recv().await {
                reducer.apply(event);
            }
        });

        Self {
            tx,
            stops_rx,
            camera_rx,
            location_requests_rx,
        }
    }

    /// Report a map viewport change.
    pub fn viewport_changed(&self, viewport: Viewport) {
        let _ = self.tx.send(Event::ViewportChanged(viewport));
    }

    /// The user asked to recenter the map on their location.
    pub fn request_recenter(&self) {
        let _ = self.tx.send(Event::RecenterRequested);
    }

    /// A location fix arrived from the platform location service.
    pub fn location_update(&self, location: Point) {
        let _ = self.tx.send(Event::LocationUpdate(location));
    }

    /// Latest merged stop list.
    pub fn stops(&self) -> Vec<Stop> {
        self.stops_rx.borrow().clone()
    }

    /// Merged-list publications, one per provider update.
    pub fn subscribe_stops(&self) -> watch::Receiver<Vec<Stop>> {
        self.stops_rx.clone()
    }

    /// Camera regions the shell should apply (recenter results).
    pub fn subscribe_camera(&self) -> watch::Receiver<Option<Region>> {
        self.camera_rx.clone()
    }

    /// Bumped whenever the core needs a one-shot platform location fix.
    pub fn subscribe_location_requests(&self) -> watch::Receiver<u64> {
        self.location_requests_rx.clone()
    }
}

struct Reducer {
    store: StopStore,
    policy: FetchPolicy,
    recenter: RecenterState,
    last_location: Option<Point>,
    sources: Vec<Arc<dyn StopSource>>,
    // Weak so in-flight fetches never keep a dead session's loop alive
    events: mpsc::WeakUnboundedSender<Event>,
    camera_tx: watch::Sender<Option<Region>>,
    location_tx: watch::Sender<u64>,
}

impl Reducer {
    fn fetch_startup_sources(&self) {
        for source in self.sources.iter() {
            if source.refresh() == RefreshMode::Once {
                self.spawn_fetch(Arc::clone(source), default_region().center);
            }
        }
    }

    fn apply(&mut self, event: Event) {
        match event {
            Event::ViewportChanged(viewport) => {
                if let FetchDecision::Fetch { center } = self.policy.decide(&viewport) {
                    for source in self.sources.iter() {
                        if source.refresh() == RefreshMode::OnViewportChange {
                            self.spawn_fetch(Arc::clone(source), center);
                        }
                    }
                } else {
                    debug!(
                        radius_m = viewport.visible_radius_m,
                        "viewport too wide, skipping fetch"
                    );
                }
            }
            Event::ProviderStops(provider, Ok(stops)) => {
                debug!(%provider, count = stops.len(), "provider stops updated");
                self.store.update(provider, stops);
            }
            Event::ProviderStops(provider, Err(error)) => {
                // Stale-but-present beats empty: keep the previous list
                warn!(%provider, %error, "stop fetch failed");
            }
            Event::RecenterRequested => match self.last_location {
                Some(location) => {
                    self.camera_tx
                        .send_replace(Some(Region::centered_on(location, RECENTER_SPAN_DEG)));
                    self.recenter = RecenterState::Idle;
                }
                None => {
                    self.location_tx.send_modify(|n| *n += 1);
                    self.recenter = RecenterState::AwaitingLocation;
                }
            },
            Event::LocationUpdate(location) => {
                self.last_location = Some(location);
                if self.recenter == RecenterState::AwaitingLocation {
                    self.camera_tx.send_replace(Some(Region::centered_on(
                        location,
                        RECENTER_AWAITED_SPAN_DEG,
                    )));
                    self.recenter = RecenterState::Idle;
                }
            }
        }
    }

    /// Fire and forget: no in-flight dedup and no cancellation. A second
    /// qualifying viewport event while a fetch is outstanding issues a second
    /// concurrent fetch, and responses apply in whatever order they arrive.
    fn spawn_fetch(&self, source: Arc<dyn StopSource>, center: Point) {
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = source.fetch_near(center).await;
            if let Some(events) = events.upgrade() {
                let _ = events.send(Event::ProviderStops(source.id(), result));
            }
        });
    }
}

//! Viewport tracking and the fetch-trigger policy.

use ecoroute_stops::spatial::haversine_distance;
use geo::Point;

/// Maximum visible radius at which a re-fetch is worthwhile, in meters.
///
/// Past this the user is zoomed out far enough that individual stops stop
/// being distinguishable, so network calls are skipped and whatever is on
/// screen stays.
pub const FETCH_RADIUS_THRESHOLD_M: f64 = 1000.0;

/// Angular span of the startup camera.
pub const DEFAULT_SPAN_DEG: f64 = 0.02;

/// Span used when recentering onto an already-known user location.
pub const RECENTER_SPAN_DEG: f64 = 0.01;

/// Span used when recentering after waiting for a location fix.
pub const RECENTER_AWAITED_SPAN_DEG: f64 = 0.02;

/// Startup camera: Lausanne city center.
pub fn default_region() -> Region {
    Region::centered_on(Point::new(6.5690, 46.5247), DEFAULT_SPAN_DEG)
}

/// The camera rectangle the map shell applies: center plus angular spans.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Region {
    pub center: Point,
    pub lat_span_deg: f64,
    pub lon_span_deg: f64,
}

impl Region {
    pub fn centered_on(center: Point, span_deg: f64) -> Self {
        Self {
            center,
            lat_span_deg: span_deg,
            lon_span_deg: span_deg,
        }
    }

    /// Effective visible radius: great-circle distance from the region center
    /// to the vertical midpoint of the top edge of the visible area.
    pub fn visible_radius_m(&self) -> f64 {
        let top_edge_mid = Point::new(self.center.x(), self.center.y() + self.lat_span_deg / 2.0);
        haversine_distance(self.center, top_edge_mid)
    }

    pub fn viewport(&self) -> Viewport {
        Viewport {
            center: self.center,
            visible_radius_m: self.visible_radius_m(),
        }
    }
}

/// The currently visible map area, reduced to what the fetch policy needs.
///
/// Derived from the camera on every map movement, never persisted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub center: Point,
    pub visible_radius_m: f64,
}

/// Outcome of evaluating a viewport change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FetchDecision {
    /// Re-fetch viewport-reactive sources around this center.
    Fetch { center: Point },
    /// Viewport too wide; keep whatever is displayed.
    Skip,
}

/// Decides whether a viewport change warrants re-fetching stops.
///
/// The rule is radius-only: every change with a visible radius at or under
/// the threshold re-fetches, however small the pan was.
// TODO: continuous panning re-queries on every region change; a minimum
// distance from `last_fetched_center` would cut the redundant calls.
pub struct FetchPolicy {
    threshold_m: f64,
    last_fetched_center: Option<Point>,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self::new(FETCH_RADIUS_THRESHOLD_M)
    }
}

impl FetchPolicy {
    pub fn new(threshold_m: f64) -> Self {
        Self {
            threshold_m,
            last_fetched_center: None,
        }
    }

    pub fn decide(&mut self, viewport: &Viewport) -> FetchDecision {
        if viewport.visible_radius_m <= self.threshold_m {
            self.last_fetched_center = Some(viewport.center);
            FetchDecision::Fetch {
                center: viewport.center,
            }
        } else {
            FetchDecision::Skip
        }
    }

    /// Center of the most recent accepted fetch, if any.
    pub fn last_fetched_center(&self) -> Option<Point> {
        self.last_fetched_center
    }
}

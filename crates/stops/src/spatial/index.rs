//! R-tree index over a rendered stop list.
//!
//! Used to resolve map taps to stops without asking the map widget.
//!
//! ## Two-Stage Filtering
//!
//! Queries use a two-stage filtering approach:
//! 1. **R-tree filter**: Uses Euclidean distance in degrees for fast
//!    approximate filtering
//! 2. **Haversine filter**: Applies accurate geodesic distance on filtered
//!    results
//!
//! Euclidean distance on geographic coordinates is only a coarse filter, so
//! every candidate gets a precise Haversine check before it is returned.

use geo::Point;
use rstar::{PointDistance, RTree, RTreeObject, AABB};

use crate::models::types::Stop;
use crate::spatial::queries::{haversine_distance, meters_to_degrees_approx};

/// R-tree node wrapping a stop with its position.
#[derive(Clone)]
pub struct StopNode {
    pub stop: Stop,
    point: [f64; 2],
}

impl StopNode {
    pub fn new(stop: Stop) -> Self {
        let point = [stop.location.x(), stop.location.y()];
        Self { stop, point }
    }
}

impl RTreeObject for StopNode {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for StopNode {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

/// Spatial index over a merged stop list.
///
/// Rebuilt from the current list on demand; the lists involved are a single
/// viewport's worth of stops, so bulk loading is cheap.
pub struct StopIndex {
    tree: RTree<StopNode>,
}

impl StopIndex {
    pub fn build(stops: &[Stop]) -> Self {
        let nodes = stops.iter().cloned().map(StopNode::new).collect();
        Self {
            tree: RTree::bulk_load(nodes),
        }
    }

    /// The stop closest to `point`, if any lies within `max_distance_m`.
    pub fn nearest_within(&self, point: Point, max_distance_m: f64) -> Option<&Stop> {
        self.tree
            .nearest_neighbor(&[point.x(), point.y()])
            .map(|node| &node.stop)
            .filter(|stop| haversine_distance(point, stop.location) <= max_distance_m)
    }

    /// All stops within `radius_m` of `point`.
    pub fn stops_near(&self, point: Point, radius_m: f64) -> Vec<&Stop> {
        // Doubled degree radius for the coarse filter; the equator-based
        // conversion underestimates the degree span away from the equator
        let radius_deg = 2.0 * meters_to_degrees_approx(radius_m);

        self.tree
            .locate_within_distance([point.x(), point.y()], radius_deg * radius_deg)
            .filter(|node| haversine_distance(point, node.stop.location) <= radius_m)
            .map(|node| &node.stop)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::types::StopCategory;

    fn stop(name: &str, latitude: f64, longitude: f64) -> Stop {
        Stop {
            id: None,
            name: name.into(),
            location: Point::new(longitude, latitude),
            category: StopCategory::Bus,
        }
    }

    #[test]
    fn test_nearest_within_finds_closest() {
        let stops = vec![
            stop("Bel-Air", 46.5218, 6.6287),
            stop("St-François", 46.5197, 6.6333),
        ];
        let index = StopIndex::build(&stops);

        // A tap right next to Bel-Air
        let tap = Point::new(6.6288, 46.5219);
        let hit = index.nearest_within(tap, 50.0).unwrap();
        assert_eq!(&*hit.name, "Bel-Air");
    }

    #[test]
    fn test_nearest_within_respects_max_distance() {
        let stops = vec![stop("Bel-Air", 46.5218, 6.6287)];
        let index = StopIndex::build(&stops);

        // Roughly 500m away
        let tap = Point::new(6.6287, 46.5263);
        assert!(index.nearest_within(tap, 50.0).is_none());
        assert!(index.nearest_within(tap, 1000.0).is_some());
    }

    #[test]
    fn test_stops_near() {
        let stops = vec![
            stop("Bel-Air", 46.5218, 6.6287),
            stop("St-François", 46.5197, 6.6333),
            stop("Ouchy", 46.5065, 6.6264), // ~1.7km south
        ];
        let index = StopIndex::build(&stops);

        let center = Point::new(6.6300, 46.5210);
        let near = index.stops_near(center, 600.0);
        assert_eq!(near.len(), 2);
        assert!(near.iter().all(|s| &*s.name != "Ouchy"));
    }

    #[test]
    fn test_empty_index() {
        let index = StopIndex::build(&[]);
        assert!(index
            .nearest_within(Point::new(6.6287, 46.5218), 1000.0)
            .is_none());
    }
}

//! Map annotations derived from the merged stop list.

use std::sync::Arc;

use ecoroute_stops::identifiers::StopIdentifier;
use ecoroute_stops::models::types::{Stop, StopCategory};
use geo::Point;

/// One renderable map marker.
///
/// The category tag is carried through for the presenter's styling; the core
/// attaches no meaning to it beyond parsing.
#[derive(Clone, Debug, PartialEq)]
pub struct Annotation {
    pub id: Option<StopIdentifier>,
    pub label: Arc<str>,
    pub position: Point,
    pub category: StopCategory,
}

/// Map a merged stop list to the annotation set the presenter displays.
pub fn annotations_for(stops: &[Stop]) -> Vec<Annotation> {
    stops
        .iter()
        .map(|stop| Annotation {
            id: stop.id.clone(),
            label: Arc::clone(&stop.name),
            position: stop.location,
            category: stop.category,
        })
        .collect()
}

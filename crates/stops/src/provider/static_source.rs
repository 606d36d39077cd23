//! In-memory stop source backed by canned records.

use std::future::Future;
use std::pin::Pin;

use geo::Point;

use crate::identifiers::ProviderIdentifier;
use crate::models::types::{RawStop, Result};
use crate::provider::{RefreshMode, StopSource};

/// A [`StopSource`] serving a fixed record set regardless of location.
///
/// Used in tests and for bundled offline data.
pub struct StaticStopSource {
    id: ProviderIdentifier,
    refresh: RefreshMode,
    stops: Vec<RawStop>,
}

impl StaticStopSource {
    pub fn new(
        id: impl Into<ProviderIdentifier>,
        refresh: RefreshMode,
        stops: Vec<RawStop>,
    ) -> Self {
        Self {
            id: id.into(),
            refresh,
            stops,
        }
    }
}

impl StopSource for StaticStopSource {
    fn id(&self) -> ProviderIdentifier {
        self.id.clone()
    }

    fn refresh(&self) -> RefreshMode {
        self.refresh
    }

    fn fetch_near<'a>(
        &'a self,
        _center: Point,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RawStop>>> + Send + 'a>> {
        let stops = self.stops.clone();
        Box::pin(async move { Ok(stops) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::types::StopCategory;

    #[test]
    fn test_static_source_metadata() {
        let source = StaticStopSource::new(
            "bike",
            RefreshMode::Once,
            vec![RawStop {
                id: None,
                name: "Place de l'Europe".to_string(),
                latitude: Some(46.5213),
                longitude: Some(6.6298),
                category: StopCategory::Bike,
            }],
        );

        assert_eq!(source.id(), ProviderIdentifier::new("bike"));
        assert_eq!(source.refresh(), RefreshMode::Once);
    }
}

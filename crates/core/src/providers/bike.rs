//! Bike-share docks, fetched once at session start.

use std::future::Future;
use std::pin::Pin;

use ecoroute_stops::identifiers::ProviderIdentifier;
use ecoroute_stops::models::types::{RawStop, Result, StopCategory, StopError};
use ecoroute_stops::provider::{RefreshMode, StopSource};
use geo::Point;
use reqwest::{Client, Url};
use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "https://api.publibike.ch/v1/public/stations";

/// Bike-share docks for the whole network.
///
/// Docks do not move, so this source is fetched a single time when the
/// session starts and never again on viewport changes.
pub struct BikeShareSource {
    client: Client,
    base_url: String,
}

impl BikeShareSource {
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    async fn fetch(&self) -> Result<Vec<RawStop>> {
        let url = Url::parse(&self.base_url).map_err(|e| StopError::MalformedUrl(e.to_string()))?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| StopError::Network(e.to_string()))?;

        let body: Vec<WireBikeStation> = response
            .json()
            .await
            .map_err(|e| StopError::Decode(e.to_string()))?;

        Ok(body.into_iter().map(WireBikeStation::into_raw).collect())
    }
}

impl StopSource for BikeShareSource {
    fn id(&self) -> ProviderIdentifier {
        ProviderIdentifier::new("bike")
    }

    fn refresh(&self) -> RefreshMode {
        RefreshMode::Once
    }

    fn fetch_near<'a>(
        &'a self,
        _center: Point,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RawStop>>> + Send + 'a>> {
        Box::pin(self.fetch())
    }
}

#[derive(Debug, Deserialize)]
struct WireBikeStation {
    name: String,
    latitude: f64,
    longitude: f64,
}

impl WireBikeStation {
    fn into_raw(self) -> RawStop {
        RawStop {
            id: None,
            name: self.name,
            latitude: Some(self.latitude),
            longitude: Some(self.longitude),
            category: StopCategory::Bike,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_bike_stations() {
        let body = r#"[
            { "name": "Place de l'Europe", "latitude": 46.5213, "longitude": 6.6298 },
            { "name": "Ouchy", "latitude": 46.5065, "longitude": 6.6264 }
        ]"#;

        let stations: Vec<WireBikeStation> = serde_json::from_str(body).unwrap();
        let raw: Vec<RawStop> = stations
            .into_iter()
            .map(WireBikeStation::into_raw)
            .collect();

        assert_eq!(raw.len(), 2);
        assert!(raw.iter().all(|s| s.category == StopCategory::Bike));
        assert_eq!(raw[0].latitude, Some(46.5213));

        // Coordinates are mandatory on this feed, so every record validates
        assert_eq!(raw.into_iter().filter_map(RawStop::validate).count(), 2);
    }

    #[test]
    fn test_bike_source_fetches_once() {
        let source = BikeShareSource::new(Client::new());
        assert_eq!(source.refresh(), RefreshMode::Once);
        assert_eq!(source.id(), ProviderIdentifier::new("bike"));
    }
}

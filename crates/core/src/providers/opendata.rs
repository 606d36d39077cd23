//! Swiss public-transport stations from transport.opendata.ch.

use std::future::Future;
use std::pin::Pin;

use ecoroute_stops::identifiers::ProviderIdentifier;
use ecoroute_stops::models::types::{RawStop, Result, StopCategory, StopError};
use ecoroute_stops::provider::{RefreshMode, StopSource};
use geo::Point;
use reqwest::{Client, Url};
use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "https://transport.opendata.ch/v1/locations";

/// Stations near a coordinate, re-queried on every qualifying viewport
/// change.
pub struct OpendataTransitSource {
    client: Client,
    base_url: String,
}

impl OpendataTransitSource {
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn request_url(&self, center: Point) -> Result<Url> {
        // The upstream API names latitude `x` and longitude `y`
        Url::parse_with_params(
            &self.base_url,
            &[
                ("x", center.y().to_string()),
                ("y", center.x().to_string()),
                ("type", "station".to_string()),
            ],
        )
        .map_err(|e| StopError::MalformedUrl(e.to_string()))
    }

    async fn fetch(&self, center: Point) -> Result<Vec<RawStop>> {
        let url = self.request_url(center)?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| StopError::Network(e.to_string()))?;

        let body: StationsResponse = response
            .json()
            .await
            .map_err(|e| StopError::Decode(e.to_string()))?;

        Ok(body
            .stations
            .into_iter()
            .map(WireStation::into_raw)
            .collect())
    }
}

impl StopSource for OpendataTransitSource {
    fn id(&self) -> ProviderIdentifier {
        ProviderIdentifier::new("transit")
    }

    fn refresh(&self) -> RefreshMode {
        RefreshMode::OnViewportChange
    }

    fn fetch_near<'a>(
        &'a self,
        center: Point,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RawStop>>> + Send + 'a>> {
        Box::pin(self.fetch(center))
    }
}

#[derive(Debug, Deserialize)]
struct StationsResponse {
    stations: Vec<WireStation>,
}

#[derive(Debug, Deserialize)]
struct WireStation {
    id: Option<String>,
    name: String,
    coordinate: WireCoordinate,
    icon: Option<String>,
}

/// `x` is latitude and `y` longitude in this API, and either may be absent.
#[derive(Debug, Deserialize)]
struct WireCoordinate {
    x: Option<f64>,
    y: Option<f64>,
}

impl WireStation {
    fn into_raw(self) -> RawStop {
        RawStop {
            id: self.id,
            name: self.name,
            latitude: self.coordinate.x,
            longitude: self.coordinate.y,
            category: self
                .icon
                .as_deref()
                .map(StopCategory::from_icon)
                .unwrap_or(StopCategory::Unknown),
        }
    }
}

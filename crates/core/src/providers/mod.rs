//! HTTP stop providers.

pub mod bike;
pub mod opendata;

pub use bike::BikeShareSource;
pub use opendata::OpendataTransitSource;

use std::sync::Arc;

use ecoroute_stops::provider::StopSource;
use reqwest::Client;

/// The app's stock provider set, sharing one HTTP client.
pub fn default_sources() -> Vec<Arc<dyn StopSource>> {
    let client = Client::new();
    vec![
        Arc::new(OpendataTransitSource::new(client.clone())),
        Arc::new(BikeShareSource::new(client)),
    ]
}

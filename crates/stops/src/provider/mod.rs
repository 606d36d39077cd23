//! Pluggable stop providers.
//!
//! External crates implement [`StopSource`] to supply stop records; the core
//! decides when to call it and what to do with the results.

pub mod static_source;

pub use static_source::StaticStopSource;

use std::future::Future;
use std::pin::Pin;

use geo::Point;

use crate::identifiers::ProviderIdentifier;
use crate::models::types::{RawStop, Result};

/// How a source reacts to viewport movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshMode {
    /// Re-fetched on every qualifying viewport change
    OnViewportChange,
    /// Fetched once when the session starts
    Once,
}

/// Fetch stop records near a coordinate.
///
/// Results are raw: coordinate validation happens downstream, so a source
/// can hand over whatever the backend returned.
pub trait StopSource: Send + Sync {
    fn id(&self) -> ProviderIdentifier;

    fn refresh(&self) -> RefreshMode;

    fn fetch_near<'a>(
        &'a self,
        center: Point,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RawStop>>> + Send + 'a>>;
}

//! # ecoroute-stops
//!
//! Stop records and provider seams for the ecoroute map.
//!
//! ## Features
//!
//! - **Validated records**: wire data carries optional coordinates; only
//!   records with both coordinates become renderable [`Stop`]s
//! - **Pluggable providers**: implement [`StopSource`] to supply stops from
//!   any backend
//! - **Spatial queries**: R-tree hit-testing over the rendered stop list
//!
//! ## Example
//!
//! ```
//! use ecoroute_stops::prelude::*;
//! use geo::Point;
//!
//! let raw = RawStop {
//!     id: Some("8501181".to_string()),
//!     name: "Lausanne-Flon".to_string(),
//!     latitude: Some(46.5205),
//!     longitude: Some(6.6306),
//!     category: StopCategory::Train,
//! };
//!
//! // Both coordinates present, so the record is renderable
//! let stop = raw.validate().unwrap();
//!
//! // Hit-test a tap 30m away against the rendered list
//! let index = StopIndex::build(std::slice::from_ref(&stop));
//! let tap = Point::new(6.6309, 46.5207);
//! assert!(index.nearest_within(tap, 100.0).is_some());
//! ```

pub mod identifiers;
pub mod models;
pub mod provider;
pub mod spatial;

// Re-exports for convenience
pub mod prelude {
    pub use crate::identifiers::*;
    pub use crate::models::types::*;
    pub use crate::provider::{RefreshMode, StaticStopSource, StopSource};
    pub use crate::spatial::{haversine_distance, StopIndex};
}

pub use prelude::*;

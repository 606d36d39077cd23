//! Core logic behind the ecoroute map view: the viewport fetch policy, the
//! per-provider stop store, the HTTP providers, and the session reducer that
//! ties them together for the mobile shell.

pub mod annotation;
pub mod providers;
pub mod session;
pub mod store;
pub mod viewport;

// Re-export the stop domain crate
pub use ecoroute_stops as stops;

//! Stop data models and types.

pub mod types;

// Re-exports for convenience
pub use types::{RawStop, Result, Stop, StopCategory, StopError};

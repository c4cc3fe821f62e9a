//! Error handling for the keywheel key-management layer
//!
//! Errors from key managers are never swallowed or substituted with
//! defaults; they propagate to the caller of the registry operation.
//! The one deliberate exception is the verify/decrypt path, which
//! collapses all per-key failures into a single [`Error::NoMatchingKey`].

pub mod types;

// Re-export the primary error type and result
pub use types::{Error, Result};

// Implement standard Error trait when std is available
#[cfg(feature = "std")]
impl std::error::Error for Error {}

//! Bridge Core
//!
//! Error types, result alias, and telemetry shared across the bridge's crates.

pub mod error;
pub mod result;
pub mod telemetry;

// Re-exports for convenience
pub use error::{Error, ErrorContext, ErrorKind};
pub use result::Result;

/// Application-wide constants
pub mod constants {
  /// Default debounce interval for workspace file-watch events (milliseconds).
  pub const WATCH_DEBOUNCE_MS: u64 = 100;

  /// Files touched per cooperative-yield slice during the initial workspace walk.
  pub const WALK_YIELD_BATCH: usize = 100;
}

/// Prelude module for common imports
pub mod prelude {
  pub use crate::error::{Error, ErrorContext, ErrorKind};
  pub use crate::result::Result;
  pub use anyhow::Context as AnyhowContext;
  pub use tracing::{debug, error, info, instrument, trace, warn};
}

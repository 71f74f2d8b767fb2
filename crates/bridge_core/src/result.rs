//! Result type alias for bridge operations

use crate::error::Error;

/// A specialized Result type for bridge operations
pub type Result<T, E = Error> = std::result::Result<T, E>;

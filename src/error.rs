//! Error type for building a simulation
//!
//! Everything here happens before the first tick. Once an engine exists the
//! tick loop cannot fail.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    /// A settings value that would place players outside representable bounds.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// Settings or snapshot JSON could not be (de)serialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Settings file could not be read.
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    /// Browser environment is missing something the front-end needs.
    #[error("platform error: {0}")]
    Platform(String),
}

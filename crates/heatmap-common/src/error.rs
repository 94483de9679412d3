//! Error types for heatmap generation.

use thiserror::Error;

/// Result type alias using HeatmapError.
pub type HeatmapResult<T> = Result<T, HeatmapError>;

/// Primary error type for heatmap builds.
#[derive(Debug, Error)]
pub enum HeatmapError {
    #[error("Invalid configuration value for '{field}': {message}")]
    InvalidConfiguration { field: &'static str, message: String },

    /// A grid worker or the collector stopped before every pixel was reported.
    #[error("Grid coordination failed: {0}")]
    Coordination(String),
}

impl HeatmapError {
    /// Create an InvalidConfiguration error.
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            field,
            message: message.into(),
        }
    }

    /// Create a Coordination error.
    pub fn coordination(message: impl Into<String>) -> Self {
        Self::Coordination(message.into())
    }

    /// Whether the error was caused by the caller's configuration.
    pub fn is_configuration(&self) -> bool {
        matches!(self, HeatmapError::InvalidConfiguration { .. })
    }
}

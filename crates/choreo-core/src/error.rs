use thiserror::Error;

/// Errors surfaced by the choreography engine.
///
/// Empty particle pools and empty target sets are not errors; they turn the
/// affected stages into no-ops.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChoreoError {
    /// A silhouette parameter would produce degenerate geometry.
    #[error("invalid shape parameter `{field}`: {reason}")]
    InvalidShape { field: &'static str, reason: String },

    /// The external audio source could not answer a query.
    #[error("audio source unavailable: {0}")]
    AudioUnavailable(String),
}

impl ChoreoError {
    pub(crate) fn invalid_shape(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidShape {
            field,
            reason: reason.into(),
        }
    }
}

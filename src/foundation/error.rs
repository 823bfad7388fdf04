/// Result alias used across the crate.
pub type ScrollfxResult<T> = Result<T, ScrollfxError>;

#[derive(thiserror::Error, Debug)]
/// Error type for configuration, tracking, and serialization failures.
///
/// Only [`ScrollfxError::Configuration`] indicates a programming mistake. The tracker never
/// lets the other variants escape a frame: an unattached reference degrades to progress 0.
pub enum ScrollfxError {
    /// Invalid declarative config (mapping, edges, stack, spring, reveal, scene).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Reference element is not attached to the host view tree yet.
    #[error("unattached reference: {0}")]
    Unattached(String),

    /// Stale or unknown track/binding handle.
    #[error("tracking error: {0}")]
    Tracking(String),

    /// Serialization/deserialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScrollfxError {
    /// Build a [`ScrollfxError::Configuration`] error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`ScrollfxError::Unattached`] error.
    pub fn unattached(msg: impl Into<String>) -> Self {
        Self::Unattached(msg.into())
    }

    /// Build a [`ScrollfxError::Tracking`] error.
    pub fn tracking(msg: impl Into<String>) -> Self {
        Self::Tracking(msg.into())
    }

    /// Build a [`ScrollfxError::Serde`] error.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for ScrollfxError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

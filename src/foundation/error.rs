/// Convenience result type used across clipline.
pub type ClipResult<T> = Result<T, ClipError>;

/// Top-level error taxonomy used by editor APIs.
///
/// Routine invalid edits (trim nudges past a bound, reorders at the ends of the
/// clip list, adding an unprobed source) are not errors; those operations return
/// `false`/`None` and leave state untouched.
#[derive(thiserror::Error, Debug)]
pub enum ClipError {
    /// Malformed input that cannot come from a routine UI attempt.
    #[error("validation error: {0}")]
    Validation(String),

    /// Persistence read or write failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// Render request was rejected or the job stream ended in an error.
    #[error("render error: {0}")]
    Render(String),

    /// A referenced source video has no probe data yet.
    #[error("metadata error: {0}")]
    Metadata(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ClipError {
    /// Build a [`ClipError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ClipError::Storage`] value.
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Build a [`ClipError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`ClipError::Metadata`] value.
    pub fn metadata(msg: impl Into<String>) -> Self {
        Self::Metadata(msg.into())
    }

    /// Build a [`ClipError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

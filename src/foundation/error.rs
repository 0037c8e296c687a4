/// Convenience result type used across dlfx.
pub type DlfxResult<T> = Result<T, DlfxError>;

/// Error taxonomy for effect construction and descriptor handling.
///
/// Canonicalizing a filter away (for example a transparent `SrcOver` blend) is not an
/// error; factories report that as `None`.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum DlfxError {
    /// A gradient was given fewer than two stops.
    #[error("gradient error: at least 2 stops are required, got {count}")]
    TooFewStops {
        /// Number of colors supplied.
        count: usize,
    },

    /// Colors and stop offsets were supplied with different lengths.
    #[error("gradient error: {colors} colors but {offsets} stop offsets")]
    StopCountMismatch {
        /// Number of colors supplied.
        colors: usize,
        /// Number of offsets supplied.
        offsets: usize,
    },

    /// Invalid user-provided effect data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing effect descriptors.
    #[error("serialization error: {0}")]
    Serde(String),
}

impl DlfxError {
    /// Build a [`DlfxError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`DlfxError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

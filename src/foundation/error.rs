/// Convenience result type used across shadekit.
pub type ShadeResult<T> = Result<T, ShadeError>;

/// Top-level error taxonomy used by shader construction and evaluation helpers.
#[derive(thiserror::Error, Debug)]
pub enum ShadeError {
    /// Invalid construction input (buffer geometry, matrix coefficients).
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid arguments handed to an evaluation helper.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Wrapped lower-level error from dependencies (image decoding).
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ShadeError {
    /// Build a [`ShadeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ShadeError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

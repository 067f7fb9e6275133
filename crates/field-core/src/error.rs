use thiserror::Error;

/// Failures surfaced by the particle field core and its rasterizer backends.
///
/// A missing hosting element is not an error: it degrades the instance to a
/// no-op instead (see [`crate::FieldController::is_active`]).
#[derive(Debug, Error)]
pub enum FieldError {
    /// The rendering backend could not be constructed (no adapter, no device,
    /// surface creation failed, ...).
    #[error("rendering backend unavailable: {0}")]
    BackendUnavailable(String),
    /// A single frame could not be submitted.
    #[error("frame submission failed: {0}")]
    Render(String),
}

pub type FieldResult<T> = Result<T, FieldError>;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The request is missing required top-level fields.
    #[error("{error}")]
    Validation { error: String, details: Vec<String> },

    /// The proxy refused the request because the caller exhausted its window.
    #[error("Too many requests, retry in {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// The upstream model failed or returned something that is not a `ScanResult`.
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// No response was received at all.
    #[error("Network error: {0}")]
    Network(String),

    #[error("Camera permission denied")]
    CameraPermissionDenied,

    #[error("Camera unavailable: {0}")]
    CameraUnavailable(String),

    #[error("Profile storage error: {0}")]
    ProfileStorage(String),

    #[error("Internal server error")]
    InternalServerError,
}

impl CoreError {
    pub fn validation(error: impl Into<String>, details: Vec<String>) -> Self {
        Self::Validation {
            error: error.into(),
            details,
        }
    }

    /// Camera failures never reach the network layer and keep the user on the
    /// capture screen instead of bouncing back home.
    pub fn is_camera_error(&self) -> bool {
        matches!(
            self,
            CoreError::CameraPermissionDenied | CoreError::CameraUnavailable(_)
        )
    }
}

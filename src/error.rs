//! Error types for the backend boundary.
//!
//! Only backend-side failures are represented as errors. Programmer errors
//! inside the pipeline itself (capacity overflow, unregistered assets,
//! pipeline/layout mismatches) abort via assertions: the frame structures
//! are sized once for worst-case content, so hitting a limit is a sizing
//! bug and a broken frame cannot be partially rendered.

use thiserror::Error;

/// Errors surfaced by a [`RenderBackend`](crate::backend::RenderBackend).
///
/// These are fatal for the frame; the pipeline never retries or degrades.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// Failed to initialize the backend.
    #[error("backend initialization failed: {0}")]
    InitializationFailed(String),
    /// A shader pipeline failed to compile or link.
    #[error("shader pipeline failed to compile/link: {0}")]
    ShaderFailure(String),
    /// A GPU resource referenced by a command does not exist.
    #[error("missing GPU resource: {0}")]
    MissingResource(String),
    /// The requested feature is not supported by this backend.
    #[error("feature not supported: {0}")]
    FeatureNotSupported(String),
    /// Out of GPU memory.
    #[error("out of GPU memory")]
    OutOfMemory,
    /// The GPU device was lost.
    #[error("GPU device lost")]
    DeviceLost,
    /// Internal backend error.
    #[error("internal backend error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BackendError::OutOfMemory;
        assert_eq!(err.to_string(), "out of GPU memory");

        let err = BackendError::ShaderFailure("outline_resolve: link failed".to_string());
        assert_eq!(
            err.to_string(),
            "shader pipeline failed to compile/link: outline_resolve: link failed"
        );
    }
}

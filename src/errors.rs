//! Error Types
//!
//! The main error type [`AtriumError`] covers all failure modes of the
//! animation/asset subsystem: model fetching, scene-format decoding,
//! manifest parsing and decoder-readiness waits.
//!
//! All public APIs return [`Result<T>`], an alias for
//! `std::result::Result<T, AtriumError>`.

use thiserror::Error;

/// The main error type for the runtime.
#[derive(Error, Debug)]
pub enum AtriumError {
    // ========================================================================
    // Asset Loading Errors
    // ========================================================================
    /// The requested asset was not found.
    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    /// Model decoding failed (corrupt or unparseable scene data).
    #[error("Model decode error: {0}")]
    Decode(String),

    /// The external binary decoder never became ready.
    #[error("Decoder unavailable: {0}")]
    DecoderUnavailable(String),

    // ========================================================================
    // I/O Errors
    // ========================================================================
    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ========================================================================
    // HTTP & Network Errors
    // ========================================================================
    /// HTTP request error.
    #[cfg(feature = "http")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing error.
    #[cfg(feature = "http")]
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// HTTP response error with status code.
    #[error("HTTP response error: status {status}")]
    HttpResponse {
        /// HTTP status code
        status: u16,
    },

    // ========================================================================
    // Format & Parsing Errors
    // ========================================================================
    /// glTF parsing or loading error.
    #[cfg(feature = "gltf")]
    #[error("glTF error: {0}")]
    Gltf(String),

    /// JSON parsing error (model manifests).
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    // ========================================================================
    // Async & Threading Errors
    // ========================================================================
    /// Task join error (when async tasks fail to complete).
    #[error("Task join error: {0}")]
    TaskJoin(String),
}

#[cfg(feature = "gltf")]
impl From<gltf::Error> for AtriumError {
    fn from(err: gltf::Error) -> Self {
        AtriumError::Gltf(err.to_string())
    }
}

impl From<tokio::task::JoinError> for AtriumError {
    fn from(err: tokio::task::JoinError) -> Self {
        AtriumError::TaskJoin(err.to_string())
    }
}

/// Alias for `Result<T, AtriumError>`.
pub type Result<T> = std::result::Result<T, AtriumError>;

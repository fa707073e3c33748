//! Error types for the FAN Courier SDK.
//!
//! One enum per concern, following the order a request travels in:
//!
//! - [`InvalidParamError`] - caller input rejected by the validator
//! - [`EncodeError`] - CSV upload body could not be written
//! - [`ApiError`] - transport and HTTP failures
//! - [`ClientError`] - top-level error of [`crate::FanCourierClient`]
//!
//! Response parsing has no error type: a reply that cannot be read is
//! reported as a single synthetic [`crate::ParsedResultLine`].

use thiserror::Error;

// =============================================================================
// Validation Errors
// =============================================================================

/// Caller-supplied parameters were rejected before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidParamError {
    /// The `fisier` container is missing, empty or not an array.
    #[error("Must set a field 'fisier' containing multiple arrays.")]
    MissingBatch,

    /// An element of `fisier` is not an object.
    #[error("Shipment {position} in 'fisier' must be an object")]
    NotARecord { position: usize },

    /// The service type is absent or not accepted for AWB generation.
    #[error("Must set a field 'tip_serviciu' with one of these values: {}", .allowed.join(", "))]
    InvalidServiceType { allowed: Vec<String> },

    /// A required field is absent or empty.
    #[error("Shipment {position}: missing required field '{field}'")]
    MissingField { position: usize, field: String },

    /// A field holds a value outside its allowed set.
    #[error("Shipment {position}: field '{field}' must be one of these values: {}", .allowed.join(", "))]
    ValueNotAllowed {
        position: usize,
        field: String,
        allowed: Vec<String>,
    },
}

// =============================================================================
// Encoding Errors
// =============================================================================

/// Errors while writing the CSV upload body.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The CSV writer failed.
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    /// The writer buffer could not be recovered.
    #[error("CSV buffer error: {0}")]
    Buffer(String),

    /// The written bytes were not UTF-8.
    #[error("CSV output is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

// =============================================================================
// Transport Errors
// =============================================================================

/// Errors from the transport layer.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A credential or setting is missing from the environment.
    #[error("Missing configuration: {0}")]
    MissingConfig(String),

    /// A setting is present but unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The HTTP request could not be completed.
    #[error("HTTP request failed: {0}")]
    RequestFailed(String),

    /// The API answered with a non-success status.
    #[error("API returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::RequestFailed(err.to_string())
    }
}

// =============================================================================
// Client Errors (top-level)
// =============================================================================

/// Top-level error returned by [`crate::FanCourierClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// Parameters failed validation.
    #[error("Invalid parameters: {0}")]
    InvalidParam(#[from] InvalidParamError),

    /// The upload body could not be built.
    #[error("Encode error: {0}")]
    Encode(#[from] EncodeError),

    /// The request did not reach the API or was refused.
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for validation.
pub type ValidationResult<T> = Result<T, InvalidParamError>;

/// Result type for CSV encoding.
pub type EncodeResult<T> = Result<T, EncodeError>;

/// Result type for transport operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

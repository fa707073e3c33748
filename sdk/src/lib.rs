//! # FAN Courier SDK - AWB generation
//!
//! Validates shipment batches, encodes them into the CSV file expected by
//! the FAN Courier import endpoint, and reads the CSV reply back into one
//! result per shipment.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   params    │────▶│  Validator  │────▶│   Encoder   │────▶│  Transport  │
//! │ {"fisier"}  │     │ (fail fast) │     │ (CSV rows)  │     │ (multipart) │
//! └─────────────┘     └─────────────┘     └─────────────┘     └──────┬──────┘
//!                                                                    │
//! ┌─────────────┐     ┌─────────────┐                                │
//! │ result lines│◀────│   Parser    │◀───────────── CSV reply ───────┘
//! └─────────────┘     │ (fail safe) │
//!                     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fancourier::{GenerateAwb, encode, parse_response};
//!
//! let request = GenerateAwb::new(&params)?;   // validates
//! let csv = request.to_csv()?;                // upload body
//! let lines = request.parse_result(&reply);   // per-shipment outcome
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`models`] - Shipments, batches, result lines
//! - [`rules`] - Field rule table
//! - [`validation`] - Batch validation
//! - [`encoder`] - CSV column schema and upload encoding
//! - [`parser`] - Reply parsing
//! - [`request`] - AWB generation request
//! - [`config`] - Credentials and endpoint settings
//! - [`client`] - Transport and high-level client

// Core modules
pub mod error;
pub mod models;

// Rules and validation
pub mod rules;
pub mod validation;

// CSV
pub mod encoder;
pub mod parser;

// Request
pub mod request;

// Transport
pub mod client;
pub mod config;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    ApiError, ClientError, EncodeError, InvalidParamError,
    ApiResult, ClientResult, EncodeResult, ValidationResult,
};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{Batch, ParsedResultLine, Payer, ServiceType, ShipmentRecord};

// =============================================================================
// Re-exports - Rules and validation
// =============================================================================

pub use rules::{FieldRule, FieldRules, AWB_FIELD_RULES};
pub use validation::{validate, validate_batch};

// =============================================================================
// Re-exports - CSV
// =============================================================================

pub use encoder::{encode, encode_rows, ColumnSchema, AWB_COLUMNS};
pub use parser::parse_response;

// =============================================================================
// Re-exports - Request and client
// =============================================================================

pub use request::{GenerateAwb, GENERATE_AWB_PATH};
pub use client::{FanCourierClient, HttpTransport, Transport};
pub use config::ClientConfig;

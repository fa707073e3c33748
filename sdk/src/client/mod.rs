//! FAN Courier API client.
//!
//! The client only orchestrates: validate, encode, hand the CSV to a
//! [`Transport`], parse the reply. The transport is a trait so tests (and
//! callers with their own HTTP stack) can swap it out.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fancourier::FanCourierClient;
//! use serde_json::json;
//!
//! let client = FanCourierClient::from_env()?;
//! let lines = client.generate_awb(&json!({ "fisier": [shipment] })).await?;
//! for line in lines {
//!     match line.awb {
//!         Some(awb) => println!("line {}: AWB {}", line.line, awb),
//!         None => println!("line {}: {}", line.line, line.error_message),
//!     }
//! }
//! ```

pub mod decode;
pub mod http;

use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{ApiResult, ClientResult};
use crate::models::{Batch, ParsedResultLine};
use crate::request::GenerateAwb;

pub use decode::{decode_reply, detect_encoding, DecodedReply};
pub use http::HttpTransport;

/// Delivers a CSV body to an API path and returns the raw reply text.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn submit(&self, path: &str, csv: String) -> ApiResult<String>;
}

/// High-level client for AWB generation.
#[derive(Debug, Clone)]
pub struct FanCourierClient<T = HttpTransport> {
    transport: T,
}

impl FanCourierClient<HttpTransport> {
    /// Create an HTTP client from explicit settings
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        Ok(Self::with_transport(HttpTransport::new(config)?))
    }

    /// Create an HTTP client from `FANCOURIER_*` environment variables
    pub fn from_env() -> ApiResult<Self> {
        Self::new(ClientConfig::from_env()?)
    }
}

impl<T: Transport> FanCourierClient<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Generate AWBs from request params (`{"fisier": [...]}`).
    ///
    /// Invalid params fail before anything is sent. Per-shipment failures
    /// come back as result lines, not as errors.
    pub async fn generate_awb(&self, params: &Value) -> ClientResult<Vec<ParsedResultLine>> {
        self.submit(GenerateAwb::new(params)?).await
    }

    /// Generate AWBs from an already built batch.
    pub async fn generate_awb_batch(&self, batch: Batch) -> ClientResult<Vec<ParsedResultLine>> {
        self.submit(GenerateAwb::from_batch(batch)?).await
    }

    async fn submit(&self, request: GenerateAwb) -> ClientResult<Vec<ParsedResultLine>> {
        let csv = request.to_csv()?;
        tracing::info!(
            shipments = request.batch().len(),
            path = request.api_path(),
            "Submitting AWB batch"
        );

        let raw = self.transport.submit(request.api_path(), csv).await?;
        let lines = request.parse_result(&raw);

        let accepted = lines.iter().filter(|l| l.is_success()).count();
        if accepted < lines.len() {
            tracing::warn!(accepted, rejected = lines.len() - accepted, "Some shipments were rejected");
        } else {
            tracing::info!(accepted, "All shipments accepted");
        }

        Ok(lines)
    }
}

//! AWB generation request.
//!
//! Ties the pieces together for one upload: the params are validated once on
//! construction, the CSV body is derived from the validated batch, and the
//! reply is parsed against that same batch.

use serde_json::Value;

use crate::encoder;
use crate::error::{EncodeResult, ValidationResult};
use crate::models::{Batch, ParsedResultLine};
use crate::parser::parse_response;
use crate::validation::validate_batch;

/// Endpoint path of AWB generation, relative to the API base URL.
pub const GENERATE_AWB_PATH: &str = "import_awb_integrat.php";

/// Name of the multipart file field carrying the CSV.
pub const FILE_FIELD: &str = crate::models::BATCH_FIELD;

/// A validated AWB generation request.
#[derive(Debug, Clone)]
pub struct GenerateAwb {
    batch: Batch,
}

impl GenerateAwb {
    /// Validate request params (`{"fisier": [...]}`).
    pub fn new(params: &Value) -> ValidationResult<Self> {
        Self::from_batch(Batch::from_params(params)?)
    }

    /// Validate an already built batch.
    pub fn from_batch(batch: Batch) -> ValidationResult<Self> {
        validate_batch(&batch)?;
        Ok(Self { batch })
    }

    pub fn api_path(&self) -> &'static str {
        GENERATE_AWB_PATH
    }

    pub fn batch(&self) -> &Batch {
        &self.batch
    }

    /// CSV upload body.
    pub fn to_csv(&self) -> EncodeResult<String> {
        encoder::encode(&self.batch)
    }

    /// Read the API reply for this request.
    pub fn parse_result(&self, raw: &str) -> Vec<ParsedResultLine> {
        parse_response(raw, &self.batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InvalidParamError;
    use serde_json::json;

    fn params() -> Value {
        json!({ "fisier": [{
            "tip_serviciu": "Cont Colector",
            "nr_plicuri": 1,
            "nr_colete": 0,
            "greutate": 1,
            "plata_expeditie": "destinatar",
            "plata_ramburs_la": "expeditor",
            "ramburs": 120.5
        }]})
    }

    #[test]
    fn test_request_roundtrip() {
        let request = GenerateAwb::new(&params()).unwrap();
        assert_eq!(request.api_path(), "import_awb_integrat.php");

        let csv = request.to_csv().unwrap();
        assert_eq!(csv.lines().count(), 2);
        assert!(csv.contains("Cont Colector"));
        assert!(csv.contains("120.5"));

        let lines = request.parse_result("1,1,2150000012345,18.20\n");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].awb.as_deref(), Some("2150000012345"));
        assert_eq!(
            lines[0].sent_params.as_ref().and_then(|p| p.text("ramburs")),
            Some("120.5".to_string())
        );
    }

    #[test]
    fn test_invalid_params_rejected_on_construction() {
        let err = GenerateAwb::new(&json!({ "fisier": [] })).unwrap_err();
        assert_eq!(err, InvalidParamError::MissingBatch);
    }
}

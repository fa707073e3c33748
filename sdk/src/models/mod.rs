//! Domain models shared by the validator, the encoder and the response parser.
//!
//! - [`ServiceType`] - courier service codes with their wire labels
//! - [`Payer`] - who pays a fee (recipient or sender)
//! - [`ShipmentRecord`] - one parcel entry as submitted by the caller
//! - [`Batch`] - the ordered shipments of one upload
//! - [`ParsedResultLine`] - one line of the API reply, tied back to its shipment

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::{InvalidParamError, ValidationResult};

/// Name of the request parameter that carries the shipments.
pub const BATCH_FIELD: &str = "fisier";

// =============================================================================
// Service Type
// =============================================================================

/// Delivery/payment mode of a shipment (`tip_serviciu`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceType {
    Standard,
    ContColector,
    RedCode,
    ExpressLoco1h,
    ExpressLoco2h,
    ExpressLoco4h,
    ExpressLoco6h,
    CollectPointPayPoint,
    CollectPointOmv,
    /// International shipping; never accepted by AWB generation.
    Export,
}

impl ServiceType {
    /// Master list of service types, in the order the API documents them.
    pub const ALL: [ServiceType; 10] = [
        Self::Standard,
        Self::ContColector,
        Self::RedCode,
        Self::ExpressLoco1h,
        Self::ExpressLoco2h,
        Self::ExpressLoco4h,
        Self::ExpressLoco6h,
        Self::CollectPointPayPoint,
        Self::CollectPointOmv,
        Self::Export,
    ];

    /// Value expected by the API.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::ContColector => "Cont Colector",
            Self::RedCode => "Red Code",
            Self::ExpressLoco1h => "Express Loco 1H",
            Self::ExpressLoco2h => "Express Loco 2H",
            Self::ExpressLoco4h => "Express Loco 4H",
            Self::ExpressLoco6h => "Express Loco 6H",
            Self::CollectPointPayPoint => "Collect Point PayPoint",
            Self::CollectPointOmv => "Collect Point OMV",
            Self::Export => "Export",
        }
    }

    /// Parse an exact API label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.label() == label)
    }

    /// Service types accepted when generating AWBs.
    pub fn for_awb_generation() -> impl Iterator<Item = ServiceType> {
        Self::ALL.into_iter().filter(|s| *s != Self::Export)
    }
}

// =============================================================================
// Payer
// =============================================================================

/// Party paying for the shipment or the cash-on-delivery fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payer {
    Recipient,
    Sender,
}

impl Payer {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Recipient => "destinatar",
            Self::Sender => "expeditor",
        }
    }
}

// =============================================================================
// Shipment Record
// =============================================================================

/// One parcel entry: field name to value, as the caller built it.
///
/// Unknown fields are kept so they come back untouched in
/// [`ParsedResultLine::sent_params`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShipmentRecord(Map<String, Value>);

impl ShipmentRecord {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Builder-style insert, handy in tests and examples.
    pub fn with(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.0.insert(field.to_string(), value.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// True when the field is absent or holds an empty value.
    pub fn is_blank(&self, field: &str) -> bool {
        self.get(field).map_or(true, is_blank_value)
    }

    /// Field rendered as text, `None` when absent.
    pub fn text(&self, field: &str) -> Option<String> {
        self.get(field).map(render_value)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for ShipmentRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// `null`, blank strings and empty containers count as "not set".
/// Zero, `false` and `"0"` are real values.
pub fn is_blank_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Render a value the way it is written into a CSV cell.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) => String::new(),
        nested => nested.to_string(),
    }
}

// =============================================================================
// Batch
// =============================================================================

/// Ordered shipments submitted in one upload.
///
/// Position is the correlation key: record `i` becomes CSV data row `i + 1`
/// and is answered by reply line `i + 1`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Batch(Vec<ShipmentRecord>);

impl Batch {
    pub fn new(records: Vec<ShipmentRecord>) -> Self {
        Self(records)
    }

    /// Extract the batch from request params (`{"fisier": [...]}`).
    ///
    /// Only the container shape is checked here; field rules are applied by
    /// [`crate::validation::validate_batch`].
    pub fn from_params(params: &Value) -> ValidationResult<Self> {
        let items = match params.get(BATCH_FIELD) {
            Some(Value::Array(items)) if !items.is_empty() => items,
            _ => return Err(InvalidParamError::MissingBatch),
        };

        items
            .iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::Object(map) => Ok(ShipmentRecord(map.clone())),
                _ => Err(InvalidParamError::NotARecord { position: i + 1 }),
            })
            .collect::<ValidationResult<Vec<_>>>()
            .map(Self)
    }

    /// Wrap the batch back into request params.
    pub fn to_params(&self) -> Value {
        let mut params = Map::new();
        params.insert(
            BATCH_FIELD.to_string(),
            Value::Array(self.0.iter().map(|r| Value::Object(r.0.clone())).collect()),
        );
        Value::Object(params)
    }

    /// Shipment answered by a 1-based reply line number.
    pub fn record_for_line(&self, line: usize) -> Option<&ShipmentRecord> {
        line.checked_sub(1).and_then(|index| self.0.get(index))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ShipmentRecord> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a Batch {
    type Item = &'a ShipmentRecord;
    type IntoIter = std::slice::Iter<'a, ShipmentRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// =============================================================================
// Parsed Result Line
// =============================================================================

/// Outcome of one shipment as reported by the API.
///
/// `None` marks a failed line; it serializes as `false` to match the API
/// client convention.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedResultLine {
    /// 1-based line number echoed by the API.
    pub line: u32,
    /// Issued AWB number.
    #[serde(serialize_with = "or_false")]
    pub awb: Option<String>,
    /// Shipping cost.
    #[serde(serialize_with = "or_false")]
    pub cost: Option<String>,
    /// The shipment this line answers.
    #[serde(serialize_with = "or_false")]
    pub sent_params: Option<ShipmentRecord>,
    /// Empty on success.
    pub error_message: String,
}

impl ParsedResultLine {
    pub fn is_success(&self) -> bool {
        self.awb.is_some()
    }
}

fn or_false<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    match value {
        Some(v) => v.serialize(serializer),
        None => serializer.serialize_bool(false),
    }
}

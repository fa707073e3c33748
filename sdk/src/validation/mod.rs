//! Parameter validation for AWB generation.
//!
//! Validation fails fast: the first offending shipment stops the walk and
//! its error is returned. Nothing is mutated.
//!
//! # Example
//!
//! ```rust,ignore
//! use serde_json::json;
//! use fancourier::validation::validate;
//!
//! let params = json!({ "fisier": [{
//!     "tip_serviciu": "Standard",
//!     "nr_plicuri": 0,
//!     "nr_colete": 1,
//!     "greutate": 2,
//!     "plata_expeditie": "expeditor",
//!     "plata_ramburs_la": "destinatar"
//! }]});
//! assert!(validate(&params).is_ok());
//! ```

use serde_json::Value;

use crate::error::{InvalidParamError, ValidationResult};
use crate::models::{render_value, Batch, ShipmentRecord};
use crate::rules::{allowed_service_labels, FieldRules, AWB_FIELD_RULES, SERVICE_TYPE_FIELD};

/// Validate raw request params (`{"fisier": [...]}`).
pub fn validate(params: &Value) -> ValidationResult<()> {
    let batch = Batch::from_params(params)?;
    validate_batch(&batch)
}

/// Validate an already extracted batch against the AWB field rules.
pub fn validate_batch(batch: &Batch) -> ValidationResult<()> {
    validate_batch_with(batch, &AWB_FIELD_RULES)
}

/// Validate a batch against an explicit rule table.
pub fn validate_batch_with(batch: &Batch, rules: &FieldRules) -> ValidationResult<()> {
    if batch.is_empty() {
        return Err(InvalidParamError::MissingBatch);
    }

    let allowed_services = allowed_service_labels();
    for (index, record) in batch.iter().enumerate() {
        check_service_type(record, &allowed_services)?;
        validate_record(index + 1, record, rules)?;
    }

    tracing::debug!(shipments = batch.len(), "AWB batch validated");
    Ok(())
}

fn check_service_type(record: &ShipmentRecord, allowed: &[String]) -> ValidationResult<()> {
    let accepted = match record.get(SERVICE_TYPE_FIELD) {
        Some(Value::String(service)) if !service.is_empty() => allowed.contains(service),
        _ => false,
    };

    if accepted {
        Ok(())
    } else {
        Err(InvalidParamError::InvalidServiceType {
            allowed: allowed.to_vec(),
        })
    }
}

/// Apply the rule table to one shipment. `position` is 1-based.
fn validate_record(
    position: usize,
    record: &ShipmentRecord,
    rules: &FieldRules,
) -> ValidationResult<()> {
    for (field, rule) in rules.iter() {
        if rule.required && record.is_blank(field) {
            return Err(InvalidParamError::MissingField {
                position,
                field: field.to_string(),
            });
        }

        let Some(allowed) = &rule.allowed_values else {
            continue;
        };
        let Some(value) = record.get(field) else {
            continue;
        };
        if !rule.allows(&render_value(value)) {
            return Err(InvalidParamError::ValueNotAllowed {
                position,
                field: field.to_string(),
                allowed: allowed.clone(),
            });
        }
    }

    Ok(())
}

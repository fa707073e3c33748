//! CSV upload body for AWB generation.
//!
//! One header row of column labels, then one data row per shipment in batch
//! order. Cells are looked up by column key; absent fields give empty cells.
//! Cells holding commas, quotes or newlines are quoted, so any CSV reader
//! recovers exactly one row per shipment.

pub mod schema;

use csv::{Terminator, WriterBuilder};

use crate::error::{EncodeError, EncodeResult};
use crate::models::{Batch, ShipmentRecord};

pub use schema::{ColumnSchema, AWB_COLUMNS};

/// Field delimiter of the upload.
pub const DELIMITER: u8 = b',';

/// Cells of one shipment, in column order.
pub fn encode_record(record: &ShipmentRecord, schema: &ColumnSchema) -> Vec<String> {
    schema
        .keys()
        .map(|key| record.text(key).unwrap_or_default())
        .collect()
}

/// Header row followed by one row per shipment.
pub fn encode_rows(batch: &Batch, schema: &ColumnSchema) -> Vec<Vec<String>> {
    let header = schema.labels().map(str::to_string).collect();
    std::iter::once(header)
        .chain(batch.iter().map(|record| encode_record(record, schema)))
        .collect()
}

/// Encode a batch with the AWB column layout.
pub fn encode(batch: &Batch) -> EncodeResult<String> {
    encode_with(batch, &AWB_COLUMNS)
}

/// Encode a batch with an explicit column layout.
pub fn encode_with(batch: &Batch, schema: &ColumnSchema) -> EncodeResult<String> {
    let mut writer = WriterBuilder::new()
        .delimiter(DELIMITER)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    for row in encode_rows(batch, schema) {
        writer.write_record(&row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| EncodeError::Buffer(e.to_string()))?;
    let csv = String::from_utf8(bytes)?;

    tracing::debug!(
        shipments = batch.len(),
        columns = schema.len(),
        bytes = csv.len(),
        "AWB batch encoded"
    );
    Ok(csv)
}

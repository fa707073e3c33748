//! Reader for the CSV reply of AWB generation.
//!
//! Each reply line looks like `line,status,awb,cost` on success and
//! `line,status,error message` on failure, where `status == "1"` means the
//! shipment was accepted. The echoed line number points back into the
//! submitted batch (line `N` answers shipment `N - 1`).
//!
//! Parsing never fails. A reply that cannot be read as a whole is reported as
//! one synthetic failed line carrying the reason.

use thiserror::Error;

use crate::models::{Batch, ParsedResultLine, ShipmentRecord};

/// Status cell value of an accepted shipment.
pub const API_SUBMIT_ROW_SUCCESSFUL: &str = "1";

/// Cell separator of the reply.
pub const CELL_SEPARATOR: char = ',';

/// Why a reply could not be read. Never leaves this module.
#[derive(Debug, Error)]
enum ResponseFormatError {
    #[error("Reply line {row} has no '{cell}' column")]
    MissingCell { row: usize, cell: &'static str },

    #[error("Reply line {row} has an invalid line number '{value}'")]
    InvalidLineNumber { row: usize, value: String },

    #[error("Reply refers to line {line} but only {submitted} shipments were sent")]
    UnknownLine { line: u32, submitted: usize },
}

/// Parse the raw reply against the batch that produced it.
pub fn parse_response(raw: &str, batch: &Batch) -> Vec<ParsedResultLine> {
    match try_parse(raw, batch) {
        Ok(lines) => {
            tracing::debug!(
                lines = lines.len(),
                accepted = lines.iter().filter(|l| l.is_success()).count(),
                "AWB reply parsed"
            );
            lines
        }
        Err(err) => {
            tracing::warn!(error = %err, "AWB reply unreadable, reporting a single failed line");
            vec![unreadable_reply(err.to_string())]
        }
    }
}

/// The one line returned when the reply as a whole cannot be read.
fn unreadable_reply(message: String) -> ParsedResultLine {
    ParsedResultLine {
        line: 1,
        awb: None,
        cost: None,
        sent_params: None,
        error_message: message,
    }
}

fn try_parse(raw: &str, batch: &Batch) -> Result<Vec<ParsedResultLine>, ResponseFormatError> {
    let mut results = Vec::new();

    for (index, line) in raw.split('\n').enumerate() {
        let line = line.strip_suffix('\r').unwrap_or(line);
        let cells: Vec<&str> = line.split(CELL_SEPARATOR).collect();
        if is_filler(&cells) {
            continue;
        }
        results.push(parse_line(index + 1, &cells, batch)?);
    }

    Ok(results)
}

/// Lines whose first three cells are all blank carry no result.
fn is_filler(cells: &[&str]) -> bool {
    (0..3).all(|i| cells.get(i).map_or(true, |cell| cell.trim().is_empty()))
}

/// `row` is the physical line in the reply, used only in error messages.
fn parse_line(
    row: usize,
    cells: &[&str],
    batch: &Batch,
) -> Result<ParsedResultLine, ResponseFormatError> {
    let cell = |i: usize, name: &'static str| {
        cells
            .get(i)
            .map(|value| value.to_string())
            .ok_or(ResponseFormatError::MissingCell { row, cell: name })
    };

    let raw_line = cell(0, "line")?;
    let line: u32 = raw_line
        .trim()
        .parse()
        .map_err(|_| ResponseFormatError::InvalidLineNumber {
            row,
            value: raw_line.clone(),
        })?;
    let sent_params = sent_shipment(line, batch)?.clone();

    if cell(1, "status")? == API_SUBMIT_ROW_SUCCESSFUL {
        Ok(ParsedResultLine {
            line,
            awb: Some(cell(2, "awb")?),
            cost: Some(cell(3, "cost")?),
            sent_params: Some(sent_params),
            error_message: String::new(),
        })
    } else {
        Ok(ParsedResultLine {
            line,
            awb: None,
            cost: None,
            sent_params: Some(sent_params),
            error_message: cell(2, "error message")?,
        })
    }
}

/// Shipment answered by a reply line. The line number comes from the API and
/// is trusted to match the submitted order.
fn sent_shipment(line: u32, batch: &Batch) -> Result<&ShipmentRecord, ResponseFormatError> {
    batch
        .record_for_line(line as usize)
        .ok_or(ResponseFormatError::UnknownLine {
            line,
            submitted: batch.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(size: usize) -> Batch {
        Batch::new(
            (1..=size)
                .map(|i| ShipmentRecord::new().with("nume_destinatar", format!("Client {}", i)))
                .collect(),
        )
    }

    #[test]
    fn test_success_and_failure_lines() {
        let batch = batch(2);
        let lines = parse_response("1,1,AWB123,15.50\n2,0,Invalid address", &batch);

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].line, 1);
        assert_eq!(lines[0].awb.as_deref(), Some("AWB123"));
        assert_eq!(lines[0].cost.as_deref(), Some("15.50"));
        assert_eq!(lines[0].error_message, "");
        assert_eq!(lines[0].sent_params.as_ref(), batch.record_for_line(1));

        assert_eq!(lines[1].line, 2);
        assert_eq!(lines[1].awb, None);
        assert_eq!(lines[1].cost, None);
        assert_eq!(lines[1].error_message, "Invalid address");
        assert_eq!(lines[1].sent_params.as_ref(), batch.record_for_line(2));
    }

    #[test]
    fn test_filler_lines_skipped() {
        let lines = parse_response(",,,\n1,1,AWB1,10\n\n", &batch(1));
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].awb.as_deref(), Some("AWB1"));
    }

    #[test]
    fn test_crlf_reply() {
        let lines = parse_response("1,1,AWB1,10.00\r\n2,1,AWB2,12.00\r\n", &batch(2));
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].cost.as_deref(), Some("12.00"));
    }

    #[test]
    fn test_line_number_beyond_batch() {
        let lines = parse_response("1,1,AWB1,10\n3,1,AWB3,10", &batch(2));
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].line, 1);
        assert_eq!(lines[0].awb, None);
        assert_eq!(lines[0].sent_params, None);
        assert!(lines[0].error_message.contains("line 3"));
    }

    #[test]
    fn test_line_number_zero() {
        let lines = parse_response("0,1,AWB1,10", &batch(2));
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].sent_params, None);
        assert!(lines[0].error_message.contains("line 0"));
    }

    #[test]
    fn test_non_numeric_line_number() {
        let lines = parse_response("Eroare autentificare,,", &batch(1));
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].line, 1);
        assert!(lines[0].error_message.contains("Eroare autentificare"));
    }

    #[test]
    fn test_success_without_cost() {
        let lines = parse_response("1,1,AWB1", &batch(1));
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].awb, None);
        assert!(lines[0].error_message.contains("cost"));
    }

    #[test]
    fn test_empty_reply() {
        assert!(parse_response("", &batch(1)).is_empty());
    }

    #[test]
    fn test_idempotent() {
        let batch = batch(2);
        let raw = "1,1,AWB123,15.50\n2,0,Invalid address";
        assert_eq!(parse_response(raw, &batch), parse_response(raw, &batch));
    }
}

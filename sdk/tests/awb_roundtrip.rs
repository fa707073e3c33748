//! End-to-end checks of validation, CSV encoding and reply parsing.

use fancourier::{
    encode, parse_response, validate, validate_batch, Batch, GenerateAwb, InvalidParamError,
    ServiceType, ShipmentRecord, AWB_COLUMNS,
};
use proptest::prelude::*;
use serde_json::{json, Value};

fn shipment(service: &str, observations: &str) -> ShipmentRecord {
    ShipmentRecord::new()
        .with("tip_serviciu", service)
        .with("nr_plicuri", 0)
        .with("nr_colete", 1)
        .with("greutate", 2)
        .with("plata_expeditie", "expeditor")
        .with("plata_ramburs_la", "destinatar")
        .with("observatii", observations)
}

fn service_label() -> impl Strategy<Value = String> {
    let labels: Vec<String> = ServiceType::for_awb_generation()
        .map(|s| s.label().to_string())
        .collect();
    prop::sample::select(labels)
}

fn valid_shipment() -> impl Strategy<Value = ShipmentRecord> {
    (service_label(), "[a-zA-Z0-9 ,.]{0,24}")
        .prop_map(|(service, observations)| shipment(&service, &observations))
}

fn valid_batch() -> impl Strategy<Value = Batch> {
    prop::collection::vec(valid_shipment(), 1..12).prop_map(Batch::new)
}

proptest! {
    #[test]
    fn valid_batches_pass(batch in valid_batch()) {
        prop_assert_eq!(validate_batch(&batch), Ok(()));
        prop_assert_eq!(validate(&batch.to_params()), Ok(()));
    }

    #[test]
    fn missing_service_type_fails(batch in valid_batch(), pick in any::<prop::sample::Index>()) {
        let mut params = batch.to_params();
        let records = params["fisier"].as_array_mut().unwrap();
        let i = pick.index(records.len());
        records[i].as_object_mut().unwrap().remove("tip_serviciu");

        let err = validate(&params).unwrap_err();
        let is_service_error = matches!(err, InvalidParamError::InvalidServiceType { .. });
        prop_assert!(is_service_error);
    }

    #[test]
    fn encoding_keeps_one_row_per_record(batch in valid_batch()) {
        let csv = encode(&batch).unwrap();
        prop_assert_eq!(csv.lines().count(), batch.len() + 1);

        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        prop_assert_eq!(rows.len(), batch.len());

        let observations = AWB_COLUMNS.keys().position(|k| k == "observatii").unwrap();
        for (row, record) in rows.iter().zip(batch.iter()) {
            prop_assert_eq!(row.len(), AWB_COLUMNS.len());
            prop_assert_eq!(Some(row[observations].to_string()), record.text("observatii"));
        }
    }

    #[test]
    fn parsing_is_idempotent(batch in valid_batch(), accepted in any::<bool>()) {
        let reply: String = (1..=batch.len())
            .map(|line| if accepted {
                format!("{},1,21500000{:05},12.40\n", line, line)
            } else {
                format!("{},0,Cod postal invalid\n", line)
            })
            .collect();

        let first = parse_response(&reply, &batch);
        prop_assert_eq!(first.len(), batch.len());
        prop_assert_eq!(&first, &parse_response(&reply, &batch));
        for (i, line) in first.iter().enumerate() {
            prop_assert_eq!(line.line as usize, i + 1);
            prop_assert_eq!(line.sent_params.as_ref(), batch.record_for_line(i + 1));
            prop_assert_eq!(line.is_success(), accepted);
        }
    }

    #[test]
    fn out_of_range_line_degrades_whole_reply(batch in valid_batch(), extra in 1usize..5) {
        let reply = format!("1,1,AWB1,10.00\n{},1,AWB2,11.00\n", batch.len() + extra);
        let lines = parse_response(&reply, &batch);

        prop_assert_eq!(lines.len(), 1);
        prop_assert_eq!(lines[0].line, 1);
        prop_assert!(lines[0].awb.is_none());
        prop_assert!(lines[0].cost.is_none());
        prop_assert!(lines[0].sent_params.is_none());
        prop_assert!(!lines[0].error_message.is_empty());
    }
}

#[test]
fn reply_example_from_api_documentation() {
    let batch = Batch::new(vec![
        shipment("Standard", "Colet 1"),
        shipment("Red Code", "Colet 2"),
    ]);
    let lines = parse_response("1,1,AWB123,15.50\n2,0,Invalid address", &batch);

    let value = serde_json::to_value(&lines).unwrap();
    assert_eq!(value[0]["line"], json!(1));
    assert_eq!(value[0]["awb"], json!("AWB123"));
    assert_eq!(value[0]["cost"], json!("15.50"));
    assert_eq!(value[0]["error_message"], json!(""));
    assert_eq!(value[0]["sent_params"]["observatii"], json!("Colet 1"));
    assert_eq!(value[1]["line"], json!(2));
    assert_eq!(value[1]["awb"], json!(false));
    assert_eq!(value[1]["cost"], json!(false));
    assert_eq!(value[1]["error_message"], json!("Invalid address"));
}

#[test]
fn filler_line_produces_nothing() {
    let batch = Batch::new(vec![shipment("Standard", "")]);
    assert!(parse_response(",,,", &batch).is_empty());
}

#[test]
fn unknown_fields_pass_through_to_results() {
    let params = json!({ "fisier": [{
        "tip_serviciu": "Express Loco 2H",
        "nr_plicuri": 1,
        "nr_colete": 0,
        "greutate": 1,
        "plata_expeditie": "destinatar",
        "plata_ramburs_la": "expeditor",
        "referinta_interna": "CMD-2024-0042"
    }]});

    let request = GenerateAwb::new(&params).unwrap();
    let csv = request.to_csv().unwrap();
    assert!(!csv.contains("CMD-2024-0042"));

    let lines = request.parse_result("1,1,2150000099999,22.00");
    let sent: &Value = lines[0].sent_params.as_ref().unwrap().get("referinta_interna").unwrap();
    assert_eq!(sent, &json!("CMD-2024-0042"));
}

#[test]
fn header_row_lists_labels_in_order() {
    let batch = Batch::new(vec![shipment("Standard", "x")]);
    let csv = encode(&batch).unwrap();
    let header = csv.lines().next().unwrap();
    let labels: Vec<&str> = AWB_COLUMNS.labels().collect();
    assert_eq!(header, labels.join(","));
}

#[test]
fn encoded_file_reads_back_with_csv_reader() {
    use tempfile::tempdir;

    let dir = tempdir().unwrap();
    let path = dir.path().join("awb.csv");
    let batch = Batch::new(vec![
        shipment("Standard", "Fragil, a se manevra cu grija"),
        shipment("Cont Colector", "linia 1\nlinia 2"),
    ]);
    std::fs::write(&path, encode(&batch).unwrap()).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers.len(), AWB_COLUMNS.len());

    let observations = AWB_COLUMNS.keys().position(|k| k == "observatii").unwrap();
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][observations], "Fragil, a se manevra cu grija");
    assert_eq!(&rows[1][observations], "linia 1\nlinia 2");
}

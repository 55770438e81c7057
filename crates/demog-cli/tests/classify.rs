//! End-to-end tests: CSV in, classification, annotated CSV out.

use demog_cli::ingest::read_csv_from;
use demog_cli::output::write_annotated;
use demog_match::BatchClassifier;
use demog_model::{Algorithm, MatchConfig, Threshold, Vocabulary};

const METADATA: &str = "\
table_name,attr_name,business_name,attr_description,storage_id
patients,pt_age,Patient Age,Patient age at time of diagnosis,s1
patients,pt_sex,Patient Sex,Gender,s2
claims,claim_no,Claim Number,\"Insurance claim numbers, primary\",s3
claims,notes,Notes,,s4
";

fn classifier() -> BatchClassifier {
    let config = MatchConfig::default()
        .with_algorithm(Algorithm::PartialRatio)
        .with_threshold(Threshold::new(80).unwrap());
    BatchClassifier::new(config, Vocabulary::demographic()).unwrap()
}

#[test]
fn matched_rows_keep_all_columns() {
    let dataset = read_csv_from(METADATA.as_bytes()).unwrap();
    let classification = classifier().classify(&dataset.records).unwrap();

    let mut buffer = Vec::new();
    let written = write_annotated(&mut buffer, &dataset.columns, classification.matched()).unwrap();
    assert_eq!(written, 2);

    let text = String::from_utf8(buffer).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines[0],
        "table_name,attr_name,business_name,attr_description,storage_id,matched,matched_keyword,match_score"
    );
    assert_eq!(
        lines[1],
        "patients,pt_age,Patient Age,Patient age at time of diagnosis,s1,true,age,100"
    );
    assert_eq!(lines[2], "patients,pt_sex,Patient Sex,Gender,s2,true,gender,100");
}

#[test]
fn all_rows_written_in_input_order() {
    let dataset = read_csv_from(METADATA.as_bytes()).unwrap();
    let classification = classifier().classify(&dataset.records).unwrap();

    let mut buffer = Vec::new();
    let written = write_annotated(&mut buffer, &dataset.columns, &classification.records).unwrap();
    assert_eq!(written, 4);

    let text = String::from_utf8(buffer).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert!(lines[3].starts_with("claims,claim_no,Claim Number,\"Insurance claim numbers, primary\",s3,false,"));
    assert_eq!(lines[4], "claims,notes,Notes,,s4,false,,0");
}

#[test]
fn stats_serialize_for_json_output() {
    let dataset = read_csv_from(METADATA.as_bytes()).unwrap();
    let classification = classifier().classify(&dataset.records).unwrap();
    let json = serde_json::to_value(&classification.stats).unwrap();
    assert_eq!(json["total"], 4);
    assert_eq!(json["matched"], 2);
    assert_eq!(json["algorithm"], "partial_ratio");
    assert_eq!(json["groups"]["patients"]["matched"], 2);
    assert_eq!(json["by_category"]["age"], 1);
}

#[test]
fn repeated_headers_survive_to_output() {
    let csv = "table_name,attr_description,note,note\npatients,Gender,first,second\n";
    let dataset = read_csv_from(csv.as_bytes()).unwrap();
    let classification = classifier().classify(&dataset.records).unwrap();

    let mut buffer = Vec::new();
    write_annotated(&mut buffer, &dataset.columns, &classification.records).unwrap();

    let text = String::from_utf8(buffer).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines[0],
        "table_name,attr_description,note,note.1,matched,matched_keyword,match_score"
    );
    assert_eq!(lines[1], "patients,Gender,first,second,true,gender,100");
}

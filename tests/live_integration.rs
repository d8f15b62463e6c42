use updateservice_connector::{
    dto::{Authentication, BibliographicRecord, SchemasRequest, UpdateStatus},
    DoubleRecordCheckConnector, UpdateConnector,
};

const RECORD: &str = r#"<record xmlns="info:lc/xmlns/marcxchange-v1"><datafield ind1="0" ind2="0" tag="001"><subfield code="a">52958858</subfield><subfield code="b">870970</subfield><subfield code="c">20170616143600</subfield><subfield code="d">20180628</subfield><subfield code="f">a</subfield></datafield></record>"#;

fn live_configured() -> bool {
    std::env::var("UPDATE_SERVICE_URL")
        .map(|url| !url.trim().is_empty())
        .unwrap_or(false)
}

#[tokio::test]
async fn live_double_record_check_and_schemas() {
    if !live_configured() {
        eprintln!("skipping live test: UPDATE_SERVICE_URL is not set");
        return;
    }

    let double_record_check =
        DoubleRecordCheckConnector::from_env().expect("double record check config must load");
    let response = double_record_check
        .double_record_check(&BibliographicRecord::marcxchange(RECORD))
        .await
        .expect("double record check must succeed");
    assert_eq!(response.status, UpdateStatus::Ok);
    assert!(response.double_records.is_empty());
    double_record_check.close();

    let update = UpdateConnector::from_env().expect("update config must load");
    let schemas = update
        .get_schemas(&SchemasRequest {
            authentication: Authentication::new("", "010100", ""),
            tracking_id: Some("update-warmup".to_owned()),
        })
        .await
        .expect("get schemas must succeed");
    assert!(!schemas.schemas.is_empty());
    update.close();
}

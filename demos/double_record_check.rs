use updateservice_connector::{dto::BibliographicRecord, DoubleRecordCheckConnector};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let record = std::env::args()
        .nth(1)
        .map(std::fs::read_to_string)
        .transpose()?
        .unwrap_or_else(|| {
            r#"<record xmlns="info:lc/xmlns/marcxchange-v1"><datafield ind1="0" ind2="0" tag="001"><subfield code="a">52958858</subfield><subfield code="b">870970</subfield></datafield></record>"#.to_owned()
        });

    let connector = DoubleRecordCheckConnector::from_env()?;
    let response = connector
        .double_record_check(&BibliographicRecord::marcxchange(record))
        .await?;

    println!("status: {:?}", response.status);
    for double in &response.double_records {
        println!("{} ({})", double.message, double.pid);
    }

    connector.close();
    Ok(())
}

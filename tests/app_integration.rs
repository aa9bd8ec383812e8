use std::fs;

mod test_utils {
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub async fn create_yahoo_mock_server(ticker: &str, price: f64) -> MockServer {
        let mock_server = MockServer::start().await;
        mount_quote(&mock_server, ticker, price).await;
        mock_server
    }

    pub async fn mount_quote(mock_server: &MockServer, ticker: &str, price: f64) {
        let url_path = format!("/v8/finance/chart/{ticker}");
        let body = format!(
            r#"{{"chart": {{"result": [{{"meta": {{"regularMarketPrice": {price}, "currency": "EUR"}}}}]}}}}"#
        );

        Mock::given(method("GET"))
            .and(path(&url_path))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(mock_server)
            .await;
    }

    pub async fn create_bitpanda_mock_server(api_key: &str, wallets_body: &str) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/wallets"))
            .and(header("X-Api-Key", api_key))
            .respond_with(ResponseTemplate::new(200).set_body_string(wallets_body))
            .mount(&mock_server)
            .await;

        mock_server
    }
}

fn write_config(
    wallet_base_url: &str,
    provider_base_url: &str,
    data_path: &str,
    extra: &str,
) -> tempfile::NamedTempFile {
    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let config_content = format!(
        r#"
wallet:
  base_url: "{wallet_base_url}"
  api_key: "test-key"
provider:
  base_url: "{provider_base_url}"
quote_currency: "EUR"
lookup:
  retries: 2
  retry_delay_secs: 0
  pacing_ms: 0
data_path: "{data_path}"
{extra}
"#
    );
    fs::write(config_file.path(), &config_content).expect("Failed to write config file");
    config_file
}

#[test_log::test(tokio::test)]
async fn test_full_app_flow_with_mocks() {
    let wallets_body = r#"{
        "data": [
            {"attributes": {"cryptocoin_symbol": "BTC", "balance": "0.5", "deleted": false}},
            {"attributes": {"cryptocoin_symbol": "BEST", "balance": "100.0", "deleted": false}},
            {"attributes": {"cryptocoin_symbol": "OLD", "balance": "3.0", "deleted": true}}
        ]
    }"#;

    let bitpanda = test_utils::create_bitpanda_mock_server("test-key", wallets_body).await;
    // Only BTC should reach the price source: BEST is on the built-in
    // exclusion list and OLD is a deleted wallet.
    let yahoo = test_utils::create_yahoo_mock_server("BTC-EUR", 60000.0).await;

    let data_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let config_file = write_config(
        &bitpanda.uri(),
        &yahoo.uri(),
        data_dir.path().to_str().unwrap(),
        "",
    );

    let result = coinfolio::run_command(
        coinfolio::AppCommand::Summary { json: false },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(
        result.is_ok(),
        "Summary command failed with: {:?}",
        result.err()
    );

    let yahoo_requests = yahoo
        .received_requests()
        .await
        .expect("request recording enabled");
    assert_eq!(yahoo_requests.len(), 1);
    assert!(yahoo_requests[0].url.path().contains("BTC-EUR"));
}

#[test_log::test(tokio::test)]
async fn test_export_file_flow_with_failing_symbol() {
    // ETH resolves; FOO is unknown to the price source and exhausts its
    // attempts without aborting the run.
    let yahoo = test_utils::create_yahoo_mock_server("ETH-EUR", 2500.0).await;

    let export_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    fs::write(
        export_file.path(),
        r#"{
            "data": [
                {"attributes": {"cryptocoin_symbol": "ETH", "balance": "2.0"}},
                {"attributes": {"cryptocoin_symbol": "FOO", "balance": "1.0"}}
            ]
        }"#,
    )
    .expect("Failed to write export file");

    let data_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let config_content = format!(
        r#"
wallet:
  export_file: "{}"
provider:
  base_url: "{}"
lookup:
  retries: 2
  retry_delay_secs: 0
  pacing_ms: 0
data_path: "{}"
"#,
        export_file.path().display(),
        yahoo.uri(),
        data_dir.path().display()
    );
    fs::write(config_file.path(), &config_content).expect("Failed to write config file");

    let result = coinfolio::run_command(
        coinfolio::AppCommand::Summary { json: true },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(
        result.is_ok(),
        "Summary command failed with: {:?}",
        result.err()
    );

    // FOO used both configured attempts, ETH one.
    let yahoo_requests = yahoo
        .received_requests()
        .await
        .expect("request recording enabled");
    assert_eq!(yahoo_requests.len(), 3);
}

#[test_log::test(tokio::test)]
async fn test_exclusions_command_merges_override_file() {
    let data_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    fs::write(
        data_dir.path().join("exclusions.txt"),
        "# local skips\nXYZ\n",
    )
    .expect("Failed to write exclusions file");

    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let config_content = format!("data_path: \"{}\"\n", data_dir.path().display());
    fs::write(config_file.path(), &config_content).expect("Failed to write config file");

    let result = coinfolio::run_command(
        coinfolio::AppCommand::Exclusions,
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(
        result.is_ok(),
        "Exclusions command failed with: {:?}",
        result.err()
    );
}

//! Integration tests for the scrape pipeline
//!
//! These tests use wiremock to create mock HTTP servers and run
//! fetch → parse → extract end-to-end.

use page_scraper::config::{Config, FetcherConfig, DEFAULT_USER_AGENT};
use page_scraper::output::{JsonFileSink, RecordSink};
use page_scraper::pipeline::{fetch_url, PageScraper};
use page_scraper::{FetchError, PageRecord, ParseError, ScrapeError};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ARTICLE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title> Pet Store API </title>
    <style>h1 { color: red }</style>
</head>
<body>
    <h2 id="pets">Pets</h2>
    <h1 class="main">Pet Store</h1>
    <p class="intro">Manage   the
        pets in your store.</p>
    <p>   </p>
    <script>window.tracking = true;</script>
    <h2>Orders</h2>
    <table id="endpoints" class="api">
        <tr><th>Method</th><th>Path</th></tr>
        <tr><td>GET</td><td>/pets</td></tr>
        <tr><td>POST</td><td>/pets</td></tr>
    </table>
    <p>Unclosed paragraph
    <div><p>Inside <b>div</b></div>
</body>
</html>"#;

fn html_response(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.as_bytes().to_vec(), "text/html")
}

fn test_config(timeout_secs: u64) -> Config {
    Config {
        fetcher: FetcherConfig {
            timeout_secs,
            connect_timeout_secs: 1,
            ..FetcherConfig::default()
        },
        ..Config::default()
    }
}

fn scraper() -> PageScraper {
    PageScraper::new(&test_config(5)).expect("Failed to build scraper")
}

#[tokio::test]
async fn test_scrape_full_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/docs"))
        .respond_with(html_response(ARTICLE))
        .mount(&mock_server)
        .await;

    let url = format!("{}/docs", mock_server.uri());
    let record = scraper().scrape(&url).await.expect("Scrape failed");

    assert_eq!(record.source_url, url);
    assert_eq!(record.title, "Pet Store API");

    let headings: Vec<(u8, &str)> = record
        .headings
        .iter()
        .map(|h| (h.level, h.text.as_str()))
        .collect();
    assert_eq!(headings, vec![(1, "Pet Store"), (2, "Pets"), (2, "Orders")]);
    assert_eq!(record.headings[0].attributes["class"], "main");
    assert_eq!(record.headings[1].attributes["id"], "pets");

    let paragraphs: Vec<&str> = record.paragraphs.iter().map(|p| p.text.as_str()).collect();
    assert_eq!(
        paragraphs,
        vec![
            "Manage the pets in your store.",
            "Unclosed paragraph",
            "Inside div"
        ]
    );
    assert_eq!(record.paragraphs[0].attributes["class"], "intro");

    assert_eq!(record.tables.len(), 1);
    let table = &record.tables[0];
    let attribute_names: Vec<&str> = table.attributes.keys().map(String::as_str).collect();
    assert_eq!(attribute_names, vec!["id", "class"]);
    assert_eq!(table.headers, vec!["Method", "Path"]);
    assert_eq!(
        table.rows,
        vec![
            vec!["Method", "Path"],
            vec!["GET", "/pets"],
            vec!["POST", "/pets"],
        ]
    );
}

#[tokio::test]
async fn test_scrape_minimal_page_json_shape() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_response(
            "<html><head><title>T</title></head><body><h1>Hi</h1></body></html>",
        ))
        .mount(&mock_server)
        .await;

    let url = format!("{}/", mock_server.uri());
    let record = scraper().scrape(&url).await.unwrap();

    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "url": url,
            "title": "T",
            "headings": [{ "level": 1, "tag": "h1", "text": "Hi", "attributes": {} }],
            "paragraphs": [],
            "tables": []
        })
    );
}

#[tokio::test]
async fn test_sends_browser_user_agent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(header("user-agent", DEFAULT_USER_AGENT))
        .respond_with(html_response("<title>UA</title>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let record = scraper().scrape(&mock_server.uri()).await.unwrap();
    assert_eq!(record.title, "UA");
}

#[tokio::test]
async fn test_not_found_is_fetch_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let url = format!("{}/missing", mock_server.uri());
    let result = scraper().scrape(&url).await;

    match result {
        Err(ScrapeError::Fetch(err)) => {
            assert_eq!(err.status(), Some(404));
            assert!(matches!(err, FetchError::Status { ref reason, .. } if reason == "Not Found"));
        }
        other => panic!("Expected FetchError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_server_error_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = scraper().scrape(&mock_server.uri()).await;
    assert!(matches!(
        result,
        Err(ScrapeError::Fetch(FetchError::Status { status: 503, .. }))
    ));
}

#[tokio::test]
async fn test_timeout_is_fetch_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(html_response("<title>slow</title>").set_delay(Duration::from_secs(3)))
        .mount(&mock_server)
        .await;

    let scraper = PageScraper::new(&test_config(1)).unwrap();
    let result = scraper.scrape(&mock_server.uri()).await;

    match result {
        Err(ScrapeError::Fetch(err)) => assert!(err.is_timeout(), "unexpected error: {}", err),
        other => panic!("Expected timeout, got {:?}", other),
    }
}

#[tokio::test]
async fn test_connection_refused_is_fetch_error() {
    let result = scraper().scrape("http://127.0.0.1:1/").await;
    assert!(matches!(
        result,
        Err(ScrapeError::Fetch(FetchError::Connect { .. }))
    ));
}

#[tokio::test]
async fn test_plain_text_input_is_fetch_error() {
    let result = scraper().scrape("please document this API").await;
    assert!(matches!(
        result,
        Err(ScrapeError::Fetch(FetchError::InvalidUrl { .. }))
    ));
}

#[tokio::test]
async fn test_image_payload_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(vec![0x89, b'P', b'N', b'G', 0, 0], "image/png"),
        )
        .mount(&mock_server)
        .await;

    let result = scraper().scrape(&mock_server.uri()).await;
    assert!(matches!(
        result,
        Err(ScrapeError::Parse(ParseError::UnsupportedContentType { .. }))
    ));
}

#[tokio::test]
async fn test_nul_bytes_in_html_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(b"<html>\x00\x01\x02\x00garbage".to_vec(), "text/html"),
        )
        .mount(&mock_server)
        .await;

    let result = scraper().scrape(&mock_server.uri()).await;
    assert!(matches!(
        result,
        Err(ScrapeError::Parse(ParseError::Binary { .. }))
    ));
}

#[tokio::test]
async fn test_scrape_latin1_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            b"<html><head><title>Informaci\xf3n</title></head><body><h1>Espa\xf1a</h1><p>Caf\xe9 y ni\xf1os</p></body></html>".to_vec(),
            "text/html; charset=iso-8859-1",
        ))
        .mount(&mock_server)
        .await;

    let record = scraper().scrape(&mock_server.uri()).await.unwrap();
    assert_eq!(record.title, "Informaci\u{f3}n");
    assert_eq!(record.headings[0].text, "Espa\u{f1}a");
    assert_eq!(record.paragraphs[0].text, "Caf\u{e9} y ni\u{f1}os");
}

#[tokio::test]
async fn test_redirect_keeps_requested_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/new"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/new"))
        .respond_with(html_response("<title>New home</title>"))
        .mount(&mock_server)
        .await;

    let url = format!("{}/old", mock_server.uri());
    let client = scraper();

    let raw = fetch_url(client.client(), &url).await.unwrap();
    assert_eq!(raw.requested_url, url);
    assert!(raw.final_url.ends_with("/new"));
    assert_eq!(raw.status, 200);
    assert_eq!(raw.content_type.as_deref(), Some("text/html"));

    let record = client.scrape(&url).await.unwrap();
    assert_eq!(record.source_url, url);
    assert_eq!(record.title, "New home");
}

#[tokio::test]
async fn test_scrape_many_preserves_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(html_response("<title>A</title>").set_delay(Duration::from_millis(200)))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/c"))
        .respond_with(html_response("<title>C</title>"))
        .mount(&mock_server)
        .await;

    let urls: Vec<String> = ["/a", "/b", "/c"]
        .iter()
        .map(|p| format!("{}{}", mock_server.uri(), p))
        .collect();

    let results = scraper().scrape_many(&urls).await;

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().title, "A");
    assert!(matches!(
        results[1],
        Err(ScrapeError::Fetch(FetchError::Status { status: 404, .. }))
    ));
    assert_eq!(results[2].as_ref().unwrap().title, "C");
}

#[tokio::test]
async fn test_cancel_in_flight_fetch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(html_response("<title>late</title>").set_delay(Duration::from_secs(3)))
        .mount(&mock_server)
        .await;

    let token = CancellationToken::new();
    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        canceller.cancel();
    });

    let result = scraper()
        .scrape_with_cancel(&mock_server.uri(), &token)
        .await;
    assert!(matches!(
        result,
        Err(ScrapeError::Fetch(FetchError::Cancelled { .. }))
    ));
}

#[tokio::test]
async fn test_scrape_and_save_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(html_response(ARTICLE))
        .mount(&mock_server)
        .await;

    let record = scraper().scrape(&mock_server.uri()).await.unwrap();

    let dir = tempfile::TempDir::new().unwrap();
    let sink = JsonFileSink::new(dir.path(), true);
    let path = sink.write_record(&record, "resultado").unwrap();

    assert_eq!(path.file_name().unwrap(), "resultado.json");
    let saved: PageRecord =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(saved, record);
}

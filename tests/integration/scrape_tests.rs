//! Integration tests for the scraper
//!
//! These tests use wiremock to serve a catalogue and its product pages and
//! run the full fetch, collect and render cycle over HTTP.

use catalogue_scraper::config::Config;
use catalogue_scraper::{run_scrape, ScrapeError};
use scraper::Html;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const APRICOT_PAGE: &str = r#"<html><head><title>Apricot Ripe &amp; Ready</title>
<meta name="description" content="Buy Sainsbury's Apricot Ripe &amp; Ready">
<meta name="keywords" content="apricot"></head>
<body><h1>Apricot Ripe &amp; Ready</h1><p>Lovely apricots.</p></body></html>"#;

const AVOCADO_PAGE: &str = r#"<html><head><title>Avocado</title></head>
<body><h1>Avocado</h1></body></html>"#;

/// Creates a test configuration pointing at the mock catalogue
fn create_test_config(catalogue_url: String) -> Config {
    let mut config = Config::default();
    config.catalogue.url = catalogue_url;
    config.http.timeout_secs = 5;
    config.scrape.task_timeout_secs = Some(5);
    config
}

fn catalogue_page(base_url: &str) -> String {
    format!(
        r#"<html><head><title>Ripe fruits</title></head><body>
        <ul class="productLister">
            <li><div class="product"><div class="productInfo"><h3>
                <a href="{base_url}/apricot.html">
                    Sainsbury's Apricot Ripe &amp; Ready x5
                </a></h3></div>
                <div class="pricing"><p class="pricePerUnit">
                    &pound;3.50<abbr title="per">/</abbr><abbr title="unit"><span class="pricePerUnit">unit</span></abbr>
                </p></div></div></li>
            <li><div class="product"><div class="productInfo"><h3>
                <a href="avocado.html">Sainsbury's Avocado, Ripe &amp; Ready x2</a></h3></div>
                <div class="pricing"><p class="pricePerUnit">&pound;1.80/unit</p></div></div></li>
        </ul></body></html>"#
    )
}

async fn mount_page(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

fn serialized_len(page: &str) -> usize {
    Html::parse_document(page).html().len()
}

fn kilobytes(bytes: usize) -> String {
    let rounded = ((bytes as f64 / 1000.0) * 10.0 + 0.5).floor() / 10.0;
    format!("{}kb", rounded)
}

#[tokio::test]
async fn test_full_scrape() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/fruit/index.html", catalogue_page(&base_url)).await;
    mount_page(&mock_server, "/apricot.html", APRICOT_PAGE.to_string()).await;
    mount_page(&mock_server, "/fruit/avocado.html", AVOCADO_PAGE.to_string()).await;

    let config = create_test_config(format!("{}/fruit/index.html", base_url));
    let report = run_scrape(&config).await.expect("scrape should succeed");

    assert_eq!(report.results.len(), 2);
    assert_eq!(report.total.as_str(), "5.30");

    let apricot = report
        .results
        .iter()
        .find(|p| p.title == "Sainsbury's Apricot Ripe & Ready x5")
        .expect("apricot entry");
    assert_eq!(apricot.unit_price.as_str(), "3.50");
    assert_eq!(apricot.description, "Buy Sainsbury's Apricot Ripe & Ready");
    assert_eq!(apricot.size, kilobytes(serialized_len(APRICOT_PAGE)));

    let avocado = report
        .results
        .iter()
        .find(|p| p.title == "Sainsbury's Avocado, Ripe & Ready x2")
        .expect("avocado entry");
    assert_eq!(avocado.unit_price.as_str(), "1.80");
    assert_eq!(avocado.description, "");
    assert_eq!(avocado.size, kilobytes(serialized_len(AVOCADO_PAGE)));

    let json = report.to_json().unwrap();
    assert!(json.contains("\"total\": 5.30\n}\n"));
    assert!(json.contains("Apricot Ripe & Ready"));
}

#[tokio::test]
async fn test_redirected_catalogue_resolves_links_from_final_address() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/cat"))
        .respond_with(
            ResponseTemplate::new(301)
                .insert_header("location", format!("{}/shop/index.html", base_url).as_str()),
        )
        .mount(&mock_server)
        .await;

    mount_page(
        &mock_server,
        "/shop/index.html",
        r#"<html><body><div class="product">
            <h3><a href="apple.html">Apple</a></h3>
            <p class="pricePerUnit">&pound;0.40/unit</p>
        </div></body></html>"#
            .to_string(),
    )
    .await;
    mount_page(
        &mock_server,
        "/shop/apple.html",
        r#"<html><head><meta name="description" content="Crisp"></head></html>"#.to_string(),
    )
    .await;

    let config = create_test_config(format!("{}/cat", base_url));
    let report = run_scrape(&config).await.expect("redirected scrape should succeed");

    assert_eq!(report.results.len(), 1);
    assert_eq!(report.results[0].title, "Apple");
    assert_eq!(report.results[0].description, "Crisp");
    assert_eq!(report.total.as_str(), "0.40");
}

#[tokio::test]
async fn test_empty_catalogue() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/",
        "<html><body><p>No products today</p></body></html>".to_string(),
    )
    .await;

    let config = create_test_config(format!("{}/", mock_server.uri()));
    let report = run_scrape(&config).await.unwrap();

    assert_eq!(
        report.to_json().unwrap(),
        "{\n    \"results\": [],\n    \"total\": 0.00\n}\n"
    );
}

#[tokio::test]
async fn test_missing_product_page_aborts() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/fruit/index.html", catalogue_page(&base_url)).await;
    mount_page(&mock_server, "/apricot.html", APRICOT_PAGE.to_string()).await;

    Mock::given(method("GET"))
        .and(path("/fruit/avocado.html"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let config = create_test_config(format!("{}/fruit/index.html", base_url));
    let result = run_scrape(&config).await;

    match result {
        Err(ScrapeError::HttpStatus { url, status }) => {
            assert_eq!(status, 404);
            assert!(url.ends_with("/fruit/avocado.html"));
        }
        other => panic!("expected HTTP 404 failure, got {:?}", other.map(|r| r.results.len())),
    }
}

#[tokio::test]
async fn test_unreachable_catalogue_fails() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let config = create_test_config(format!("{}/catalogue.html", mock_server.uri()));
    let result = run_scrape(&config).await;

    assert!(matches!(
        result,
        Err(ScrapeError::HttpStatus { status: 500, .. })
    ));
}

#[tokio::test]
async fn test_slow_product_page_times_out() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/fruit/index.html", catalogue_page(&base_url)).await;
    mount_page(&mock_server, "/apricot.html", APRICOT_PAGE.to_string()).await;

    Mock::given(method("GET"))
        .and(path("/fruit/avocado.html"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(AVOCADO_PAGE)
                .set_delay(std::time::Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(format!("{}/fruit/index.html", base_url));
    config.scrape.task_timeout_secs = Some(1);

    let result = run_scrape(&config).await;
    assert!(matches!(result, Err(ScrapeError::Timeout { .. })));
}

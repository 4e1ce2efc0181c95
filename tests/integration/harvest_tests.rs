//! Integration tests for the harvester
//!
//! These tests use wiremock to serve a small storefront and test the full
//! harvest cycle end-to-end, from the collections index to the exported file.

use catalog_harvester::config::{parse_config, Config, CrawlerConfig, OutputConfig, SiteConfig};
use catalog_harvester::crawler::{CatalogCrawler, FixedDelay, HttpFetcher};
use catalog_harvester::{run_harvest, FetchError, HarvestError, ProductRecord};
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration for a mock storefront
fn create_test_config(base_url: &str, output_path: &Path) -> Config {
    Config {
        site: SiteConfig {
            root_url: format!("{}/collections", base_url),
            base_url: None,
        },
        crawler: CrawlerConfig {
            page_delay_ms: 0,
            timeout_secs: Some(5),
            dedupe_products: false,
        },
        output: OutputConfig {
            path: output_path.to_string_lossy().into_owned(),
            format: None,
        },
        ..Config::default()
    }
}

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html; charset=utf-8")
}

fn collection_tile(handle: &str, title: &str) -> String {
    format!(
        r#"<div class="collection-grid-item">
            <a class="collection-grid-item__link" href="/collections/{handle}"></a>
            <div class="collection-grid-item__title">{title}</div>
        </div>"#
    )
}

fn listing_page(handles: &[&str]) -> String {
    let items: String = handles
        .iter()
        .map(|h| {
            format!(r#"<div class="item-product"><a href="/products/{h}"><img src="/{h}.jpg"></a></div>"#)
        })
        .collect();
    format!("<html><body><div class=\"grid\">{items}</div></body></html>")
}

fn product_page(handle: &str, price: i64) -> String {
    format!(
        r#"<html><head>
        <script>
            var json_product = {{
                "title": "Product {handle}",
                "description": "About {handle}",
                "vendor": "Mine Botanicals",
                "type": "Powder",
                "tags": ["{handle}", "botanical"],
                "price": {price},
                "price_min": {price},
                "price_max": {max},
                "variants": [
                    {{"title": "Small", "sku": "{handle}-s", "public_title": "Small", "options": ["Small"], "price": {price}, "weight": 28}},
                    {{"title": "Large", "sku": "{handle}-l", "public_title": "Large", "options": ["Large"], "price": {max}, "weight": 250}}
                ],
                "images": ["//cdn.test/{handle}.jpg"],
                "featured_image": "//cdn.test/{handle}.jpg",
                "content": "<p>About {handle}</p>"
            }};
        </script>
        </head><body>
            <p class="product-single__cat" itemprop="cat">
                <a href="/collections/kratom">Kratom, </a><a href="/collections/powder">Powder</a>
            </p>
        </body></html>"#,
        max = price * 5
    )
}

/// Mounts one listing page of a collection; every page is expected exactly once
async fn mount_listing(server: &MockServer, handle: &str, page: u32, products: &[&str]) {
    Mock::given(method("GET"))
        .and(path(format!("/collections/{handle}")))
        .and(query_param("page", page.to_string()))
        .respond_with(html(listing_page(products)))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_product(server: &MockServer, handle: &str, price: i64) {
    Mock::given(method("GET"))
        .and(path(format!("/products/{handle}")))
        .respond_with(html(product_page(handle, price)))
        .mount(server)
        .await;
}

async fn mount_index(server: &MockServer, tiles: &[String]) {
    Mock::given(method("GET"))
        .and(path("/collections"))
        .respond_with(html(format!("<html><body>{}</body></html>", tiles.concat())))
        .expect(1)
        .mount(server)
        .await;
}

/// Two collections with three and two products, one listing page each
async fn mount_two_collection_store(server: &MockServer) {
    mount_index(
        server,
        &[
            collection_tile("kratom", "Kratom"),
            collection_tile("kava", "Kava"),
        ],
    )
    .await;

    mount_listing(server, "kratom", 1, &["red-bali", "green-malay", "white-borneo"]).await;
    mount_listing(server, "kratom", 2, &[]).await;
    mount_listing(server, "kava", 1, &["kava-root", "kava-extract"]).await;
    mount_listing(server, "kava", 2, &[]).await;

    mount_product(server, "red-bali", 999).await;
    mount_product(server, "green-malay", 1099).await;
    mount_product(server, "white-borneo", 1250).await;
    mount_product(server, "kava-root", 1999).await;
    mount_product(server, "kava-extract", 2499).await;
}

fn read_csv(path: &Path) -> (Vec<String>, Vec<csv::StringRecord>) {
    let mut reader = csv::Reader::from_path(path).expect("Failed to open exported CSV");
    let headers = reader
        .headers()
        .expect("Missing header row")
        .iter()
        .map(str::to_string)
        .collect();
    let rows = reader
        .records()
        .collect::<Result<Vec<_>, _>>()
        .expect("Malformed CSV row");
    (headers, rows)
}

#[tokio::test]
async fn test_full_harvest_two_collections() {
    let mock_server = MockServer::start().await;
    mount_two_collection_store(&mock_server).await;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output_path = temp_dir.path().join("products.csv");
    let config = create_test_config(&mock_server.uri(), &output_path);

    let stats = run_harvest(&config).await.expect("Harvest failed");

    assert_eq!(stats.collections_discovered, 2);
    assert_eq!(stats.listing_pages_fetched, 4);
    assert_eq!(stats.products_harvested, 5);
    assert_eq!(stats.products_skipped, 0);

    let (headers, rows) = read_csv(&output_path);
    assert_eq!(headers, ProductRecord::COLUMNS);
    assert_eq!(rows.len(), 5);

    for row in &rows {
        assert_eq!(row.len(), 13);
        for (column, value) in headers.iter().zip(row.iter()) {
            assert!(!value.is_empty(), "column {} is empty", column);
        }
    }

    // Collections in discovery order, products in listing order
    let titles: Vec<&str> = rows.iter().map(|row| &row[0]).collect();
    assert_eq!(
        titles,
        vec![
            "Product red-bali",
            "Product green-malay",
            "Product white-borneo",
            "Product kava-root",
            "Product kava-extract",
        ]
    );

    let first = &rows[0];
    assert_eq!(&first[3], "Powder");
    assert_eq!(&first[4], r#"["Kratom","Powder"]"#);
    assert_eq!(&first[6], "9.99");
    assert_eq!(&first[8], "49.95");

    let variants: serde_json::Value = serde_json::from_str(&first[9]).expect("variants column");
    assert_eq!(variants.as_array().map(Vec::len), Some(2));
    assert_eq!(variants[1]["price"], "49.95");
}

#[tokio::test]
async fn test_tile_without_link_is_skipped() {
    let mock_server = MockServer::start().await;

    let broken_tile = r#"<div class="collection-grid-item">
            <div class="collection-grid-item__title">Coming Soon</div>
        </div>"#
        .to_string();
    mount_index(&mock_server, &[broken_tile, collection_tile("kava", "Kava")]).await;
    mount_listing(&mock_server, "kava", 1, &["kava-root"]).await;
    mount_listing(&mock_server, "kava", 2, &[]).await;
    mount_product(&mock_server, "kava-root", 1999).await;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output_path = temp_dir.path().join("products.csv");
    let config = create_test_config(&mock_server.uri(), &output_path);

    let stats = run_harvest(&config).await.expect("Harvest failed");

    assert_eq!(stats.collections_discovered, 1);
    assert_eq!(stats.collections_skipped, 1);
    let (_, rows) = read_csv(&output_path);
    assert_eq!(rows.len(), 1);
}

#[tokio::test]
async fn test_products_without_record_are_skipped() {
    let mock_server = MockServer::start().await;

    mount_index(&mock_server, &[collection_tile("kratom", "Kratom")]).await;
    mount_listing(&mock_server, "kratom", 1, &["red-bali", "retired", "gone"]).await;
    mount_listing(&mock_server, "kratom", 2, &[]).await;
    mount_product(&mock_server, "red-bali", 999).await;

    // Product page without the embedded record
    Mock::given(method("GET"))
        .and(path("/products/retired"))
        .respond_with(html("<html><body><h1>Retired</h1></body></html>".to_string()))
        .mount(&mock_server)
        .await;

    // Product page that no longer exists
    Mock::given(method("GET"))
        .and(path("/products/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output_path = temp_dir.path().join("products.csv");
    let config = create_test_config(&mock_server.uri(), &output_path);

    let stats = run_harvest(&config).await.expect("Harvest failed");

    assert_eq!(stats.products_harvested, 1);
    assert_eq!(stats.products_skipped, 2);
    let (_, rows) = read_csv(&output_path);
    assert_eq!(rows.len(), 1);
    assert_eq!(&rows[0][0], "Product red-bali");
}

#[tokio::test]
async fn test_multi_page_collection() {
    let mock_server = MockServer::start().await;

    mount_index(&mock_server, &[collection_tile("kratom", "Kratom")]).await;
    mount_listing(&mock_server, "kratom", 1, &["p1", "p2"]).await;
    mount_listing(&mock_server, "kratom", 2, &["p3", "p4"]).await;
    mount_listing(&mock_server, "kratom", 3, &["p5"]).await;
    mount_listing(&mock_server, "kratom", 4, &[]).await;
    for handle in ["p1", "p2", "p3", "p4", "p5"] {
        mount_product(&mock_server, handle, 500).await;
    }

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output_path = temp_dir.path().join("products.csv");
    let config = create_test_config(&mock_server.uri(), &output_path);

    let stats = run_harvest(&config).await.expect("Harvest failed");

    assert_eq!(stats.listing_pages_fetched, 4);
    assert_eq!(stats.products_harvested, 5);
    let (_, rows) = read_csv(&output_path);
    assert_eq!(&rows[4][0], "Product p5");
    assert_eq!(&rows[4][6], "5.00");
}

#[tokio::test]
async fn test_duplicates_kept_unless_dedupe_enabled() {
    let mock_server = MockServer::start().await;

    // Every page is fetched once per run, and there are two runs
    Mock::given(method("GET"))
        .and(path("/collections"))
        .respond_with(html(format!(
            "<html><body>{}{}</body></html>",
            collection_tile("kratom", "Kratom"),
            collection_tile("best-sellers", "Best Sellers")
        )))
        .expect(2)
        .mount(&mock_server)
        .await;
    for handle in ["kratom", "best-sellers"] {
        for page in 1..=2 {
            let products: &[&str] = match (handle, page) {
                ("kratom", 1) => &["red-bali", "green-malay"],
                ("best-sellers", 1) => &["green-malay"],
                _ => &[],
            };
            Mock::given(method("GET"))
                .and(path(format!("/collections/{handle}")))
                .and(query_param("page", page.to_string()))
                .respond_with(html(listing_page(products)))
                .mount(&mock_server)
                .await;
        }
    }
    mount_product(&mock_server, "red-bali", 999).await;
    mount_product(&mock_server, "green-malay", 1099).await;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let config = create_test_config(&mock_server.uri(), &temp_dir.path().join("all.csv"));
    let mut crawler = CatalogCrawler::new(
        &config,
        Box::new(HttpFetcher::from_config(&config).unwrap()),
        Box::new(FixedDelay::from_millis(0)),
    )
    .unwrap();
    let products = crawler.crawl(&config.site.root_url).await.unwrap();
    assert_eq!(products.len(), 3);

    let mut config = create_test_config(&mock_server.uri(), &temp_dir.path().join("unique.csv"));
    config.crawler.dedupe_products = true;
    let mut crawler = CatalogCrawler::new(
        &config,
        Box::new(HttpFetcher::from_config(&config).unwrap()),
        Box::new(FixedDelay::from_millis(0)),
    )
    .unwrap();
    let products = crawler.crawl(&config.site.root_url).await.unwrap();

    assert_eq!(products.len(), 2);
    assert_eq!(crawler.stats().duplicates_skipped, 1);
}

#[tokio::test]
async fn test_dead_collection_ends_only_that_collection() {
    let mock_server = MockServer::start().await;

    mount_index(
        &mock_server,
        &[
            collection_tile("kava", "Kava"),
            collection_tile("retired", "Retired"),
        ],
    )
    .await;
    mount_listing(&mock_server, "kava", 1, &["kava-root"]).await;
    mount_listing(&mock_server, "kava", 2, &[]).await;
    mount_product(&mock_server, "kava-root", 1999).await;

    Mock::given(method("GET"))
        .and(path("/collections/retired"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output_path = temp_dir.path().join("products.csv");
    let config = create_test_config(&mock_server.uri(), &output_path);

    let stats = run_harvest(&config).await.expect("Harvest failed");

    assert_eq!(stats.collections_discovered, 2);
    assert_eq!(stats.products_harvested, 1);
    let (_, rows) = read_csv(&output_path);
    assert_eq!(rows.len(), 1);
    assert_eq!(&rows[0][0], "Product kava-root");
}

#[tokio::test]
async fn test_listing_transport_failure_aborts_run() {
    let mock_server = MockServer::start().await;

    mount_index(&mock_server, &[collection_tile("kratom", "Kratom")]).await;
    Mock::given(method("GET"))
        .and(path("/collections/kratom"))
        .respond_with(html(listing_page(&["red-bali"])).set_delay(Duration::from_secs(3)))
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output_path = temp_dir.path().join("products.csv");
    let mut config = create_test_config(&mock_server.uri(), &output_path);
    config.crawler.timeout_secs = Some(1);

    let result = run_harvest(&config).await;

    assert!(matches!(
        result,
        Err(HarvestError::Fetch(FetchError::Request { .. }))
    ));
    assert!(!output_path.exists());
}

#[tokio::test]
async fn test_product_without_categories_is_skipped() {
    let mock_server = MockServer::start().await;

    mount_index(&mock_server, &[collection_tile("kratom", "Kratom")]).await;
    mount_listing(&mock_server, "kratom", 1, &["red-bali", "uncategorized", "green-malay"]).await;
    mount_listing(&mock_server, "kratom", 2, &[]).await;
    mount_product(&mock_server, "red-bali", 999).await;
    mount_product(&mock_server, "green-malay", 1099).await;

    // Valid embedded record, but the breadcrumb markup is gone
    let without_categories = product_page("uncategorized", 1500).replace(
        r#"class="product-single__cat" itemprop="cat""#,
        r#"class="breadcrumbs""#,
    );
    Mock::given(method("GET"))
        .and(path("/products/uncategorized"))
        .respond_with(html(without_categories))
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output_path = temp_dir.path().join("products.csv");
    let config = create_test_config(&mock_server.uri(), &output_path);

    let stats = run_harvest(&config).await.expect("Harvest failed");

    assert_eq!(stats.products_harvested, 2);
    assert_eq!(stats.products_skipped, 1);
    let (_, rows) = read_csv(&output_path);
    let titles: Vec<&str> = rows.iter().map(|row| &row[0]).collect();
    assert_eq!(titles, vec!["Product red-bali", "Product green-malay"]);
}

#[tokio::test]
async fn test_toml_config_with_json_output() {
    let mock_server = MockServer::start().await;
    mount_two_collection_store(&mock_server).await;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output_path = temp_dir.path().join("catalog.json");

    let toml = format!(
        r#"
[site]
root-url = "{uri}/collections"

[crawler]
page-delay-ms = 0
timeout-secs = 5

[output]
path = "{path}"
"#,
        uri = mock_server.uri(),
        path = output_path.display().to_string().replace('\\', "/"),
    );
    let config = parse_config(&toml).expect("Config should parse");

    run_harvest(&config).await.expect("Harvest failed");

    let text = std::fs::read_to_string(&output_path).expect("JSON export missing");
    let products: serde_json::Value = serde_json::from_str(&text).expect("Invalid JSON export");
    let products = products.as_array().expect("Export should be an array");

    assert_eq!(products.len(), 5);
    assert_eq!(products[3]["title"], "Product kava-root");
    assert_eq!(products[3]["price"], "19.99");
    assert_eq!(products[3]["categories"][1], "Powder");
    assert_eq!(products[3]["variants"][0]["weight"], 28.0);
}

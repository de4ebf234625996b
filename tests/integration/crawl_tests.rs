//! Integration tests for the catalogue walk and valuation
//!
//! These tests use wiremock to serve a small catalogue and exercise the
//! full crawl-and-value cycle end-to-end.

use futures::StreamExt;
use shelf_value::config::{Config, HttpConfig};
use shelf_value::crawler::{build_http_client, fetch_page, CatalogueCrawler, RetryPolicy};
use shelf_value::valuation::{value_catalogue, Valuer};
use shelf_value::{CrawlError, FetchFailure, InventoryValue};
use std::time::Duration;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Retry policy with delays short enough for tests
fn fast_retry(max_attempts: u32) -> RetryPolicy {
    RetryPolicy {
        max_attempts,
        initial_backoff: Duration::from_millis(1),
        max_backoff: Duration::from_millis(5),
    }
}

fn client() -> reqwest::Client {
    build_http_client(&HttpConfig::default()).expect("Failed to build client")
}

/// Renders a listing page with the given relative book links and next link
fn listing_page(books: &[&str], next: Option<&str>) -> String {
    let mut html = String::from(
        r#"<html><head><title>All products</title></head><body><section><ol class="row">"#,
    );
    for href in books {
        html.push_str(&format!(
            r#"<li class="col-xs-6"><article class="product_pod">
                <h3><a href="{}" title="Book">Book</a></h3>
                <p class="price_color">£0.00</p>
            </article></li>"#,
            href
        ));
    }
    html.push_str(r#"</ol><ul class="pager">"#);
    if let Some(href) = next {
        html.push_str(&format!(r#"<li class="next"><a href="{}">next</a></li>"#, href));
    }
    html.push_str("</ul></section></body></html>");
    html
}

/// Renders a book detail page
fn detail_page(price: &str, available: u32) -> String {
    format!(
        r#"<html><body><article class="product_page"><div class="product_main">
            <h1>Book</h1>
            <p class="price_color">£{}</p>
            <p class="instock availability"><i class="icon-ok"></i>
                In stock ({} available)
            </p>
        </div></article></body></html>"#,
        price, available
    )
}

async fn serve(server: &MockServer, at: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

/// Two listing pages; the first holds both books, the second none
async fn two_page_catalogue(server: &MockServer) {
    serve(
        server,
        "/catalogue/page-1.html",
        listing_page(&["book-a_1/index.html", "book-b_2/index.html"], Some("page-2.html")),
    )
    .await;
    serve(server, "/catalogue/page-2.html", listing_page(&[], None)).await;
    serve(server, "/catalogue/book-a_1/index.html", detail_page("10.00", 3)).await;
    serve(server, "/catalogue/book-b_2/index.html", detail_page("5.50", 1)).await;
}

fn start_url(server: &MockServer) -> Url {
    Url::parse(&format!("{}/catalogue/page-1.html", server.uri())).expect("Failed to parse URL")
}

fn assert_total(actual: InventoryValue, expected: f64) {
    assert!(
        (actual.0 - expected).abs() < 1e-9,
        "Expected total {}, got {}",
        expected,
        actual
    );
}

#[tokio::test]
async fn test_two_page_catalogue_total() {
    let mock_server = MockServer::start().await;
    two_page_catalogue(&mock_server).await;

    let client = client();
    let crawler = CatalogueCrawler::new(client.clone(), start_url(&mock_server), fast_retry(3));
    let valuation = Valuer::new(client).run(crawler.into_stream()).await;

    assert_total(valuation.total, 35.50);
    assert_eq!(valuation.books_valued, 2);
    assert_eq!(valuation.books_failed, 0);
    assert!(valuation.is_complete());
}

#[tokio::test]
async fn test_value_catalogue_from_config() {
    let mock_server = MockServer::start().await;
    two_page_catalogue(&mock_server).await;

    let mut config = Config::default();
    config.catalogue.start_url = start_url(&mock_server).to_string();

    let valuation = value_catalogue(&config).await.expect("Valuation failed");
    assert_total(valuation.total, 35.50);
}

#[tokio::test]
async fn test_single_page_catalogue_terminates() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/catalogue/page-1.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(
            &["x_1/index.html", "y_2/index.html", "x_1/index.html"],
            None,
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut crawler = CatalogueCrawler::new(client(), start_url(&mock_server), fast_retry(3));
    let mut urls = Vec::new();
    while let Some(next) = crawler.next_book().await {
        urls.push(next.expect("Unexpected crawl error").path().to_string());
    }

    assert_eq!(
        urls,
        vec![
            "/catalogue/x_1/index.html",
            "/catalogue/y_2/index.html",
            "/catalogue/x_1/index.html",
        ]
    );
    assert_eq!(crawler.pages_visited(), 1);
    assert!(crawler.next_book().await.is_none());
}

#[tokio::test]
async fn test_books_yielded_before_next_page_fetched() {
    let mock_server = MockServer::start().await;
    two_page_catalogue(&mock_server).await;

    let mut crawler = CatalogueCrawler::new(client(), start_url(&mock_server), fast_retry(3));
    let first = crawler
        .next_book()
        .await
        .expect("Expected a book")
        .expect("Unexpected crawl error");
    assert!(first.path().ends_with("/book-a_1/index.html"));

    let requests = mock_server
        .received_requests()
        .await
        .expect("Request recording disabled");
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.path(), "/catalogue/page-1.html");
}

#[tokio::test]
async fn test_listing_page_retried_until_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/catalogue/page-1.html"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&mock_server)
        .await;
    serve(
        &mock_server,
        "/catalogue/page-1.html",
        listing_page(&["a_1/index.html"], None),
    )
    .await;

    let crawler = CatalogueCrawler::new(client(), start_url(&mock_server), fast_retry(3));
    let urls: Vec<Result<Url, CrawlError>> = crawler.into_stream().collect().await;

    assert_eq!(urls.len(), 1);
    assert!(urls[0].is_ok());
}

#[tokio::test]
async fn test_listing_page_gives_up_after_retries() {
    let mock_server = MockServer::start().await;

    // The error body looks like a listing page; it must not be parsed
    Mock::given(method("GET"))
        .and(path("/catalogue/page-1.html"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_string(listing_page(&["trap_1/index.html"], Some("page-2.html"))),
        )
        .expect(3)
        .mount(&mock_server)
        .await;

    let crawler = CatalogueCrawler::new(client(), start_url(&mock_server), fast_retry(3));
    let items: Vec<Result<Url, CrawlError>> = crawler.into_stream().collect().await;

    assert_eq!(items.len(), 1);
    match &items[0] {
        Err(CrawlError::ListingUnreachable {
            attempts, source, ..
        }) => {
            assert_eq!(*attempts, 3);
            assert_eq!(source.failure, FetchFailure::Status(500));
        }
        other => panic!("Expected ListingUnreachable, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_second_page_keeps_first_page_value() {
    let mock_server = MockServer::start().await;

    serve(
        &mock_server,
        "/catalogue/page-1.html",
        listing_page(&["book-a_1/index.html"], Some("page-2.html")),
    )
    .await;
    serve(
        &mock_server,
        "/catalogue/book-a_1/index.html",
        detail_page("12.25", 2),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/catalogue/page-2.html"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&mock_server)
        .await;

    let client = client();
    let crawler = CatalogueCrawler::new(client.clone(), start_url(&mock_server), fast_retry(2));
    let valuation = Valuer::new(client).run(crawler.into_stream()).await;

    assert_total(valuation.total, 24.50);
    assert_eq!(valuation.books_valued, 1);
    assert!(!valuation.is_complete());
    assert!(valuation
        .listing_error
        .as_deref()
        .is_some_and(|e| e.contains("page-2.html")));
}

#[tokio::test]
async fn test_failed_and_malformed_books_contribute_zero() {
    let mock_server = MockServer::start().await;

    serve(
        &mock_server,
        "/catalogue/page-1.html",
        listing_page(
            &["ok_1/index.html", "gone_2/index.html", "odd_3/index.html"],
            None,
        ),
    )
    .await;
    serve(&mock_server, "/catalogue/ok_1/index.html", detail_page("4.20", 5)).await;
    Mock::given(method("GET"))
        .and(path("/catalogue/gone_2/index.html"))
        .respond_with(ResponseTemplate::new(404).set_body_string(detail_page("100.00", 100)))
        .mount(&mock_server)
        .await;
    serve(
        &mock_server,
        "/catalogue/odd_3/index.html",
        "<html><body><h1>No price here</h1></body></html>".to_string(),
    )
    .await;

    let client = client();
    let crawler = CatalogueCrawler::new(client.clone(), start_url(&mock_server), fast_retry(1));
    let valuation = Valuer::new(client).run(crawler.into_stream()).await;

    assert_total(valuation.total, 21.00);
    assert_eq!(valuation.books_valued, 2);
    assert_eq!(valuation.books_failed, 1);
    assert!(valuation.is_complete());
}

#[tokio::test]
async fn test_fetch_page_without_session() {
    let mock_server = MockServer::start().await;
    serve(&mock_server, "/index.html", "<html>hello</html>".to_string()).await;
    Mock::given(method("GET"))
        .and(path("/broken.html"))
        .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
        .mount(&mock_server)
        .await;

    let ok = Url::parse(&format!("{}/index.html", mock_server.uri())).unwrap();
    let body = fetch_page(None, &ok).await.expect("Fetch failed");
    assert_eq!(body, "<html>hello</html>");

    let broken = Url::parse(&format!("{}/broken.html", mock_server.uri())).unwrap();
    let err = fetch_page(None, &broken).await.unwrap_err();
    assert_eq!(err.failure, FetchFailure::Status(500));
    assert_eq!(err.url, broken.to_string());
}

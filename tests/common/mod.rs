#![allow(dead_code)]

use std::time::Duration;

use trainset::{CleanedRow, FetcherConfig, PageScraper};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[macro_export]
macro_rules! assert_categories {
    (
        $(
            $test_name:ident : $raw:expr => $kind:expr
        ),+ $(,)?
    ) => {
        $(
            #[test]
            fn $test_name() {
                assert_that(&trainset::element::categorize($raw)).is_equal_to($kind);
            }
        )+
    }
}

/// Builds a row from raw cells, panicking on malformed input.
pub fn row(cells: &[&str]) -> CleanedRow {
    CleanedRow::from_cells(cells).expect("Expected a well-formed row.")
}

pub fn scraper() -> PageScraper {
    scraper_with_timeout(Duration::from_secs(5))
}

pub fn scraper_with_timeout(timeout: Duration) -> PageScraper {
    let config = FetcherConfig {
        timeout,
        ..FetcherConfig::default()
    };
    PageScraper::new(&config).expect("Expected HTTP client to build.")
}

/// Serves `body` with the given status and content type at `url_path`.
pub async fn mount_page(
    server: &MockServer,
    url_path: &str,
    status: u16,
    content_type: &str,
    body: &str,
) {
    Mock::given(method("GET"))
        .and(path(url_path))
        .respond_with(ResponseTemplate::new(status).set_body_raw(body, content_type))
        .mount(server)
        .await;
}

/// Serves a page that must never be requested.
pub async fn mount_untouchable_page(server: &MockServer, url_path: &str) {
    Mock::given(method("GET"))
        .and(path(url_path))
        .respond_with(ResponseTemplate::new(200).set_body_raw("unreachable", "text/plain"))
        .expect(0)
        .mount(server)
        .await;
}

//! RSVP guest count, derived from the public spreadsheet's CSV export.

use std::time::Duration;

use reqwest::Client;
use thiserror::Error;

/// Value shown when the fetch fails for any reason.
pub const FALLBACK_COUNT: &str = "0";

/// Request timeout for the one-shot fetch.
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum GuestError {
    #[error("guest sheet request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Shared slot the render loop reads while the fetch is in flight.
#[derive(Debug)]
pub struct GuestBoard {
    pub text: String,
    pub loading: bool,
}

impl GuestBoard {
    pub fn pending() -> Self {
        Self { text: String::new(), loading: true }
    }

    /// Write the final value and clear the loading marker.
    pub fn settle(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.loading = false;
    }
}

/// Build the client used for the single outbound read.
pub fn fetch_client() -> Result<Client, GuestError> {
    Ok(Client::builder().timeout(FETCH_TIMEOUT).build()?)
}

/// Fetch the CSV export once and count its data rows. The first row is
/// the header; an empty body counts as zero guests.
pub async fn fetch_guest_count(client: &Client, url: &str) -> Result<usize, GuestError> {
    let response = client.get(url).send().await?.error_for_status()?;
    let body = response.text().await?;
    Ok(count_data_rows(&body))
}

fn count_data_rows(body: &str) -> usize {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return 0;
    }
    trimmed.lines().count().saturating_sub(1)
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    async fn server_with_body(body: &str) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/export"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .expect(1)
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn counts_rows_below_the_header() {
        let server =
            server_with_body("Name,Phone\nAli,0123\nSiti,0145\nRahim,0167\n").await;
        let client = fetch_client().unwrap();

        let count =
            fetch_guest_count(&client, &format!("{}/export", server.uri())).await.unwrap();

        assert_eq!(count, 3);
    }

    #[tokio::test]
    async fn header_only_body_counts_zero() {
        let server = server_with_body("Name,Phone").await;
        let client = fetch_client().unwrap();

        let count =
            fetch_guest_count(&client, &format!("{}/export", server.uri())).await.unwrap();

        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn empty_body_counts_zero() {
        let server = server_with_body("").await;
        let client = fetch_client().unwrap();

        let count =
            fetch_guest_count(&client, &format!("{}/export", server.uri())).await.unwrap();

        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn crlf_rows_count_the_same() {
        let server = server_with_body("Name,Phone\r\nAli,0123\r\nSiti,0145\r\n").await;
        let client = fetch_client().unwrap();

        let count =
            fetch_guest_count(&client, &format!("{}/export", server.uri())).await.unwrap();

        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;
        let client = fetch_client().unwrap();

        let result = fetch_guest_count(&client, &server.uri()).await;

        assert!(matches!(result, Err(GuestError::Request(_))));
    }

    #[tokio::test]
    async fn unreachable_host_is_an_error() {
        // Bind and drop a listener so the port refuses connections.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = fetch_client().unwrap();

        let result = fetch_guest_count(&client, &format!("http://{}", addr)).await;

        assert!(result.is_err());
    }

    #[test]
    fn settle_clears_the_loading_marker() {
        let mut board = GuestBoard::pending();
        assert!(board.loading);

        board.settle(FALLBACK_COUNT);

        assert!(!board.loading);
        assert_eq!(board.text, "0");
    }
}

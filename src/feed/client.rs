use std::time::Duration;

use log::debug;

use super::{parse_states, BoundingBox, FeedError, RawAircraftState};

pub const DEFAULT_FEED_URL: &str = "https://opensky-network.org/api/states/all";

/// HTTP client for the bulk aircraft-state feed.
pub struct FeedClient {
    client: reqwest::Client,
    url: String,
    bounding_box: BoundingBox,
}

impl FeedClient {
    pub fn new(
        url: String,
        bounding_box: BoundingBox,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            url,
            bounding_box,
        })
    }

    /// Fetch one snapshot of every aircraft inside the bounding box.
    ///
    /// A successful response without any aircraft yields an empty vector;
    /// transport errors, non-success statuses and undecodable bodies are
    /// errors.
    pub async fn fetch_states(&self) -> Result<Vec<RawAircraftState>, FeedError> {
        let response = self
            .client
            .get(&self.url)
            .query(&self.bounding_box.query())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status));
        }

        let body = response.bytes().await?;
        let records = parse_states(&body)?;
        debug!("Fetched {} aircraft states from {}", records.len(), self.url);
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serves a single canned HTTP response and hands back the request head.
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/states/all", listener.local_addr().unwrap());

        let join = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&head).into_owned()
        });

        (url, join)
    }

    fn client_for(url: String) -> FeedClient {
        FeedClient::new(
            url,
            BoundingBox::LONDON_DHAKA,
            Duration::from_secs(5),
            "flight-o-mat-test",
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_error_status_is_fetch_failure() {
        let (url, server) = serve_once("503 Service Unavailable", "{}").await;
        let result = client_for(url).fetch_states().await;
        assert!(
            matches!(result, Err(FeedError::Status(s)) if s == reqwest::StatusCode::SERVICE_UNAVAILABLE),
            "unexpected result: {result:?}"
        );
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_request_carries_bounding_box() {
        let (url, server) = serve_once("200 OK", r#"{"time":1,"states":null}"#).await;
        client_for(url).fetch_states().await.unwrap();

        let head = server.await.unwrap();
        let request_line = head.lines().next().unwrap();
        assert!(request_line.starts_with("GET /states/all?"), "{request_line}");
        for param in ["lamin=20", "lomin=-10", "lamax=60", "lomax=95"] {
            assert!(request_line.contains(param), "{param} missing from {request_line}");
        }
    }

    #[tokio::test]
    async fn test_null_states_is_empty_snapshot() {
        let (url, server) = serve_once("200 OK", r#"{"time":1,"states":null}"#).await;
        let records = client_for(url).fetch_states().await.unwrap();
        assert!(records.is_empty());
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_garbage_body_is_decode_error() {
        let (url, server) = serve_once("200 OK", "not json").await;
        let result = client_for(url).fetch_states().await;
        assert!(matches!(result, Err(FeedError::Decode(_))), "unexpected result: {result:?}");
        server.await.unwrap();
    }
}

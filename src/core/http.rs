use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    header::ACCEPT,
    Client,
    Response,
};
use serde::Serialize;
use tracing::debug;

use crate::core::{
    AnalyzerError,
    OutputFormat,
};

const USER_AGENT: &str = concat!("text-analyzer/", env!("CARGO_PKG_VERSION"), " (+reqwest)");

/// The remote analysis service. Returns the raw response body.
#[async_trait]
pub trait AnalysisClient: Send + Sync {
    async fn analyze(&self, text: &str, format: OutputFormat) -> Result<String, AnalyzerError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequestBody<'a> {
    pub text: &'a str,
    pub output_format: OutputFormat,
}

pub struct HttpAnalysisClient {
    client: Client,
    endpoint: String,
}

impl HttpAnalysisClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, AnalyzerError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AnalyzerError::Custom(format!("HTTP client build failed: {e}")))?;

        Ok(Self { client, endpoint: endpoint.into() })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AnalysisClient for HttpAnalysisClient {
    async fn analyze(&self, text: &str, format: OutputFormat) -> Result<String, AnalyzerError> {
        debug!(endpoint = %self.endpoint, %format, bytes = text.len(), "Posting analysis request");

        let response = self
            .client
            .post(&self.endpoint)
            .header(ACCEPT, format.mime_type())
            .json(&AnalysisRequestBody { text, output_format: format })
            .send()
            .await?;

        ensure_success(&response)?;
        Ok(response.text().await?)
    }
}

fn ensure_success(resp: &Response) -> Result<(), AnalyzerError> {
    if !resp.status().is_success() {
        return Err(AnalyzerError::HttpStatus {
            status: resp.status().as_u16(),
            url: resp.url().to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use tokio::{
        io::{
            AsyncReadExt,
            AsyncWriteExt,
        },
        net::TcpListener,
    };

    use super::*;
    use crate::core::errors::ErrorKind;

    /// Accepts one connection, answers with `reply` and returns the request
    /// head and body it received.
    async fn serve_once(listener: TcpListener, reply: &'static str) -> (String, String) {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut received = Vec::new();
        let mut chunk = [0u8; 1024];

        let request = loop {
            let read = socket.read(&mut chunk).await.unwrap();
            received.extend_from_slice(&chunk[..read]);

            let text = String::from_utf8_lossy(&received).into_owned();
            if let Some((head, body)) = text.split_once("\r\n\r\n") {
                let length = head
                    .lines()
                    .filter_map(|line| line.split_once(':'))
                    .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
                    .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if body.len() >= length {
                    break (head.to_string(), body[..length].to_string());
                }
            }
            assert!(read > 0, "connection closed before the request was complete");
        };

        socket.write_all(reply.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
        request
    }

    #[test]
    fn test_request_body_shape() {
        let body =
            AnalysisRequestBody { text: "The quick brown fox", output_format: OutputFormat::Xml };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"text":"The quick brown fox","outputFormat":"xml"}"#
        );
    }

    #[tokio::test]
    async fn test_error_status_is_network_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = format!("http://{}/api/textanalysis", listener.local_addr().unwrap());
        let server = tokio::spawn(serve_once(
            listener,
            "HTTP/1.1 500 Internal Server Error\r\n\
             content-type: text/plain\r\n\
             content-length: 5\r\n\
             connection: close\r\n\r\n\
             oops!",
        ));

        // No proxy: the listener is local.
        let client = HttpAnalysisClient {
            client: Client::builder().no_proxy().build().unwrap(),
            endpoint,
        };
        let err = client.analyze("The quick brown fox", OutputFormat::Xml).await.unwrap_err();

        assert!(matches!(err, AnalyzerError::HttpStatus { status: 500, .. }), "got {err:?}");
        assert_eq!(err.kind(), ErrorKind::NetworkFailure);

        let (head, body) = server.await.unwrap();
        assert!(head.starts_with("POST /api/textanalysis"));
        assert!(head.to_ascii_lowercase().contains("accept: application/xml"));
        let body: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "text": "The quick brown fox", "outputFormat": "xml" })
        );
    }

    #[tokio::test]
    async fn test_unreachable_service_is_network_failure() {
        // Nothing listens on the discard port of the loopback interface.
        let client =
            HttpAnalysisClient::new("http://127.0.0.1:9/api/textanalysis", Duration::from_secs(2))
                .unwrap();

        let err = client.analyze("abc", OutputFormat::Json).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NetworkFailure);
    }
}

use crate::cache::{Clock, SystemClock};
use crate::errors::{TransportError, VerifierError};
use crate::results::{AnalysisRequest, AnalysisResult, PageContent};
use std::sync::Arc;
use std::time::Duration;

/// Posts page content to the verification service and parses its verdicts
#[derive(Clone)]
pub struct AnalysisClient {
    client: reqwest::Client,
    endpoint: String,
    clock: Arc<dyn Clock>,
}

impl AnalysisClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, VerifierError> {
        Self::with_clock(endpoint, timeout, Arc::new(SystemClock))
    }

    /// Fails when the HTTP client cannot be built, for example without a usable TLS backend
    pub fn with_clock(
        endpoint: impl Into<String>,
        timeout: Duration,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, VerifierError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| VerifierError::Config(format!("http client: {}", e)))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            clock,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Build a request for a page, stamped with the current time
    pub fn request_for(&self, page: &PageContent) -> AnalysisRequest {
        AnalysisRequest::from_page(page, self.clock.now())
    }

    /// Stamp and submit a page
    pub async fn analyze(&self, page: &PageContent) -> Result<AnalysisResult, TransportError> {
        self.submit(&self.request_for(page)).await
    }

    /// Submit a request and parse the response body as an analysis result
    pub async fn submit(&self, request: &AnalysisRequest) -> Result<AnalysisResult, TransportError> {
        ::log::debug!(
            "Submitting {} characters from {} to {}",
            request.content.chars().count(),
            request.url,
            self.endpoint
        );

        let resp = self
            .client
            .post(&self.endpoint)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            ::log::warn!("Verification service returned status {}", status);
            return Err(TransportError::Rejected {
                status: status.as_u16(),
            });
        }

        let body = resp.text().await?;
        let result: AnalysisResult = serde_json::from_str(&body)
            .map_err(|e| TransportError::Malformed(e.to_string()))?;

        ::log::info!(
            "Verification service returned {} claims for {}",
            result.claims.len(),
            request.url
        );
        Ok(result)
    }
}

impl std::fmt::Debug for AnalysisClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisClient")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::FixedClock;
    use crate::errors::TransportErrorKind;
    use crate::results::{ContentType, Verdict};
    use chrono::{TimeZone, Utc};
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn page() -> PageContent {
        PageContent::new(
            "https://news.example/story".into(),
            "Story".into(),
            ContentType::Article,
            "The moon is made of cheese.".into(),
        )
    }

    fn client_for(server: &MockServer) -> AnalysisClient {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        AnalysisClient::with_clock(
            format!("{}/webhook/verify", server.uri()),
            Duration::from_secs(5),
            Arc::new(FixedClock(at)),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn posts_request_body_and_parses_claims() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/webhook/verify"))
            .and(header("content-type", "application/json"))
            .and(body_partial_json(serde_json::json!({
                "url": "https://news.example/story",
                "title": "Story",
                "content": "The moon is made of cheese.",
                "timestamp": "2024-05-01T12:00:00Z"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "claims": [{
                    "text": "The moon is made of cheese.",
                    "verdict": "REFUTED",
                    "confidence": 98,
                    "evidence": "Lunar samples are rock."
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = client_for(&server).analyze(&page()).await.unwrap();
        assert_eq!(result.claims.len(), 1);
        assert_eq!(result.claims[0].verdict, Verdict::Refuted);
        assert_eq!(result.claims[0].confidence, 98);
    }

    #[tokio::test]
    async fn server_error_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = client_for(&server).analyze(&page()).await.unwrap_err();
        assert_eq!(err.kind(), TransportErrorKind::Rejected { status: 500 });
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn unparsable_body_is_a_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).analyze(&page()).await.unwrap_err();
        assert_eq!(err.kind(), TransportErrorKind::Malformed);
    }

    #[tokio::test]
    async fn empty_claims_is_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"claims": []})))
            .mount(&server)
            .await;

        let result = client_for(&server).analyze(&page()).await.unwrap();
        assert!(result.claims.is_empty());
    }

    #[tokio::test]
    async fn closed_port_is_unreachable() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client =
            AnalysisClient::new(format!("http://{}/verify", addr), Duration::from_secs(5)).unwrap();
        let err = client.analyze(&page()).await.unwrap_err();
        assert!(err.is_unreachable(), "unexpected error: {}", err);
    }

    #[test]
    fn builds_with_a_timeout() {
        let client =
            AnalysisClient::new("http://localhost:5678/webhook/verify", Duration::from_secs(1)).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:5678/webhook/verify");
    }
}

use crate::bridge::{AgentHandle, BridgeMessage, BridgeResponse};
use crate::cache::{AnalysisCache, CachedAnalysis};
use crate::errors::VerifierError;
use crate::extractors::{ExtractOptions, text};
use crate::results::{AnalysisResult, ContentType, PageContent};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// The user-facing side of the bridge
///
/// One flow runs at a time per instance. Separate instances do not coordinate.
#[derive(Clone)]
pub struct UiAgent {
    coordinator: AgentHandle,
    cache: Option<AnalysisCache>,
    options: ExtractOptions,
    in_flight: Arc<AtomicBool>,
}

impl UiAgent {
    pub fn new(coordinator: AgentHandle, cache: Option<AnalysisCache>, options: ExtractOptions) -> Self {
        Self {
            coordinator,
            cache,
            options,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// The cached analysis for `url`, so an already analyzed page can be shown without a round trip
    pub fn cached_result(&self, url: &str) -> Option<CachedAnalysis> {
        self.cache.as_ref().and_then(|cache| cache.lookup(url))
    }

    /// Whether a flow started by this instance is still running
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Extract the active page without analyzing it
    pub async fn extract_active_page(&self) -> Result<PageContent, VerifierError> {
        let _flight = InFlight::begin(&self.in_flight)?;
        match self.coordinator.send(BridgeMessage::ExtractContent).await? {
            BridgeResponse::Extracted(page) => Ok(page),
            other => Err(unexpected(other)),
        }
    }

    /// Extract the active page and analyze it
    pub async fn analyze_active_page(&self) -> Result<AnalysisResult, VerifierError> {
        self.run(BridgeMessage::AnalyzeContent(None)).await
    }

    /// Analyze content that is already extracted
    pub async fn analyze_content(&self, page: PageContent) -> Result<AnalysisResult, VerifierError> {
        self.run(BridgeMessage::AnalyzeContent(Some(page))).await
    }

    /// Analyze pasted text
    pub async fn analyze_text(&self, input: &str) -> Result<AnalysisResult, VerifierError> {
        let content = text::truncate_chars(input.trim(), self.options.max_content_length);
        self.analyze_content(PageContent::new(
            String::new(),
            String::new(),
            ContentType::Generic,
            content,
        ))
        .await
    }

    /// Analyze a page the service should look up by URL
    pub async fn analyze_url(&self, url: &str, title: &str) -> Result<AnalysisResult, VerifierError> {
        self.analyze_content(PageContent::new(
            url.to_string(),
            title.to_string(),
            ContentType::Generic,
            String::new(),
        ))
        .await
    }

    async fn run(&self, message: BridgeMessage) -> Result<AnalysisResult, VerifierError> {
        let _flight = InFlight::begin(&self.in_flight)?;
        match self.coordinator.send(message).await? {
            BridgeResponse::Analyzed(result) => Ok(result),
            other => Err(unexpected(other)),
        }
    }
}

/// Holds the in-flight flag of a `UiAgent` until dropped
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn begin(flag: &'a AtomicBool) -> Result<Self, VerifierError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| InFlight(flag))
            .map_err(|_| VerifierError::Busy)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

fn unexpected(response: BridgeResponse) -> VerifierError {
    match response {
        BridgeResponse::Failure(error) => VerifierError::Remote(error),
        other => VerifierError::Protocol(format!("unexpected reply {:?}", other)),
    }
}

/// User guidance for a failure message, when the message says more than itself
pub fn failure_hint(error: &str) -> Option<&'static str> {
    let lower = error.to_lowercase();
    if lower.contains("service unreachable") || lower.contains("service timed out") {
        Some("Could not reach the verification service. Make sure it is running.")
    } else if lower.contains("service returned status") {
        Some("The verification service rejected the request.")
    } else if lower.contains("browser unavailable") {
        Some("Could not reach the WebDriver server. Start one or analyze a saved file with --html-file.")
    } else if lower.contains("no active page") {
        Some("Open a page first.")
    } else {
        None
    }
}

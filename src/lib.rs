// Re-export modules
pub mod bridge;
pub mod cache;
pub mod classifier;
pub mod client;
pub mod config;
pub mod errors;
pub mod extractors;
pub mod page;
pub mod results;

// Re-export commonly used types for convenience
pub use errors::{TransportError, VerifierError};
pub use results::{AnalysisResult, Claim, ContentType, PageContent, Verdict};

use bridge::{ActivePage, AgentHandle, Coordinator, PageAgent, UiAgent};
use cache::{AnalysisCache, Clock, SystemClock};
use classifier::Classifier;
use client::AnalysisClient;
use extractors::ExtractOptions;
use page::PageSource;
use std::sync::Arc;

/// Main builder wiring the page agent, coordinator and UI agents together
pub struct Verifier {
    config: config::VerifierConfig,
    clock: Arc<dyn Clock>,
}

impl Verifier {
    /// Create a new Verifier builder with the given configuration
    pub fn new(config: config::VerifierConfig) -> Self {
        Self {
            config,
            clock: Arc::new(SystemClock),
        }
    }

    /// Load configuration from a file
    pub fn from_config_file(
        path: impl AsRef<std::path::Path>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self::new(config::VerifierConfig::from_file(path)?))
    }

    /// Load configuration from a string
    pub fn from_config_str(config_str: &str) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self::new(config::VerifierConfig::from_json(config_str)?))
    }

    /// Point analysis requests at a different endpoint
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.config.endpoint = endpoint.to_string();
        self
    }

    /// Set the maximum number of extracted characters
    pub fn with_max_content_length(mut self, max_content_length: usize) -> Self {
        self.config.max_content_length = max_content_length;
        self
    }

    /// Use a specific clock for request and cache timestamps
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &config::VerifierConfig {
        &self.config
    }

    /// Validate the configuration and start the coordinator
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(self) -> Result<Session, VerifierError> {
        self.config.validate()?;

        let classifier = Classifier::new(&self.config.video_url_patterns)
            .map_err(|e| VerifierError::Config(format!("video url pattern: {}", e)))?;
        let options = ExtractOptions {
            max_content_length: self.config.max_content_length,
        };
        let cache = self
            .config
            .cache_enabled
            .then(|| AnalysisCache::new(Arc::clone(&self.clock)));
        let client = AnalysisClient::with_clock(
            self.config.endpoint.clone(),
            self.config.request_timeout(),
            Arc::clone(&self.clock),
        )?;

        let active_page = ActivePage::new();
        let coordinator = Coordinator::new(active_page.clone(), client, cache.clone()).spawn();
        ::log::info!("Verifier started, endpoint {}", self.config.endpoint);

        Ok(Session {
            coordinator,
            active_page,
            cache,
            classifier: Arc::new(classifier),
            options,
        })
    }
}

/// A running set of agents
pub struct Session {
    coordinator: AgentHandle,
    active_page: ActivePage,
    cache: Option<AnalysisCache>,
    classifier: Arc<Classifier>,
    options: ExtractOptions,
}

impl Session {
    /// Start a page agent for `source` and make it the active page
    pub fn attach_page(&self, source: Arc<dyn PageSource>) -> AgentHandle {
        let agent = PageAgent::new(source, Arc::clone(&self.classifier), self.options).spawn();
        self.active_page.set(agent.clone());
        agent
    }

    /// Forget the active page
    pub fn detach_page(&self) {
        self.active_page.clear();
    }

    /// A new UI agent talking to this session's coordinator
    pub fn ui(&self) -> UiAgent {
        UiAgent::new(self.coordinator.clone(), self.cache.clone(), self.options)
    }

    pub fn coordinator(&self) -> &AgentHandle {
        &self.coordinator
    }

    pub fn cache(&self) -> Option<&AnalysisCache> {
        self.cache.as_ref()
    }
}

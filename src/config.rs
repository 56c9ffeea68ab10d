use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;
use url::Url;

use crate::errors::VerifierError;

/// Configuration for the verification pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifierConfig {
    /// Verification service endpoint that analysis requests are posted to
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Maximum number of characters of extracted content
    #[serde(default = "default_max_content_length")]
    pub max_content_length: usize,

    /// Transport timeout for a single analysis request
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Regex patterns for URLs of video watch pages
    #[serde(default = "default_video_url_patterns")]
    pub video_url_patterns: Vec<String>,

    /// Whether successful results are kept in the last-analysis cache
    #[serde(default = "default_cache_enabled")]
    pub cache_enabled: bool,
}

/// Default value for endpoint
fn default_endpoint() -> String {
    "http://localhost:5678/webhook/suspectai".to_string()
}

/// Default value for max_content_length
fn default_max_content_length() -> usize {
    10_000
}

fn default_request_timeout_secs() -> u64 {
    60
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_video_url_patterns() -> Vec<String> {
    vec![r"^https?://(www\.|m\.)?youtube\.com/watch".to_string()]
}

fn default_cache_enabled() -> bool {
    true
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            max_content_length: default_max_content_length(),
            request_timeout_secs: default_request_timeout_secs(),
            webdriver_url: default_webdriver_url(),
            video_url_patterns: default_video_url_patterns(),
            cache_enabled: default_cache_enabled(),
        }
    }
}

impl VerifierConfig {
    /// Create a configuration with default values pointing at the given endpoint
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            ..Self::default()
        }
    }

    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, Box<dyn Error>> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply VERIFIER_ENDPOINT and WEBDRIVER_URL overrides when set
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(endpoint) = std::env::var("VERIFIER_ENDPOINT") {
            if !endpoint.is_empty() {
                self.endpoint = endpoint;
            }
        }
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                self.webdriver_url = webdriver_url;
            }
        }
        self
    }

    /// Check the endpoint and limits for obvious mistakes
    pub fn validate(&self) -> Result<(), VerifierError> {
        let endpoint = Url::parse(&self.endpoint)
            .map_err(|e| VerifierError::Config(format!("endpoint {}: {}", self.endpoint, e)))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(VerifierError::Config(format!(
                "endpoint must be http(s), got {}",
                endpoint.scheme()
            )));
        }
        if self.max_content_length == 0 {
            return Err(VerifierError::Config(
                "max_content_length must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

use crate::errors::VerifierError;
use async_trait::async_trait;
use fantoccini::{Client, ClientBuilder};

/// The document of a page at one point in time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSnapshot {
    /// URL of the page
    pub url: String,

    /// Document title
    pub title: String,

    /// Serialized document
    pub html: String,
}

impl PageSnapshot {
    pub fn new(url: impl Into<String>, title: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            html: html.into(),
        }
    }
}

/// Gives a page agent access to the document it is bound to
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Capture the current document
    async fn snapshot(&self) -> Result<PageSnapshot, VerifierError>;
}

/// A fixed document, such as a saved HTML file
#[derive(Debug, Clone)]
pub struct StaticPage {
    snapshot: PageSnapshot,
}

impl StaticPage {
    pub fn new(snapshot: PageSnapshot) -> Self {
        Self { snapshot }
    }

    /// Build from raw HTML, taking the title from the document's `<title>`
    pub fn from_html(url: impl Into<String>, html: impl Into<String>) -> Self {
        let html = html.into();
        let title = document_title(&html);
        Self::new(PageSnapshot::new(url, title, html))
    }
}

#[async_trait]
impl PageSource for StaticPage {
    async fn snapshot(&self) -> Result<PageSnapshot, VerifierError> {
        Ok(self.snapshot.clone())
    }
}

fn document_title(html: &str) -> String {
    let doc = scraper::Html::parse_document(html);
    let selector = scraper::Selector::parse("title").expect("title selector is valid");
    doc.select(&selector)
        .next()
        .map(crate::extractors::text::element_text)
        .unwrap_or_default()
}

/// The active tab of a browser driven over WebDriver
pub struct WebDriverPage {
    client: Client,
}

impl WebDriverPage {
    /// Connects to the WebDriver instance
    pub async fn connect(webdriver_url: &str) -> Result<Self, VerifierError> {
        match ClientBuilder::native().connect(webdriver_url).await {
            Ok(client) => {
                ::log::debug!("Connected to WebDriver at {}", webdriver_url);
                Ok(Self { client })
            }
            Err(e) => {
                ::log::error!("Failed to connect to WebDriver at {}: {}", webdriver_url, e);
                Err(VerifierError::Browser(format!("{}: {}", webdriver_url, e)))
            }
        }
    }

    /// Navigate the active tab to a URL
    pub async fn open(&self, url: &str) -> Result<(), VerifierError> {
        self.client
            .goto(url)
            .await
            .map_err(|e| VerifierError::Extraction(format!("navigating to {}: {}", url, e)))
    }

    /// End the WebDriver session
    pub async fn close(&self) {
        if let Err(e) = self.client.clone().close().await {
            ::log::warn!("Failed to close WebDriver client: {}", e);
        }
    }
}

#[async_trait]
impl PageSource for WebDriverPage {
    async fn snapshot(&self) -> Result<PageSnapshot, VerifierError> {
        let url = self
            .client
            .current_url()
            .await
            .map_err(|e| VerifierError::Extraction(format!("reading current url: {}", e)))?;
        let title = self
            .client
            .title()
            .await
            .map_err(|e| VerifierError::Extraction(format!("reading title: {}", e)))?;
        let html = self
            .client
            .source()
            .await
            .map_err(|e| VerifierError::Extraction(format!("getting source: {}", e)))?;

        Ok(PageSnapshot::new(url.to_string(), title, html))
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Kind of page content, decided once per extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Video,
    Article,
    Generic,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Video => "video",
            ContentType::Article => "article",
            ContentType::Generic => "generic",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classified, bounded text pulled out of a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContent {
    /// URL of the page
    pub url: String,

    /// Document title
    pub title: String,

    /// Content type the extraction strategy was chosen by
    #[serde(rename = "type")]
    pub content_type: ContentType,

    /// Plain text content, never longer than the configured maximum
    pub content: String,
}

impl PageContent {
    pub fn new(url: String, title: String, content_type: ContentType, content: String) -> Self {
        Self {
            url,
            title,
            content_type,
            content,
        }
    }
}

/// Body posted to the verification service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub url: String,
    pub title: String,
    pub content: String,
    /// Assigned at send time
    pub timestamp: DateTime<Utc>,
}

impl AnalysisRequest {
    pub fn from_page(page: &PageContent, timestamp: DateTime<Utc>) -> Self {
        Self {
            url: page.url.clone(),
            title: page.title.clone(),
            content: page.content.clone(),
            timestamp,
        }
    }
}

/// Truth status of a single claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Supported,
    Refuted,
    #[default]
    Unclear,
}

impl Verdict {
    /// Case-insensitive; anything that is not supported or refuted is unclear
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "supported" => Verdict::Supported,
            "refuted" => Verdict::Refuted,
            _ => Verdict::Unclear,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Supported => "supported",
            Verdict::Refuted => "refuted",
            Verdict::Unclear => "unclear",
        }
    }
}

impl<'de> Deserialize<'de> for Verdict {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(raw) => Verdict::parse(&raw),
            _ => Verdict::Unclear,
        })
    }
}

/// A claim found by the verification service together with its verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    #[serde(default, alias = "claim", deserialize_with = "nullable_string")]
    pub text: String,

    #[serde(default)]
    pub verdict: Verdict,

    /// 0 to 100
    #[serde(default, deserialize_with = "confidence")]
    pub confidence: u8,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
}

fn nullable_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn confidence<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let raw = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').parse::<f64>().ok(),
        _ => None,
    };
    Ok(raw
        .filter(|v| v.is_finite())
        .map(|v| v.clamp(0.0, 100.0).round() as u8)
        .unwrap_or(0))
}

fn nullable_claims<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Claim>, D::Error> {
    Ok(Option::<Vec<Claim>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parsed verification service response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default, deserialize_with = "nullable_claims")]
    pub claims: Vec<Claim>,
}

/// Per-verdict claim counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VerdictTally {
    pub supported: usize,
    pub refuted: usize,
    pub unclear: usize,
}

/// What a result amounts to for display purposes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The service found nothing to verify; not an error
    NoClaims,
    Claims(VerdictTally),
}

impl AnalysisResult {
    pub fn tally(&self) -> VerdictTally {
        self.claims
            .iter()
            .fold(VerdictTally::default(), |mut tally, claim| {
                match claim.verdict {
                    Verdict::Supported => tally.supported += 1,
                    Verdict::Refuted => tally.refuted += 1,
                    Verdict::Unclear => tally.unclear += 1,
                }
                tally
            })
    }

    pub fn outcome(&self) -> Outcome {
        if self.claims.is_empty() {
            Outcome::NoClaims
        } else {
            Outcome::Claims(self.tally())
        }
    }
}

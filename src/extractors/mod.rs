pub mod article;
pub mod generic;
pub mod text;
pub mod video;

#[cfg(test)]
mod tests;

use crate::classifier::{Classifier, PageSignals};
use crate::page::PageSnapshot;
use crate::results::{ContentType, PageContent};
use scraper::{Html, Selector};
use std::sync::LazyLock;

static META_DESCRIPTION: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"meta[name="description"]"#).expect("meta selector is valid")
});

/// A per-type extraction strategy: document in, ordered text sections out
pub type Strategy = fn(&Html) -> Vec<String>;

/// Options shared by every strategy
#[derive(Debug, Clone, Copy)]
pub struct ExtractOptions {
    /// Maximum number of characters in the joined content
    pub max_content_length: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            max_content_length: 10_000,
        }
    }
}

/// Strategy table keyed by content type
pub fn strategy(content_type: ContentType) -> Strategy {
    match content_type {
        ContentType::Video => video::sections,
        ContentType::Article => article::sections,
        ContentType::Generic => generic::sections,
    }
}

/// Extracts bounded plain text from a parsed document with the strategy for `content_type`
///
/// Never fails: missing elements contribute nothing and the result may be empty.
pub fn extract(doc: &Html, content_type: ContentType, options: &ExtractOptions) -> String {
    let sections = strategy(content_type)(doc);
    ::log::debug!(
        "{} strategy produced {} sections",
        content_type,
        sections.len()
    );
    text::truncate_chars(&text::join_sections(&sections), options.max_content_length)
}

/// Classifies a snapshot and extracts its content in one pass over the parsed document
pub fn extract_page(
    snapshot: &PageSnapshot,
    classifier: &Classifier,
    options: &ExtractOptions,
) -> PageContent {
    let doc = Html::parse_document(&snapshot.html);
    let content_type = classifier.classify(&PageSignals {
        url: &snapshot.url,
        document: &doc,
    });
    let content = extract(&doc, content_type, options);

    ::log::info!(
        "Extracted {} characters of {} content from {}",
        text::char_len(&content),
        content_type,
        snapshot.url
    );

    PageContent::new(
        snapshot.url.clone(),
        snapshot.title.clone(),
        content_type,
        content,
    )
}

/// Trimmed `content` of `<meta name="description">`, if present and non-empty
pub(crate) fn meta_description(doc: &Html) -> Option<String> {
    doc.select(&META_DESCRIPTION)
        .next()
        .and_then(|meta| meta.value().attr("content"))
        .map(text::normalize_whitespace_in_segment)
        .filter(|content| !content.is_empty())
}

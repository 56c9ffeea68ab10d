use crate::extractors::meta_description;
use crate::extractors::text::{element_text, paragraph_text};
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

/// Paragraphs must be longer than this to count as article text
pub const MIN_PARAGRAPH_CHARS: usize = 20;

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("article selector is valid")
}

/// Content containers, most specific first
static CONTAINERS: LazyLock<[Selector; 3]> = LazyLock::new(|| {
    [
        selector("article"),
        selector(r#"[itemtype*="Article"]"#),
        selector("main"),
    ]
});
static HEADINGS: LazyLock<Selector> = LazyLock::new(|| selector("h1, h2, h3"));
static PARAGRAPHS: LazyLock<Selector> = LazyLock::new(|| selector("p"));

fn container(doc: &Html) -> Option<ElementRef<'_>> {
    CONTAINERS.iter().find_map(|s| doc.select(s).next())
}

/// Headings then paragraphs of the article container, or the meta description
pub fn sections(doc: &Html) -> Vec<String> {
    let mut sections = Vec::new();

    if let Some(root) = container(doc) {
        sections.extend(
            root.select(&HEADINGS)
                .map(element_text)
                .filter(|t| !t.is_empty()),
        );
        sections.extend(
            root.select(&PARAGRAPHS)
                .filter_map(|p| paragraph_text(p, MIN_PARAGRAPH_CHARS)),
        );
    } else {
        ::log::debug!("No article container found");
    }

    if sections.is_empty() {
        sections.extend(meta_description(doc));
    }

    sections
}

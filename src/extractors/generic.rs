use crate::extractors::meta_description;
use crate::extractors::text::paragraph_text;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

/// Generic pages are noisier, so the paragraph threshold is stricter than for articles
pub const MIN_PARAGRAPH_CHARS: usize = 30;

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("generic selector is valid")
}

static ROOTS: LazyLock<[Selector; 4]> = LazyLock::new(|| {
    [
        selector("main"),
        selector("#content"),
        selector(".content"),
        selector("body"),
    ]
});
static PARAGRAPHS: LazyLock<Selector> = LazyLock::new(|| selector("p"));

fn content_root(doc: &Html) -> ElementRef<'_> {
    ROOTS
        .iter()
        .find_map(|s| doc.select(s).next())
        .unwrap_or_else(|| doc.root_element())
}

/// Meta description followed by the substantial paragraphs of the best content root
pub fn sections(doc: &Html) -> Vec<String> {
    let mut sections: Vec<String> = meta_description(doc).into_iter().collect();

    sections.extend(
        content_root(doc)
            .select(&PARAGRAPHS)
            .filter_map(|p| paragraph_text(p, MIN_PARAGRAPH_CHARS)),
    );

    sections
}

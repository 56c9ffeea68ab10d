use crate::extractors::text::element_text;
use scraper::{Html, Selector};
use std::sync::LazyLock;

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("video selector is valid")
}

static TITLE: LazyLock<Selector> = LazyLock::new(|| {
    selector("h1.ytd-video-primary-info-renderer, h1.ytd-watch-metadata, h1.title")
});
static DESCRIPTION: LazyLock<Selector> =
    LazyLock::new(|| selector("#description-inline-expander, #description"));
static CHANNEL: LazyLock<Selector> =
    LazyLock::new(|| selector("#channel-name a, ytd-channel-name a"));
static TRANSCRIPT_SEGMENTS: LazyLock<Selector> =
    LazyLock::new(|| selector("ytd-transcript-segment-renderer .segment-text"));

/// Title, description, channel and transcript of a video watch page, in that order
pub fn sections(doc: &Html) -> Vec<String> {
    let mut sections = Vec::new();

    let labelled = [
        ("Title", &*TITLE),
        ("Description", &*DESCRIPTION),
        ("Channel", &*CHANNEL),
    ];
    for (label, selector) in labelled {
        if let Some(text) = doc
            .select(selector)
            .next()
            .map(element_text)
            .filter(|t| !t.is_empty())
        {
            sections.push(format!("{}: {}", label, text));
        }
    }

    let transcript = doc
        .select(&TRANSCRIPT_SEGMENTS)
        .map(element_text)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>();
    if !transcript.is_empty() {
        ::log::debug!("Found {} transcript segments", transcript.len());
        sections.push(format!("Transcript: {}", transcript.join(" ")));
    }

    sections
}

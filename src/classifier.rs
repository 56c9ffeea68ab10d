use crate::results::ContentType;
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;

static ARTICLE_SIGNALS: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(
        r#"article, [itemtype*="Article"], [itemtype*="NewsArticle"], [itemtype*="BlogPosting"]"#,
    )
    .expect("article signal selector is valid")
});

/// What the classifier looks at: the page URL and its parsed document
pub struct PageSignals<'a> {
    pub url: &'a str,
    pub document: &'a Html,
}

/// Decides the content type of a page
///
/// Video URL patterns are checked first so DOM queries are skipped for watch pages.
#[derive(Debug)]
pub struct Classifier {
    video_patterns: Vec<Regex>,
}

impl Classifier {
    /// Compile a classifier from video URL regex patterns
    pub fn new(video_patterns: &[String]) -> Result<Self, regex::Error> {
        let mut compiled = Vec::with_capacity(video_patterns.len());
        for pattern in video_patterns {
            compiled.push(Regex::new(pattern)?);
        }
        Ok(Self {
            video_patterns: compiled,
        })
    }

    /// Classify a page; always returns a type
    pub fn classify(&self, signals: &PageSignals<'_>) -> ContentType {
        if self.is_video_url(signals.url) {
            ::log::debug!("Classifying as video: {}", signals.url);
            return ContentType::Video;
        }

        if signals.document.select(&ARTICLE_SIGNALS).next().is_some() {
            ::log::debug!("Classifying as article: {}", signals.url);
            return ContentType::Article;
        }

        ::log::debug!("Classifying as generic: {}", signals.url);
        ContentType::Generic
    }

    pub fn is_video_url(&self, url: &str) -> bool {
        self.video_patterns.iter().any(|re| re.is_match(url))
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(&crate::config::VerifierConfig::default().video_url_patterns)
            .expect("Default video patterns should be valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(url: &str, html: &str) -> ContentType {
        let document = Html::parse_document(html);
        Classifier::default().classify(&PageSignals {
            url,
            document: &document,
        })
    }

    #[test]
    fn test_video_url_wins_over_dom() {
        let html = "<html><body><article><p>An article body</p></article></body></html>";
        assert_eq!(
            classify("https://www.youtube.com/watch?v=abc123", html),
            ContentType::Video
        );
        assert_eq!(
            classify("https://m.youtube.com/watch?v=abc123", "<html></html>"),
            ContentType::Video
        );
    }

    #[test]
    fn test_article_signals() {
        let cases = [
            "<article><p>x</p></article>",
            r#"<div itemtype="https://schema.org/Article">x</div>"#,
            r#"<div itemtype="https://schema.org/NewsArticle">x</div>"#,
            r#"<div itemtype="https://schema.org/BlogPosting">x</div>"#,
        ];
        for body in cases {
            let html = format!("<html><body>{}</body></html>", body);
            assert_eq!(
                classify("https://news.example/story", &html),
                ContentType::Article,
                "body {}",
                body
            );
        }
    }

    #[test]
    fn test_generic_fallback() {
        assert_eq!(
            classify(
                "https://example.com/about",
                "<html><body><main><p>Hello</p></main></body></html>"
            ),
            ContentType::Generic
        );
        // Channel pages are not watch pages
        assert_eq!(
            classify("https://www.youtube.com/@channel", "<html></html>"),
            ContentType::Generic
        );
    }

    #[test]
    fn test_custom_video_patterns() {
        let classifier = Classifier::new(&[r"vimeo\.com/\d+".to_string()]).unwrap();
        assert!(classifier.is_video_url("https://vimeo.com/12345"));
        assert!(!classifier.is_video_url("https://www.youtube.com/watch?v=x"));
        assert!(Classifier::new(&["(".to_string()]).is_err());
    }
}

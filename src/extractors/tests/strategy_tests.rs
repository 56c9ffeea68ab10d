use crate::extractors::{ExtractOptions, extract};
use crate::results::ContentType;
use scraper::Html;

fn run(html: &str, content_type: ContentType) -> String {
    extract(
        &Html::parse_document(html),
        content_type,
        &ExtractOptions::default(),
    )
}

/// A string of exactly `n` characters that reads like a sentence
fn sentence(n: usize) -> String {
    let base = "The quick brown fox jumps over the lazy dog again and again ";
    base.chars().cycle().take(n).collect::<String>().replace(' ', "x")
}

#[cfg(test)]
mod article_tests {
    use super::*;

    #[test]
    fn test_headings_then_long_paragraphs() {
        let p5 = sentence(5);
        let p40 = sentence(40);
        let p60 = sentence(60);
        let html = format!(
            "<html><body><article>\
             <h1>heading1</h1><p>{}</p><h2>heading2</h2><p>{}</p><p>{}</p>\
             </article></body></html>",
            p5, p40, p60
        );

        let content = run(&html, ContentType::Article);
        assert_eq!(content, format!("heading1\n\nheading2\n\n{}\n\n{}", p40, p60));
    }

    #[test]
    fn test_paragraph_threshold_is_exclusive() {
        let p20 = sentence(20);
        let p21 = sentence(21);
        let html = format!(
            "<html><body><article><p>{}</p><p>{}</p></article></body></html>",
            p20, p21
        );
        assert_eq!(run(&html, ContentType::Article), p21);
    }

    #[test]
    fn test_threshold_counts_inner_whitespace() {
        // Trimmed length 25, collapsed length 20
        let html = "<html><body><article>\n  <p>\n      aaaa      bbbb ccccc dddd\n    </p>\n\
                    <p>\n      {p20}\n    </p></article></body></html>"
            .replace("{p20}", &sentence(20));
        assert_eq!(run(&html, ContentType::Article), "aaaa bbbb ccccc dddd");
    }

    #[test]
    fn test_container_priority() {
        let inside = sentence(30);
        let outside = sentence(35);
        let html = format!(
            "<html><body><main><p>{}</p><article><p>{}</p></article></main></body></html>",
            outside, inside
        );
        // The explicit article container wins over main
        assert_eq!(run(&html, ContentType::Article), inside);

        let html = format!(
            r#"<html><body><main><p>{}</p></main><div itemtype="https://schema.org/NewsArticle"><p>{}</p></div></body></html>"#,
            outside, inside
        );
        assert_eq!(run(&html, ContentType::Article), inside);

        let html = format!(
            "<html><body><main><p>{}</p></main></body></html>",
            outside
        );
        assert_eq!(run(&html, ContentType::Article), outside);
    }

    #[test]
    fn test_meta_description_fallback() {
        let html = r#"<html><head><meta name="description" content="  A page about things. "></head>
            <body><article><p>short</p></article></body></html>"#;
        assert_eq!(run(html, ContentType::Article), "A page about things.");
    }

    #[test]
    fn test_nothing_found_is_empty() {
        assert_eq!(run("<html><body></body></html>", ContentType::Article), "");
    }
}

#[cfg(test)]
mod generic_tests {
    use super::*;

    #[test]
    fn test_meta_then_paragraphs() {
        let p25 = sentence(25);
        let p31 = sentence(31);
        let html = format!(
            r#"<html><head><meta name="description" content="Site blurb"></head>
            <body><main><p>{}</p><p>{}</p></main></body></html>"#,
            p25, p31
        );
        assert_eq!(
            run(&html, ContentType::Generic),
            format!("Site blurb\n\n{}", p31)
        );
    }

    #[test]
    fn test_threshold_counts_inner_whitespace() {
        // Trimmed length 31, collapsed length 21
        let html = "<html><body><main>\n  <p>\n    aaaaaaaaaa\n          bbbbbbbbbb\n  </p>\n\
                    <p>   {p30}   </p></main></body></html>"
            .replace("{p30}", &sentence(30));
        assert_eq!(run(&html, ContentType::Generic), "aaaaaaaaaa bbbbbbbbbb");
    }

    #[test]
    fn test_root_priority() {
        let in_content = sentence(40);
        let in_body = sentence(45);
        let html = format!(
            r#"<html><body><p>{}</p><div id="content"><p>{}</p></div></body></html>"#,
            in_body, in_content
        );
        assert_eq!(run(&html, ContentType::Generic), in_content);

        let html = format!(
            r#"<html><body><p>{}</p><div class="content"><p>{}</p></div></body></html>"#,
            in_body, in_content
        );
        assert_eq!(run(&html, ContentType::Generic), in_content);

        let html = format!("<html><body><p>{}</p></body></html>", in_body);
        assert_eq!(run(&html, ContentType::Generic), in_body);
    }

    #[test]
    fn test_empty_meta_is_skipped() {
        let html = r#"<html><head><meta name="description" content="   "></head><body></body></html>"#;
        assert_eq!(run(html, ContentType::Generic), "");
    }
}

#[cfg(test)]
mod video_tests {
    use super::*;

    #[test]
    fn test_all_sections() {
        let html = r#"<html><body>
            <h1 class="title">  Moon landing facts </h1>
            <div id="description">Everything about 1969.</div>
            <div id="channel-name"><a href="/c/space">Space Channel</a></div>
            <ytd-transcript-segment-renderer><div class="segment-text">We choose</div></ytd-transcript-segment-renderer>
            <ytd-transcript-segment-renderer><div class="segment-text">to go to the moon</div></ytd-transcript-segment-renderer>
        </body></html>"#;

        assert_eq!(
            run(html, ContentType::Video),
            "Title: Moon landing facts\n\n\
             Description: Everything about 1969.\n\n\
             Channel: Space Channel\n\n\
             Transcript: We choose to go to the moon"
        );
    }

    #[test]
    fn test_absent_sections_are_omitted() {
        let html = r#"<html><body>
            <div id="channel-name"><a>Only Channel</a></div>
        </body></html>"#;
        assert_eq!(run(html, ContentType::Video), "Channel: Only Channel");
        assert_eq!(run("<html><body></body></html>", ContentType::Video), "");
    }
}

use scraper::ElementRef;

/// Separator placed between extracted sections
pub const SECTION_SEPARATOR: &str = "\n\n";

/// Collects the text of an element with whitespace runs collapsed to single spaces
///
/// This mirrors what a reader sees: leading and trailing whitespace is dropped,
/// and the line breaks and indentation of the markup disappear.
pub fn element_text(element: ElementRef<'_>) -> String {
    let raw: String = element.text().collect();
    normalize_whitespace_in_segment(&raw)
}

/// Text of a paragraph, if its trimmed length exceeds `min_chars`
///
/// The length is measured before whitespace runs are collapsed, so line breaks and
/// indentation inside the paragraph count toward it. The returned text is collapsed.
pub fn paragraph_text(element: ElementRef<'_>, min_chars: usize) -> Option<String> {
    let raw: String = element.text().collect();
    (char_len(raw.trim()) > min_chars).then(|| normalize_whitespace_in_segment(&raw))
}

/// Normalizes whitespace within a single line or paragraph
pub fn normalize_whitespace_in_segment(segment: &str) -> String {
    segment.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Number of characters, not bytes
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Joins non-empty sections with a blank line between them
pub fn join_sections(sections: &[String]) -> String {
    sections
        .iter()
        .filter(|s| !s.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(SECTION_SEPARATOR)
}

/// Cuts text to at most `max_chars` characters
///
/// The cut is made on a character boundary and may fall in the middle of a word.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}

use crate::extractors::text;

#[cfg(test)]
mod truncate_tests {
    use super::*;

    #[test]
    fn test_short_text_untouched() {
        assert_eq!(text::truncate_chars("hello", 10), "hello");
        assert_eq!(text::truncate_chars("hello", 5), "hello");
        assert_eq!(text::truncate_chars("", 5), "");
    }

    #[test]
    fn test_cuts_mid_word() {
        assert_eq!(text::truncate_chars("hello world", 7), "hello w");
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let input = "héllo wörld";
        let result = text::truncate_chars(input, 4);
        assert_eq!(result, "héll");
        assert_eq!(text::char_len(&result), 4);
    }

    #[test]
    fn test_zero_limit() {
        assert_eq!(text::truncate_chars("anything", 0), "");
    }
}

#[cfg(test)]
mod whitespace_tests {
    use super::*;

    #[test]
    fn test_mixed_whitespace() {
        let input = "  Line 1  \n\n  Line 2  \t\r\n  Line 3  ";
        assert_eq!(
            text::normalize_whitespace_in_segment(input),
            "Line 1 Line 2 Line 3"
        );
    }

    #[test]
    fn test_whitespace_only() {
        assert_eq!(text::normalize_whitespace_in_segment("   \n   \t   \r\n   "), "");
    }

    #[test]
    fn test_join_sections_skips_empty() {
        let sections = vec!["a".to_string(), String::new(), "b".to_string()];
        assert_eq!(text::join_sections(&sections), "a\n\nb");
        assert_eq!(text::join_sections(&[]), "");
    }
}

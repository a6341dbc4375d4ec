use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Truncate to `max_width` terminal columns, adding "..." when truncated.
/// Grapheme-aware so emoji and combining characters are never split.
pub fn truncate_with_ellipsis(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    // No room for the ellipsis
    if max_width <= 3 {
        return take_width(s, max_width);
    }

    let mut truncated = take_width(s, max_width - 3);
    truncated.push_str("...");
    truncated
}

fn take_width(s: &str, max_width: usize) -> String {
    let mut current_width = 0;
    let mut result = String::new();
    for grapheme in s.graphemes(true) {
        let grapheme_width = grapheme.width();
        if current_width + grapheme_width > max_width {
            break;
        }
        result.push_str(grapheme);
        current_width += grapheme_width;
    }
    result
}

/// "1 call" / "12 calls"
pub fn call_count(count: usize) -> String {
    if count == 1 {
        "1 call".to_string()
    } else {
        format!("{} calls", count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string_untouched() {
        assert_eq!(truncate_with_ellipsis("Alice", 10), "Alice");
        assert_eq!(truncate_with_ellipsis("Alice", 5), "Alice");
    }

    #[test]
    fn test_truncate_adds_ellipsis() {
        assert_eq!(truncate_with_ellipsis("+1 555 123 4567", 8), "+1 55...");
        assert_eq!(truncate_with_ellipsis("abcdef", 3), "abc");
        assert_eq!(truncate_with_ellipsis("abcdef", 0), "");
    }

    #[test]
    fn test_truncate_wide_characters() {
        // Each CJK character is two columns wide
        assert_eq!(truncate_with_ellipsis("日本語の名前", 7), "日本...");
        assert_eq!(truncate_with_ellipsis("日本語", 3), "日");
    }

    #[test]
    fn test_call_count() {
        assert_eq!(call_count(0), "0 calls");
        assert_eq!(call_count(1), "1 call");
        assert_eq!(call_count(12), "12 calls");
    }
}

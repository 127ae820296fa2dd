//! String utilities for the domain layer.

/// Truncate a string to a maximum number of characters with ellipsis.
///
/// Counts `char`s rather than bytes so multi-byte text is never split
/// mid-character. The ellipsis counts toward the limit; limits too small
/// to hold it cut the text without one.
pub fn truncate(s: &str, max_chars: usize) -> String {
    const ELLIPSIS: &str = "...";

    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    if max_chars < ELLIPSIS.len() {
        return s.chars().take(max_chars).collect();
    }
    let mut out: String = s.chars().take(max_chars - ELLIPSIS.len()).collect();
    out.push_str(ELLIPSIS);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
    }

    #[test]
    fn test_truncate_exact_length_is_untouched() {
        assert_eq!(truncate("abcdef", 6), "abcdef");
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate("日本語テスト", 30), "日本語テスト");
        assert_eq!(truncate("日本語テスト文字列", 7), "日本語テ...");
    }

    #[test]
    fn test_truncate_never_exceeds_limit() {
        for max in 0..8 {
            assert!(truncate("hello world", max).chars().count() <= max);
        }
        assert_eq!(truncate("hello", 2), "he");
        assert_eq!(truncate("hello", 3), "...");
        assert_eq!(truncate("hello", 4), "h...");
        assert_eq!(truncate("日本語", 1), "日");
    }
}

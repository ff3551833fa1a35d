#[must_use]
pub fn truncate_with_ellipsis(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => {
            let truncated = &s[..idx];
            format!("{}...", truncated.trim_end())
        }
        None => s.to_string(),
    }
}

/// Collapse a multi-line comment or reply into one truncated log line.
#[must_use]
pub fn log_snippet(s: &str, max_chars: usize) -> String {
    let flattened = s.split_whitespace().collect::<Vec<_>>().join(" ");
    truncate_with_ellipsis(&flattened, max_chars)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_short_input_untouched() {
        assert_eq!(truncate_with_ellipsis("haha lol", 50), "haha lol");
    }

    #[test]
    fn truncate_trims_before_ellipsis() {
        assert_eq!(
            truncate_with_ellipsis("bhai this is crazy fr", 10),
            "bhai this...",
        );
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let s = "naïve café résumé";
        assert_eq!(truncate_with_ellipsis(s, 7), "naïve c...");
    }

    #[test]
    fn truncate_zero_max_chars() {
        assert_eq!(truncate_with_ellipsis("hello", 0), "...");
    }

    #[test]
    fn snippet_flattens_newlines() {
        assert_eq!(
            log_snippet("first line\n\nsecond   line", 80),
            "first line second line"
        );
    }

    #[test]
    fn snippet_truncates_after_flattening() {
        assert_eq!(log_snippet("ab\ncd\nef", 5), "ab cd...");
    }
}

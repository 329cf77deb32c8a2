//! Input Sanitizer
//!
//! Strips markup and control characters from user-supplied text before it
//! enters the model. Leptos escapes text nodes when rendering, so this is
//! the model-side guarantee that stored task names carry no markup.

/// Sanitize user input: drop HTML tags and control characters, then trim.
pub fn sanitize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_tag = false;
    for ch in input.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if in_tag => {}
            // Keep whitespace that trim can handle, drop other controls
            c if c.is_control() && c != '\t' => {}
            c => out.push(c),
        }
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_passes_through() {
        assert_eq!(sanitize("Buy milk"), "Buy milk");
    }

    #[test]
    fn test_trims_surrounding_whitespace() {
        assert_eq!(sanitize("  Call mom \t"), "Call mom");
    }

    #[test]
    fn test_strips_tags() {
        assert_eq!(sanitize("<script>alert(1)</script>hi"), "alert(1)hi");
        assert_eq!(sanitize("a <b>bold</b> move"), "a bold move");
    }

    #[test]
    fn test_strips_control_characters() {
        assert_eq!(sanitize("a\u{0000}b\u{001b}c"), "abc");
    }

    #[test]
    fn test_whitespace_only_becomes_empty() {
        assert_eq!(sanitize("   \t "), "");
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn test_unclosed_tag_drops_rest() {
        assert_eq!(sanitize("ok <img src=x onerror=y"), "ok");
    }
}

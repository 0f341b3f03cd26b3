//! Text processing utilities.

/// Separator between supertypes/types and subtypes on a type line.
pub const TYPE_LINE_SEPARATOR: char = '\u{2014}';

/// Extract the type tokens from a card's type line.
///
/// Only the segment before the first em-dash is considered; subtypes after it
/// are discarded. The segment is split on whitespace and blank tokens dropped.
///
/// `"Legendary Creature — Human Warrior"` yields `["Legendary", "Creature"]`.
pub fn split_type_line(type_line: &str) -> Vec<String> {
    let head = type_line
        .split(TYPE_LINE_SEPARATOR)
        .next()
        .unwrap_or_default();

    head.split_whitespace().map(str::to_string).collect()
}

/// Escape `& < > " '` for interpolation into element text or quoted attributes.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- split_type_line ---

    #[test]
    fn test_split_type_line_discards_subtypes() {
        assert_eq!(split_type_line("Creature — Human Warrior"), vec!["Creature"]);
    }

    #[test]
    fn test_split_type_line_multiple_types() {
        assert_eq!(
            split_type_line("Legendary Artifact Creature — Golem"),
            vec!["Legendary", "Artifact", "Creature"]
        );
    }

    #[test]
    fn test_split_type_line_without_separator() {
        assert_eq!(split_type_line("Instant"), vec!["Instant"]);
        assert_eq!(split_type_line("Basic Land"), vec!["Basic", "Land"]);
    }

    #[test]
    fn test_split_type_line_collapses_whitespace() {
        assert_eq!(split_type_line("  Snow   Land  — Forest"), vec!["Snow", "Land"]);
    }

    #[test]
    fn test_split_type_line_empty() {
        assert!(split_type_line("").is_empty());
        assert!(split_type_line("   ").is_empty());
        assert!(split_type_line("— Human").is_empty());
    }

    #[test]
    fn test_split_type_line_hyphen_is_not_separator() {
        // Only U+2014 splits; an ASCII hyphen stays part of the token stream.
        assert_eq!(split_type_line("Creature - Elf"), vec!["Creature", "-", "Elf"]);
    }

    #[test]
    fn test_split_type_line_double_faced_uses_front() {
        assert_eq!(
            split_type_line("Creature — Human // Creature — Werewolf"),
            vec!["Creature"]
        );
    }

    // --- escape_html ---

    #[test]
    fn test_escape_html_specials() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_escape_html_plain_text_unchanged() {
        assert_eq!(escape_html("Sauron, the Dark Lord"), "Sauron, the Dark Lord");
        assert_eq!(escape_html(""), "");
    }

    #[test]
    fn test_escape_html_multibyte() {
        assert_eq!(escape_html("Éowyn — {W}"), "Éowyn — {W}");
    }
}

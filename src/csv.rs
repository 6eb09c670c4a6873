//! The fixed CSV dialect html2csv writes.
//!
//! Every field is wrapped in double quotes, quotes inside a field are doubled, fields are
//! separated by a comma and records are terminated by a single line feed. None of this is
//! configurable.

/// Separates two fields of a record.
pub const DELIMITER: char = ',';

/// Wraps every field.
pub const QUOTE: char = '"';

/// Terminates every record.
pub const TERMINATOR: char = '\n';

/// Append `field` to `buffer`, quoted and with embedded quotes doubled.
pub fn encode_field(field: &str, buffer: &mut String) {
    buffer.reserve(field.len() + 2);
    buffer.push(QUOTE);
    for (i, part) in field.split(QUOTE).enumerate() {
        if i > 0 {
            // Escape quotes by doubling: " -> ""
            buffer.push(QUOTE);
            buffer.push(QUOTE);
        }
        buffer.push_str(part);
    }
    buffer.push(QUOTE);
}

/// Append `text` to `buffer`, replacing every run of spaces, tabs, line feeds and carriage
/// returns with a single space.
pub fn push_collapsed_whitespace(text: &str, buffer: &mut String) {
    let mut rest = text;
    while let Some(start) = rest.find(is_collapsible_whitespace) {
        buffer.push_str(&rest[..start]);
        buffer.push(' ');
        rest = rest[start..].trim_start_matches(is_collapsible_whitespace);
    }
    buffer.push_str(rest);
}

fn is_collapsible_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(field: &str) -> String {
        let mut buffer = String::new();
        encode_field(field, &mut buffer);
        buffer
    }

    fn collapsed(text: &str) -> String {
        let mut buffer = String::new();
        push_collapsed_whitespace(text, &mut buffer);
        buffer
    }

    #[test]
    fn test_plain_field_is_quoted() {
        assert_eq!(encoded("abc"), r#""abc""#);
        assert_eq!(encoded("42"), r#""42""#);
    }

    #[test]
    fn test_empty_field_is_quoted() {
        assert_eq!(encoded(""), r#""""#);
    }

    #[test]
    fn test_escaped_quotes() {
        assert_eq!(encoded(r#"He said "hi""#), r#""He said ""hi""""#);
        assert_eq!(encoded(r#"""#), r#""""""#);
    }

    #[test]
    fn test_delimiter_needs_no_escaping() {
        assert_eq!(encoded("a,b"), r#""a,b""#);
    }

    #[test]
    fn test_collapse_mixed_whitespace() {
        assert_eq!(collapsed("A \n\t B"), "A B");
        assert_eq!(collapsed("A\r\nB"), "A B");
    }

    #[test]
    fn test_collapse_keeps_leading_and_trailing_space() {
        assert_eq!(collapsed("\n\n  x  \n"), " x ");
        assert_eq!(collapsed("   "), " ");
    }

    #[test]
    fn test_collapse_leaves_other_characters() {
        assert_eq!(collapsed("a\u{a0}b"), "a\u{a0}b");
        assert_eq!(collapsed("héllo wörld"), "héllo wörld");
        assert_eq!(collapsed(""), "");
    }

    #[test]
    fn test_collapse_appends() {
        let mut buffer = String::from("x");
        push_collapsed_whitespace(" y", &mut buffer);
        assert_eq!(buffer, "x y");
    }
}

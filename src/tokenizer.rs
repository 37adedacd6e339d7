//! Splits a raw value tuple into its top-level fields.
//!
//! Splitting on every comma would miscount fields whenever a string value
//! contains one, so the splitter runs a single left-to-right scan tracking
//! quote state and backslash escapes, and only treats commas outside string
//! literals as separators.

/// Strip the enclosing parentheses and trailing `,`/`;` from a raw tuple.
pub fn strip_tuple(record: &str) -> &str {
    let record = record.trim();

    let inner = if record.ends_with("),") || record.ends_with(");") {
        &record[..record.len() - 2]
    } else if record.ends_with(')') {
        &record[..record.len() - 1]
    } else {
        record
    };

    inner.strip_prefix('(').unwrap_or(inner)
}

/// Split a stripped tuple into field tokens at top-level commas.
///
/// Commas inside quoted literals never separate. A backslash escapes the
/// following character; a quote of the active kind otherwise closes the
/// literal. Each token is trimmed, and the final token is flushed even
/// without a trailing comma.
pub fn split_fields(record: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quote = false;
    let mut quote_char = '\0';
    let mut escape_next = false;

    for ch in record.chars() {
        if escape_next {
            current.push(ch);
            escape_next = false;
        } else if ch == '\\' {
            current.push(ch);
            escape_next = true;
        } else if !in_quote && (ch == '\'' || ch == '"') {
            in_quote = true;
            quote_char = ch;
            current.push(ch);
        } else if in_quote && ch == quote_char {
            in_quote = false;
            current.push(ch);
        } else if !in_quote && ch == ',' {
            fields.push(current.trim().to_string());
            current.clear();
        } else {
            current.push(ch);
        }
    }

    if !current.is_empty() {
        fields.push(current.trim().to_string());
    }

    fields
}

/// Normalize one field token.
///
/// The literal `NULL` maps to an absent value. A single-quoted literal has
/// its quotes stripped and its escapes resolved (`\'`, then `\"`, then
/// `\\`). Anything else passes through verbatim.
pub fn clean_value(token: &str) -> Option<String> {
    let token = token.trim();

    if token == "NULL" {
        return None;
    }

    if token.len() >= 2 && token.starts_with('\'') && token.ends_with('\'') {
        let inner = &token[1..token.len() - 1];
        return Some(
            inner
                .replace("\\'", "'")
                .replace("\\\"", "\"")
                .replace("\\\\", "\\"),
        );
    }

    Some(token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_tuple_trailing_comma() {
        assert_eq!(strip_tuple("(1,2,'a'),"), "1,2,'a'");
    }

    #[test]
    fn test_strip_tuple_trailing_semicolon() {
        assert_eq!(strip_tuple("(1,2,'a');"), "1,2,'a'");
    }

    #[test]
    fn test_strip_tuple_bare_parens() {
        assert_eq!(strip_tuple("(1,2,'a')"), "1,2,'a'");
    }

    #[test]
    fn test_split_simple() {
        assert_eq!(split_fields("1,2,'a'"), vec!["1", "2", "'a'"]);
    }

    #[test]
    fn test_split_ignores_comma_in_single_quotes() {
        let fields = split_fields("1,'Hello, world',2");
        assert_eq!(fields, vec!["1", "'Hello, world'", "2"]);
    }

    #[test]
    fn test_split_ignores_comma_in_double_quotes() {
        let fields = split_fields(r#"1,"a, b",2"#);
        assert_eq!(fields, vec!["1", r#""a, b""#, "2"]);
    }

    #[test]
    fn test_split_escaped_quote_does_not_close_literal() {
        let fields = split_fields(r"1,'O\'Brien, Pat',2");
        assert_eq!(fields, vec!["1", r"'O\'Brien, Pat'", "2"]);
    }

    #[test]
    fn test_split_escaped_backslash_before_quote() {
        // The backslash is itself escaped, so the quote closes the literal
        let fields = split_fields(r"'path\\',5");
        assert_eq!(fields, vec![r"'path\\'", "5"]);
    }

    #[test]
    fn test_split_field_count_matches_schema() {
        let record = r"1,2,'Title, with comma','Short','Desc',NULL,'slug',NULL,'WEEK','PUBLIC',1,'PUBLISHED',1,0,'2020-01-01','2020-01-02',NULL";
        assert_eq!(split_fields(record).len(), 17);
    }

    #[test]
    fn test_split_flushes_final_field_without_trailing_comma() {
        assert_eq!(split_fields("1,NULL"), vec!["1", "NULL"]);
    }

    #[test]
    fn test_clean_null_is_absent() {
        assert_eq!(clean_value("NULL"), None);
    }

    #[test]
    fn test_clean_quoted_string() {
        assert_eq!(clean_value("'hello'"), Some("hello".to_string()));
    }

    #[test]
    fn test_clean_unescapes_single_quote() {
        assert_eq!(clean_value(r"'O\'Brien'"), Some("O'Brien".to_string()));
    }

    #[test]
    fn test_clean_unescapes_double_quote_and_backslash() {
        assert_eq!(clean_value(r#"'say \"hi\"'"#), Some(r#"say "hi""#.to_string()));
        assert_eq!(clean_value(r"'C:\\temp'"), Some(r"C:\temp".to_string()));
    }

    #[test]
    fn test_clean_unquoted_token_passes_through() {
        assert_eq!(clean_value("42"), Some("42".to_string()));
        assert_eq!(clean_value("CURRENT_TIMESTAMP"), Some("CURRENT_TIMESTAMP".to_string()));
    }

    #[test]
    fn test_clean_null_inside_quotes_is_a_string() {
        assert_eq!(clean_value("'NULL'"), Some("NULL".to_string()));
    }
}

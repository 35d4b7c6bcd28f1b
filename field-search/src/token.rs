use crate::ops::Operator;
use regex::Regex;
use std::sync::OnceLock;

static CLAUSE_REGEX: OnceLock<Regex> = OnceLock::new();

// Matches `field:operator"value"` or `field:operator value`.
// Groups: 1=field, 2=operator, 3=value (possibly quoted), 4=quoted inner.
// Multi-char operators come first so `>=` is not read as `>` plus `=...`.
fn clause_regex() -> &'static Regex {
    CLAUSE_REGEX.get_or_init(|| {
        Regex::new(r#"(\S+?):((?:==|>=|<=|[=!<>])?)("([^"]*)"|\S+)"#).unwrap()
    })
}

/// A recognized `field:operator value` clause extracted from a query string.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub field: String,
    pub operator: Operator,
    /// Value with surrounding quotes stripped, otherwise verbatim.
    pub raw_value: String,
    pub is_quoted: bool,
    /// Byte range of the whole clause in the input string.
    pub span: (usize, usize),
}

/// Scan a query string left to right and return every clause that matches
/// the grammar, in order of occurrence. Text between clauses is not
/// returned here; the caller reconstructs it from the spans.
///
/// Scanning never fails: anything that does not match the grammar is simply
/// not a token.
pub fn scan(text: &str) -> Vec<Token> {
    clause_regex()
        .captures_iter(text)
        .map(|caps| {
            let whole = caps.get(0).expect("capture group 0 always exists");
            let quoted = caps.get(4);
            Token {
                field: caps[1].to_string(),
                // The regex only admits the recognized lexemes.
                operator: caps[2].parse().unwrap_or_default(),
                raw_value: quoted
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_else(|| caps[3].to_string()),
                is_quoted: quoted.is_some(),
                span: (whole.start(), whole.end()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_plain_word_is_no_token() {
        assert!(scan("python").is_empty());
        assert!(scan("hello world").is_empty());
        assert!(scan("").is_empty());
    }

    #[test]
    fn test_scan_simple_clause() {
        let tokens = scan("title:python");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].field, "title");
        assert_eq!(tokens[0].operator, Operator::Default);
        assert_eq!(tokens[0].raw_value, "python");
        assert!(!tokens[0].is_quoted);
        assert_eq!(tokens[0].span, (0, 12));
    }

    #[test]
    fn test_scan_operator_precedence() {
        // `>=` must win over `>` followed by a value starting with `=`
        let tokens = scan("price:>=100");
        assert_eq!(tokens[0].operator, Operator::Gte);
        assert_eq!(tokens[0].raw_value, "100");

        let tokens = scan("price:>100");
        assert_eq!(tokens[0].operator, Operator::Gt);
        assert_eq!(tokens[0].raw_value, "100");

        let tokens = scan("title:==Python");
        assert_eq!(tokens[0].operator, Operator::Exact);
        assert_eq!(tokens[0].raw_value, "Python");
    }

    #[test]
    fn test_scan_unrecognized_punctuation_is_value() {
        // `!=` is not an operator; `!` matches and `=x` is the value
        let tokens = scan("a:!=x");
        assert_eq!(tokens[0].operator, Operator::Sensitive);
        assert_eq!(tokens[0].raw_value, "=x");

        // `~` is not an operator at all
        let tokens = scan("a:~x");
        assert_eq!(tokens[0].operator, Operator::Default);
        assert_eq!(tokens[0].raw_value, "~x");
    }

    #[test]
    fn test_scan_quoted_value_keeps_spaces() {
        let tokens = scan(r#"created_at:<"2023-12-31 23:59:59""#);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].field, "created_at");
        assert_eq!(tokens[0].operator, Operator::Lt);
        assert_eq!(tokens[0].raw_value, "2023-12-31 23:59:59");
        assert!(tokens[0].is_quoted);
    }

    #[test]
    fn test_scan_unquoted_value_stops_at_space() {
        let tokens = scan("name:=john lisa");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].raw_value, "john");
        assert_eq!(&"name:=john lisa"[tokens[0].span.1..], " lisa");
    }

    #[test]
    fn test_scan_multiple_clauses() {
        let tokens = scan("title:python some words author__name:john");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].field, "title");
        assert_eq!(tokens[1].field, "author__name");
        assert_eq!(tokens[1].raw_value, "john");
    }

    #[test]
    fn test_scan_field_stops_at_first_colon() {
        let tokens = scan("a:b:c");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].field, "a");
        assert_eq!(tokens[0].raw_value, "b:c");
    }

    #[test]
    fn test_scan_empty_quoted_value() {
        let tokens = scan(r#"title:"""#);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].raw_value, "");
        assert!(tokens[0].is_quoted);
    }
}

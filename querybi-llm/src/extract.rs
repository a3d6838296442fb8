//! Lenient extraction and parsing of model output.
//!
//! Models rarely reply with a bare JSON document: the dictionary is
//! usually wrapped in prose or a code fence, single-quoted Python-style,
//! or carries a trailing comma. Extraction takes the greedy `{...}` span
//! of the reply; parsing is strict JSON first, then one normalizing pass
//! that converts quote styles and strips trailing commas. Untrusted text
//! is never evaluated.

use once_cell::sync::Lazy;
use querybi_core::{ensure_trailing_semicolon, SynthesisError, SynthesizedQuery};
use regex::Regex;

/// Greedy scan from the first `{` to the last `}` in the reply.
static BRACE_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{.*\}").expect("brace-block regex is valid"));

/// Extract the dictionary-shaped span of a model reply, if any.
pub fn extract_braced(text: &str) -> Option<&str> {
    BRACE_BLOCK.find(text).map(|m| m.as_str())
}

/// Parse a dictionary-shaped span leniently.
///
/// Strict JSON is tried first; on failure the text is normalized (single
/// quotes to double quotes outside strings, trailing commas removed) and
/// parsed once more. The strict parser's diagnostic is reported when both
/// attempts fail.
pub fn parse_lenient(text: &str) -> Result<serde_json::Value, SynthesisError> {
    match serde_json::from_str(text) {
        Ok(value) => Ok(value),
        Err(strict_err) => serde_json::from_str(&normalize_dict_text(text)).map_err(|_| {
            SynthesisError::ParseFailed {
                reason: strict_err.to_string(),
            }
        }),
    }
}

/// Parse a full model reply into a `SynthesizedQuery`.
///
/// The returned `sql` is normalized to end with exactly one `;`.
pub fn parse_synthesized(reply: &str) -> Result<SynthesizedQuery, SynthesisError> {
    let block = extract_braced(reply).ok_or(SynthesisError::ExtractionFailed)?;
    let value = parse_lenient(block)?;

    let sql = value
        .get("sql")
        .and_then(|v| v.as_str())
        .ok_or_else(|| SynthesisError::ParseFailed {
            reason: "dictionary has no string 'sql' field".to_string(),
        })?;

    Ok(SynthesizedQuery::new(ensure_trailing_semicolon(sql)))
}

/// Rewrite near-JSON into JSON without evaluating it.
///
/// Handles two deviations: single-quoted strings (converted to
/// double-quoted, with embedded `"` escaped and `\'` unescaped) and
/// trailing commas before `}` or `]`. Content inside double-quoted
/// strings is passed through untouched.
fn normalize_dict_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut in_double = false;
    let mut in_single = false;

    while let Some(c) = chars.next() {
        if in_double {
            out.push(c);
            match c {
                '\\' => {
                    if let Some(next) = chars.next() {
                        out.push(next);
                    }
                }
                '"' => in_double = false,
                _ => {}
            }
        } else if in_single {
            match c {
                '\\' => match chars.next() {
                    // \' inside a single-quoted string needs no escape in JSON
                    Some('\'') => out.push('\''),
                    Some(next) => {
                        out.push('\\');
                        out.push(next);
                    }
                    None => out.push('\\'),
                },
                '\'' => {
                    out.push('"');
                    in_single = false;
                }
                '"' => out.push_str("\\\""),
                _ => out.push(c),
            }
        } else {
            match c {
                '"' => {
                    in_double = true;
                    out.push(c);
                }
                '\'' => {
                    in_single = true;
                    out.push('"');
                }
                ',' => {
                    let mut lookahead = chars.clone();
                    let trailing = loop {
                        match lookahead.peek().copied() {
                            Some(n) if n.is_whitespace() => {
                                lookahead.next();
                            }
                            Some('}') | Some(']') => break true,
                            _ => break false,
                        }
                    };
                    if !trailing {
                        out.push(c);
                    }
                }
                _ => out.push(c),
            }
        }
    }

    out
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_braced_greedy_span() {
        let reply = "Here you go:\n{\"sql\": \"SELECT 1;\"}\nEnjoy!";
        assert_eq!(extract_braced(reply), Some("{\"sql\": \"SELECT 1;\"}"));

        // Greedy: first `{` to last `}`, nested braces included.
        let reply = "{\"a\": {\"b\": 1}} trailing {\"c\": 2}";
        assert_eq!(
            extract_braced(reply),
            Some("{\"a\": {\"b\": 1}} trailing {\"c\": 2}")
        );
    }

    #[test]
    fn test_extract_braced_missing() {
        assert_eq!(extract_braced("no dictionary here"), None);
        assert_eq!(extract_braced("only an opener {"), None);
    }

    #[test]
    fn test_parse_lenient_strict_json() {
        let value = parse_lenient(r#"{"sql": "SELECT 1;"}"#).unwrap();
        assert_eq!(value["sql"], "SELECT 1;");
    }

    #[test]
    fn test_parse_lenient_single_quotes() {
        let value = parse_lenient(r#"{'sql': 'SELECT 1;'}"#).unwrap();
        assert_eq!(value["sql"], "SELECT 1;");
    }

    #[test]
    fn test_parse_lenient_trailing_comma() {
        let value = parse_lenient(r#"{"sql": "SELECT 1;",}"#).unwrap();
        assert_eq!(value["sql"], "SELECT 1;");
    }

    #[test]
    fn test_parse_lenient_preserves_single_quotes_inside_sql() {
        let value =
            parse_lenient(r#"{"sql": "SELECT * FROM product_dim WHERE brand = 'Acme';"}"#).unwrap();
        assert_eq!(
            value["sql"],
            "SELECT * FROM product_dim WHERE brand = 'Acme';"
        );
    }

    #[test]
    fn test_parse_lenient_escaped_quote_in_single_quoted_string() {
        let value = parse_lenient(r#"{'sql': 'SELECT \'x\';'}"#).unwrap();
        assert_eq!(value["sql"], "SELECT 'x';");
    }

    #[test]
    fn test_parse_lenient_double_quote_inside_single_quoted_string() {
        let value = parse_lenient(r#"{'note': 'a "quoted" word'}"#).unwrap();
        assert_eq!(value["note"], "a \"quoted\" word");
    }

    #[test]
    fn test_parse_lenient_unrecoverable() {
        let err = parse_lenient("{not a dict at all").unwrap_err();
        assert!(matches!(err, SynthesisError::ParseFailed { .. }));
    }

    #[test]
    fn test_parse_synthesized_appends_semicolon() {
        let q = parse_synthesized(r#"{"sql": "SELECT 1"}"#).unwrap();
        assert_eq!(q.sql, "SELECT 1;");

        let q = parse_synthesized(r#"{"sql": "SELECT 1;;"}"#).unwrap();
        assert_eq!(q.sql, "SELECT 1;");
    }

    #[test]
    fn test_parse_synthesized_no_brace_pair() {
        let err = parse_synthesized("I cannot answer that.").unwrap_err();
        assert_eq!(err, SynthesisError::ExtractionFailed);
    }

    #[test]
    fn test_parse_synthesized_missing_sql_field() {
        let err = parse_synthesized(r#"{"query": "SELECT 1;"}"#).unwrap_err();
        assert!(matches!(err, SynthesisError::ParseFailed { .. }));
    }

    #[test]
    fn test_parse_synthesized_from_prose_wrapped_reply() {
        let reply = "Sure! Here is the query:\n\n{'sql': 'SELECT COUNT(*) FROM sales_fact'}\n\nLet me know if you need more.";
        let q = parse_synthesized(reply).unwrap();
        assert_eq!(q.sql, "SELECT COUNT(*) FROM sales_fact;");
    }
}

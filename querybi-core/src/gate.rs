//! Read-only SQL safety gate.
//!
//! Rejects any candidate query whose uppercased text contains a mutating
//! keyword. This is a substring check, not a parsed-AST check: it cannot
//! catch every injection vector, and a literal string or identifier that
//! happens to contain a forbidden word is wrongly rejected. Malformed SQL
//! is not detected here and surfaces only at execution time.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Keywords that disqualify a query from execution.
pub const FORBIDDEN_KEYWORDS: &[&str] = &[
    "DELETE", "INSERT", "UPDATE", "CREATE", "DROP", "TRUNCATE", "ALTER", "GRANT", "REVOKE",
];

/// Why a candidate query was rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
#[error("Query contains forbidden keyword '{keyword}'")]
pub struct RejectionReason {
    /// The denylist keyword that matched.
    pub keyword: String,
}

/// SQL text that has passed the safety gate.
///
/// The executor only accepts `AllowedSql`, so the type system guarantees
/// the gate ran before any execution attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedSql(String);

impl AllowedSql {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for AllowedSql {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Denylist validator for candidate SQL.
///
/// Pure function over strings; no side effects. The caller is expected to
/// have stripped any trailing semicolon already.
#[derive(Debug, Clone)]
pub struct SafetyGate {
    keywords: Vec<String>,
}

impl Default for SafetyGate {
    fn default() -> Self {
        Self {
            keywords: FORBIDDEN_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        }
    }
}

impl SafetyGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a gate with a custom keyword denylist.
    ///
    /// Keywords are matched case-insensitively; they are stored uppercased.
    pub fn with_keywords<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.into().to_uppercase())
                .collect(),
        }
    }

    /// Validate a candidate query for read-only execution.
    ///
    /// Returns `AllowedSql` when no forbidden keyword appears anywhere in
    /// the uppercased text, or the first matching keyword otherwise.
    pub fn validate(&self, sql: &str) -> Result<AllowedSql, RejectionReason> {
        let upper = sql.to_uppercase();
        for keyword in &self.keywords {
            if upper.contains(keyword.as_str()) {
                return Err(RejectionReason {
                    keyword: keyword.clone(),
                });
            }
        }
        Ok(AllowedSql(sql.to_string()))
    }
}

// ============================================================================
// TESTS
// ============================================================================


#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        /// Queries built only from characters that can never spell a
        /// forbidden keyword are always allowed.
        #[test]
        fn prop_keyword_free_text_is_allowed(sql in "[xyz0-9 ,.*()=<>]{0,200}") {
            let gate = SafetyGate::new();
            prop_assert!(gate.validate(&sql).is_ok());
        }

        /// Splicing any forbidden keyword anywhere into otherwise-clean
        /// text makes the gate reject, regardless of case.
        #[test]
        fn prop_injected_keyword_is_rejected(
            prefix in "[xyz0-9 ]{0,50}",
            suffix in "[xyz0-9 ]{0,50}",
            idx in 0usize..FORBIDDEN_KEYWORDS.len(),
            lowercase in proptest::bool::ANY,
        ) {
            let keyword = FORBIDDEN_KEYWORDS[idx];
            let keyword = if lowercase { keyword.to_lowercase() } else { keyword.to_string() };
            let sql = format!("{}{}{}", prefix, keyword, suffix);

            let gate = SafetyGate::new();
            prop_assert!(gate.validate(&sql).is_err());
        }

        /// Validation never mutates the input text.
        #[test]
        fn prop_allowed_sql_preserves_input(sql in "[xyz0-9 ,.*()=<>]{0,200}") {
            let gate = SafetyGate::new();
            let allowed = gate.validate(&sql).unwrap();
            prop_assert_eq!(allowed.as_str(), sql.as_str());
        }
    }
}

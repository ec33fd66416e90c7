//! Safety gate for LLM-generated SQL.
//!
//! Every drafted statement passes through [`check_statement`] before it is
//! allowed anywhere near the store. The gate is a keyword denylist, not a
//! parser: any statement containing a forbidden keyword as a whole word is
//! rejected, even inside a subquery or CTE.

use regex::Regex;
use std::sync::LazyLock;

/// Keywords that are never allowed, in scan order.
///
/// The first keyword that matches determines the error message, so the
/// order here is part of the gate's observable behavior.
pub const FORBIDDEN_KEYWORDS: [&str; 6] =
    ["DROP", "DELETE", "TRUNCATE", "INSERT", "UPDATE", "ALTER"];

/// One compiled matcher per forbidden keyword, in scan order.
///
/// Word boundaries keep identifiers like `updated_at` and string contents
/// like 'Dropout' from tripping the gate.
static KEYWORD_MATCHERS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    FORBIDDEN_KEYWORDS
        .iter()
        .map(|kw| {
            let pattern = format!(r"(?i)\b{}\b", kw);
            let regex = Regex::new(&pattern).expect("keyword pattern is valid");
            (*kw, regex)
        })
        .collect()
});

/// Outcome of running a statement through the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateVerdict {
    /// True when no forbidden keyword was found.
    pub safe: bool,
    /// Rejection message, empty when the statement is safe.
    pub error: String,
}

impl GateVerdict {
    fn safe() -> Self {
        Self {
            safe: true,
            error: String::new(),
        }
    }

    fn rejected(keyword: &str) -> Self {
        Self {
            safe: false,
            error: format!("Forbidden keyword '{}' detected.", keyword),
        }
    }
}

/// Checks a SQL statement against the forbidden keyword list.
///
/// Keywords are matched case-insensitively on whole-word boundaries. When
/// several forbidden keywords appear, the first one in scan order wins
/// regardless of position in the statement.
pub fn check_statement(sql: &str) -> GateVerdict {
    for (keyword, regex) in KEYWORD_MATCHERS.iter() {
        if regex.is_match(sql) {
            return GateVerdict::rejected(keyword);
        }
    }
    GateVerdict::safe()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_select_is_safe() {
        let verdict = check_statement("SELECT name, salary FROM employees WHERE dept_id = 101");
        assert!(verdict.safe);
        assert_eq!(verdict.error, "");
    }

    #[test]
    fn test_drop_is_rejected() {
        let verdict = check_statement("DROP TABLE employees");
        assert!(!verdict.safe);
        assert_eq!(verdict.error, "Forbidden keyword 'DROP' detected.");
    }

    #[test]
    fn test_lowercase_keyword_is_rejected() {
        let verdict = check_statement("delete from employees where emp_id = 1");
        assert!(!verdict.safe);
        assert_eq!(verdict.error, "Forbidden keyword 'DELETE' detected.");
    }

    #[test]
    fn test_mixed_case_keyword_is_rejected() {
        let verdict = check_statement("Insert Into employees VALUES (9, 'Mallory')");
        assert!(!verdict.safe);
        assert_eq!(verdict.error, "Forbidden keyword 'INSERT' detected.");
    }

    #[test]
    fn test_every_keyword_blocks_as_standalone_token() {
        for keyword in FORBIDDEN_KEYWORDS {
            let expected = format!("Forbidden keyword '{}' detected.", keyword);

            let upper = format!("{} employees", keyword);
            let verdict = check_statement(&upper);
            assert!(!verdict.safe, "uppercase {keyword} must block");
            assert_eq!(verdict.error, expected);

            let lower = format!("{} employees", keyword.to_lowercase());
            let verdict = check_statement(&lower);
            assert!(!verdict.safe, "lowercase {keyword} must block");
            assert_eq!(verdict.error, expected);
        }
    }

    #[test]
    fn test_every_keyword_passes_when_embedded_in_identifier() {
        for keyword in FORBIDDEN_KEYWORDS {
            let statement = format!("SELECT {}_col FROM employees", keyword.to_lowercase());
            let verdict = check_statement(&statement);
            assert!(verdict.safe, "{keyword} inside an identifier must pass");
            assert_eq!(verdict.error, "");
        }
    }

    #[test]
    fn test_keyword_as_identifier_substring_is_safe() {
        // updated_at contains UPDATE but not on a word boundary
        let verdict = check_statement("SELECT updated_at FROM employees");
        assert!(verdict.safe);
    }

    #[test]
    fn test_keyword_inside_string_content_is_safe() {
        let verdict = check_statement("SELECT * FROM studies WHERE label = 'Dropout'");
        assert!(verdict.safe);
    }

    #[test]
    fn test_keyword_in_subquery_is_rejected() {
        let verdict =
            check_statement("SELECT * FROM (SELECT 1) x; DELETE FROM employees");
        assert!(!verdict.safe);
        assert_eq!(verdict.error, "Forbidden keyword 'DELETE' detected.");
    }

    #[test]
    fn test_scan_order_wins_over_position() {
        // DELETE appears first in the text but DROP comes first in scan order
        let verdict = check_statement("DELETE FROM t; DROP TABLE t");
        assert_eq!(verdict.error, "Forbidden keyword 'DROP' detected.");
    }

    #[test]
    fn test_empty_statement_is_safe() {
        let verdict = check_statement("");
        assert!(verdict.safe);
    }
}

//! Pre-creatability classification.
//!
//! A cheap textual gate run before any splitting. It recognises the shape of
//! dbt table materializations (`create table ... as select ...`) and nothing
//! else; it is a heuristic, not a grammar check.
//!
//! # Example
//!
//! ```
//! use sql_pre_create::classifier::is_pre_creatable;
//!
//! assert!(is_pre_creatable("create table `db`.`t` as select 1"));
//! assert!(!is_pre_creatable("create view `db`.`v` as select 1"));
//! ```

use std::sync::LazyLock;

use regex::Regex;

/// Patterns a normalized statement may match to be split.
static PRE_CREATABLE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![Regex::new(r"^create\s+table.*select").expect("valid regex")]
});

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Normalize SQL for pattern matching.
///
/// Drops newlines, collapses whitespace runs to a single space and lowercases.
/// Only used for matching; the splitter keeps its own newline-only
/// normalization so that emitted statements lose no content.
pub fn normalize_for_matching(sql: &str) -> String {
    let without_newlines = sql.trim().replace('\n', "");
    WHITESPACE_RUN
        .replace_all(&without_newlines, " ")
        .trim()
        .to_lowercase()
}

/// Whether `sql` is a `CREATE TABLE ... SELECT` statement eligible for
/// splitting.
#[must_use]
pub fn is_pre_creatable(sql: &str) -> bool {
    let normalized = normalize_for_matching(sql);
    PRE_CREATABLE_PATTERNS
        .iter()
        .any(|pattern| pattern.is_match(&normalized))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_runs() {
        assert_eq!(
            normalize_for_matching("  CREATE\tTABLE\n\n  `a`  AS\r\nSELECT 1  "),
            "create table `a` as select 1"
        );
    }

    #[test]
    fn test_newlines_are_dropped_not_spaced() {
        assert_eq!(normalize_for_matching("create\ntable"), "createtable");
    }

    #[test]
    fn test_empty_input() {
        assert!(!is_pre_creatable(""));
        assert!(!is_pre_creatable("   \n  "));
    }

    #[test]
    fn test_mixed_case_ctas() {
        assert!(is_pre_creatable("CREATE TABLE `db`.`t` AS SELECT * FROM `db`.`s`"));
    }
}

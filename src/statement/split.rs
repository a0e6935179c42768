//! Config/select boundary detection.
//!
//! Generated CTAS statements have the shape
//!
//! ```sql
//! create table `db`.`t__dbt_tmp`
//!   DISTRIBUTED BY (`id`) BUCKETS 5
//!   PROPERTIES ("replication_num" = "1")
//! as select ...
//! ```
//!
//! The text between the relation reference and `as select` is the table
//! options clause; everything after the boundary is the select body. Neither
//! is parsed.

use regex::Regex;
use serde::Serialize;

use super::relation::Relation;
use crate::error::{AppResult, statement_split_error};

/// Literal boundary between the DDL head and the select body.
pub const SELECT_BOUNDARY: &str = "as select";

/// The two halves of a CTAS statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SplitStatement {
    /// Table options clause, trimmed. Empty when the CTAS has none.
    pub config: String,
    /// Select body starting with `select`, trimmed.
    pub select: String
}

/// Remove newline characters, keeping every other whitespace character.
///
/// Unlike the classifier's normalization nothing is collapsed: both segments
/// are re-emitted verbatim.
pub fn strip_newlines(sql: &str) -> String {
    sql.chars().filter(|c| *c != '\n' && *c != '\r').collect()
}

/// Split `sql` around its single `as select` boundary and isolate the options
/// clause that follows `relation`.
///
/// # Errors
///
/// Parse error when the boundary is missing or repeated, or when the DDL head
/// does not contain the relation reference.
pub fn split_statement(sql: &str, relation: &Relation) -> AppResult<SplitStatement> {
    let cleaned = strip_newlines(sql);
    let segments: Vec<&str> = cleaned.split(SELECT_BOUNDARY).collect();
    if segments.len() != 2 {
        return Err(statement_split_error(
            format!(
                "expected exactly one '{}' boundary, found {}",
                SELECT_BOUNDARY,
                segments.len() - 1
            ),
            sql
        ));
    }
    let (head, body) = (segments[0], segments[1]);

    let config = config_after_relation(head, relation).ok_or_else(|| {
        statement_split_error(
            format!("relation {} not found before '{}'", relation, SELECT_BOUNDARY),
            sql
        )
    })?;

    Ok(SplitStatement {
        config: config.trim().to_string(),
        select: format!("select {}", body.trim())
            .trim_end()
            .to_string()
    })
}

/// Text following the first occurrence of the relation reference.
///
/// Whitespace around the dot is tolerated since identifier extraction
/// ignores it as well.
fn config_after_relation<'a>(head: &'a str, relation: &Relation) -> Option<&'a str> {
    let pattern = format!(
        r"`{}`\s*\.\s*`{}`",
        regex::escape(&relation.database),
        regex::escape(&relation.table)
    );
    let re = Regex::new(&pattern).ok()?;
    re.find(head).map(|m| &head[m.end()..])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel() -> Relation {
        Relation::new("db", "t__dbt_tmp")
    }

    #[test]
    fn test_split_properties() {
        let sql = r#"create table `db`.`t__dbt_tmp` PROPERTIES ("k"="v") as select * from `db`.`s`"#;
        let split = split_statement(sql, &rel()).unwrap();
        assert_eq!(split.config, r#"PROPERTIES ("k"="v")"#);
        assert_eq!(split.select, "select * from `db`.`s`");
    }

    #[test]
    fn test_split_without_options() {
        let split = split_statement("create table `db`.`t__dbt_tmp` as select 1", &rel()).unwrap();
        assert_eq!(split.config, "");
        assert_eq!(split.select, "select 1");
    }

    #[test]
    fn test_split_keeps_inner_spacing() {
        let sql = "create table `db`.`t__dbt_tmp`\n  DISTRIBUTED BY (`id`)\n  BUCKETS 5\nas select  a,   b\n  from x";
        let split = split_statement(sql, &rel()).unwrap();
        assert_eq!(split.config, "DISTRIBUTED BY (`id`)  BUCKETS 5");
        assert_eq!(split.select, "select a,   b  from x");
    }

    #[test]
    fn test_missing_boundary() {
        let sql = "create table `db`.`t__dbt_tmp` as\nwith x as (select 1) select * from x";
        assert!(split_statement(sql, &rel()).is_err());
    }

    #[test]
    fn test_repeated_boundary() {
        let sql = "create table `db`.`t__dbt_tmp` as select * from (select 1 as select) q as select 2";
        assert!(split_statement(sql, &rel()).is_err());
    }

    #[test]
    fn test_relation_with_spaced_dot() {
        let sql = "create table `db` . `t__dbt_tmp` PROPERTIES (\"a\"=\"b\") as select 1";
        let split = split_statement(sql, &rel()).unwrap();
        assert_eq!(split.config, "PROPERTIES (\"a\"=\"b\")");
    }

    #[test]
    fn test_relation_absent_from_head() {
        let sql = "create table `other`.`name` as select 1";
        assert!(split_statement(sql, &rel()).is_err());
    }
}

//! Relation identifier extraction.

use std::{fmt, sync::LazyLock};

use regex::Regex;
use serde::Serialize;

use crate::error::{AppResult, relations_not_found_error};

/// Contents of each backtick pair, in order of appearance.
static BACKTICK_IDENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`]+)`").expect("valid regex"));

/// Suffix dbt appends to temporary and backup relations.
const DBT_SUFFIX: &str = "__dbt";

/// A `database`.`table` pair taken from a generated statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relation {
    pub database: String,
    pub table:    String
}

impl Relation {
    pub fn new(database: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            table:    table.into()
        }
    }

    /// Extract the first two backtick-quoted identifiers of `sql`.
    ///
    /// All whitespace is removed before matching, so identifiers broken by
    /// indentation still match and inner whitespace is dropped. Tokens after
    /// the second are ignored.
    ///
    /// # Errors
    ///
    /// Parse error when fewer than two quoted identifiers are present.
    pub fn from_sql(sql: &str) -> AppResult<Self> {
        let stripped: String = sql.chars().filter(|c| !c.is_whitespace()).collect();
        let mut idents = BACKTICK_IDENT
            .captures_iter(&stripped)
            .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()));

        match (idents.next(), idents.next()) {
            (Some(database), Some(table)) => Ok(Self {
                database,
                table
            }),
            _ => Err(relations_not_found_error(sql))
        }
    }

    /// Model name behind the relation, without any `__dbt...` suffix.
    pub fn model_name(&self) -> &str {
        match self.table.find(DBT_SUFFIX) {
            Some(idx) => &self.table[..idx],
            None => &self.table
        }
    }

    /// Fully qualified, backtick-quoted reference.
    pub fn quoted(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}`.`{}`", self.database, self.table)
    }
}

//! CTAS splitting into `CREATE TABLE` and `INSERT ... SELECT`.
//!
//! The input contract is narrow on purpose: a single dbt-generated statement
//! with a backtick-quoted `` `database`.`table` `` reference and a literal,
//! lower-case `as select` boundary. Anything else is either passed through
//! untouched (not a CTAS, model not opted in) or rejected with an error.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//!
//! use sql_pre_create::{
//!     project::{ModelsConfig, PreCreateConfig},
//!     statement::create_adapter_with
//! };
//!
//! let sql = r#"create table `db`.`t__dbt_tmp` PROPERTIES ("k"="v") as select * from `db`.`s`"#;
//!
//! let mut models = ModelsConfig::new();
//! models.insert("t", PreCreateConfig::with_columns(["id"]));
//!
//! let mut templates = HashMap::new();
//! templates.insert(
//!     "t".to_string(),
//!     "create table if not exists {relation} (id BIGINT)".to_string()
//! );
//!
//! let adapter = create_adapter_with(sql, &templates, &models).unwrap().unwrap();
//! assert_eq!(
//!     adapter.insert_statement(),
//!     Some("insert into `db`.`t__dbt_tmp` (id) select * from `db`.`s`")
//! );
//! ```

mod relation;
mod split;

use std::path::Path;

pub use relation::Relation;
use serde::Serialize;
pub use split::{SELECT_BOUNDARY, SplitStatement, split_statement, strip_newlines};
use tracing::{debug, warn};

use crate::{
    classifier::is_pre_creatable,
    error::AppResult,
    project::ModelsConfig,
    template::{FileTemplateLoader, TemplateLoader, load_create_table_statement}
};

/// One CTAS statement and the statements derived from it.
#[derive(Debug, Clone, Serialize)]
pub struct StatementAdapter {
    raw_sql:          String,
    relation:         Relation,
    config_statement: Option<String>,
    create_statement: Option<String>,
    select_statement: Option<String>,
    insert_statement: Option<String>
}

impl StatementAdapter {
    /// Wrap `raw_sql`, extracting its relation.
    ///
    /// # Errors
    ///
    /// Parse error when fewer than two backtick-quoted identifiers exist.
    pub fn new(raw_sql: impl Into<String>) -> AppResult<Self> {
        let raw_sql = raw_sql.into();
        let relation = Relation::from_sql(&raw_sql)?;
        Ok(Self {
            raw_sql,
            relation,
            config_statement: None,
            create_statement: None,
            select_statement: None,
            insert_statement: None
        })
    }

    pub fn raw_sql(&self) -> &str {
        &self.raw_sql
    }

    pub fn relation(&self) -> &Relation {
        &self.relation
    }

    pub fn db_name(&self) -> &str {
        &self.relation.database
    }

    pub fn table_name(&self) -> &str {
        &self.relation.table
    }

    pub fn model_name(&self) -> &str {
        self.relation.model_name()
    }

    pub fn config_statement(&self) -> Option<&str> {
        self.config_statement.as_deref()
    }

    pub fn create_statement(&self) -> Option<&str> {
        self.create_statement.as_deref()
    }

    pub fn select_statement(&self) -> Option<&str> {
        self.select_statement.as_deref()
    }

    pub fn insert_statement(&self) -> Option<&str> {
        self.insert_statement.as_deref()
    }

    /// Split the raw statement.
    ///
    /// Fills `config_statement` and `select_statement`.
    pub fn split(&mut self) -> AppResult<SplitStatement> {
        let split = split_statement(&self.raw_sql, &self.relation)?;
        self.config_statement = Some(split.config.clone());
        self.select_statement = Some(split.select.clone());
        Ok(split)
    }

    /// Assemble the `CREATE TABLE` and `INSERT` statements.
    ///
    /// `create_table` is the rendered template; the options clause is
    /// appended to it verbatim.
    pub fn assemble(&mut self, create_table: &str, insert_columns: &[String]) -> AppResult<()> {
        if self.config_statement.is_none() || self.select_statement.is_none() {
            self.split()?;
        }
        let config = self.config_statement.as_deref().unwrap_or_default();
        let select = self.select_statement.as_deref().unwrap_or_default();

        let create_table = create_table.trim_end();
        let create = if config.is_empty() {
            create_table.to_string()
        } else {
            format!("{} {}", create_table, config)
        };

        if insert_columns.is_empty() {
            warn!(
                model = self.model_name(),
                "no insert_columns configured, emitting an empty column list"
            );
        }
        let insert = format!(
            "insert into {} ({}) {}",
            self.relation,
            insert_columns.join(","),
            select
        );

        self.create_statement = Some(create);
        self.insert_statement = Some(insert);
        Ok(())
    }
}

/// Build an adapter for `sql` using templates found under the project's model
/// paths.
///
/// Returns `Ok(None)` when the statement should pass through unchanged.
pub fn create_adapter(
    sql: &str,
    project_root: &Path,
    model_paths: &[String],
    models: &ModelsConfig
) -> AppResult<Option<StatementAdapter>> {
    let loader = FileTemplateLoader::new(project_root, model_paths.to_vec());
    create_adapter_with(sql, &loader, models)
}

/// Build an adapter for `sql` with an explicit template source.
///
/// # Errors
///
/// Parse errors for statements classified as CTAS that cannot be split;
/// configuration errors for missing or malformed templates and settings.
pub fn create_adapter_with(
    sql: &str,
    loader: &dyn TemplateLoader,
    models: &ModelsConfig
) -> AppResult<Option<StatementAdapter>> {
    if !is_pre_creatable(sql) {
        debug!("statement is not a CTAS, passing through");
        return Ok(None);
    }

    let mut adapter = StatementAdapter::new(sql)?;
    let Some(pre_create) = models.pre_create(adapter.model_name())? else {
        debug!(model = adapter.model_name(), "model not opted in to pre-create");
        return Ok(None);
    };

    adapter.split()?;
    let create_table = load_create_table_statement(loader, adapter.relation())?;
    adapter.assemble(&create_table, &pre_create.insert_columns)?;
    debug!(
        model = adapter.model_name(),
        relation = %adapter.relation(),
        "split CTAS into create and insert statements"
    );
    Ok(Some(adapter))
}

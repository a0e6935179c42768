//! Error constructors.
//!
//! Every failure surfaces as a [`masterror::AppError`]. Two families matter to
//! callers and are kept apart by their kind:
//!
//! - parse failures ([`AppErrorKind::BadRequest`]): the generated SQL cannot
//!   be split; fix the statement.
//! - configuration failures ([`AppErrorKind::Config`]): template files or
//!   model settings are wrong; fix the project.

use std::path::Path;

pub use masterror::{AppError, AppErrorKind, AppResult};

/// Longest SQL excerpt embedded in an error message.
const SQL_EXCERPT_LEN: usize = 200;

/// Create file read error
pub fn file_read_error(path: &str, source: std::io::Error) -> AppError {
    AppError::internal(format!("Failed to read file '{}': {}", path, source))
}

/// Fewer than two backtick-quoted identifiers were found.
pub fn relations_not_found_error(sql: &str) -> AppError {
    AppError::bad_request(format!(
        "Could not extract relations from SQL statement, expected `database`.`table`:\n  {}",
        excerpt(sql)
    ))
}

/// The statement does not split into exactly one DDL head and one select body.
pub fn statement_split_error(message: impl Into<String>, sql: &str) -> AppError {
    AppError::bad_request(format!(
        "Statement split error: {}:\n  {}",
        message.into(),
        excerpt(sql)
    ))
}

/// No template file exists in any candidate model path.
pub fn template_not_found_error(project_root: &Path, searched: &[String], file: &str) -> AppError {
    AppError::config(format!(
        "Could not find table pre-creation SQL code for the following configuration: \
         project_root=[{}], model_paths=[{}], model_file=[{}]",
        project_root.display(),
        searched.join(", "),
        file
    ))
}

/// A template file exists but cannot be read as UTF-8 text.
pub fn template_read_error(path: &Path, source: std::io::Error) -> AppError {
    AppError::config(format!(
        "Failed to read pre-creation template '{}': {}",
        path.display(),
        source
    ))
}

/// The template lacks the relation placeholder or carries it more than once.
pub fn template_placeholder_error(model_name: &str, found: usize) -> AppError {
    AppError::config(format!(
        "Template for model '{}' must contain exactly one relation placeholder \
         ({{relation_name}} or {{relation}}), found {}",
        model_name, found
    ))
}

/// Create config error
pub fn config_error(message: impl Into<String>) -> AppError {
    AppError::config(message.into())
}

/// Whether the error points at project setup rather than at generated SQL.
pub fn is_config_error(err: &AppError) -> bool {
    err.kind == AppErrorKind::Config
}

/// Human-readable message carried by the error, falling back to its kind.
pub fn error_message(err: &AppError) -> String {
    match err.message.as_deref() {
        Some(message) => message.to_string(),
        None => err.to_string()
    }
}

fn excerpt(sql: &str) -> String {
    let flat = sql.split_whitespace().collect::<Vec<_>>().join(" ");
    match flat.char_indices().nth(SQL_EXCERPT_LEN) {
        Some((idx, _)) => format!("{}...", &flat[..idx]),
        None => flat
    }
}

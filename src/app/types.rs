//! Application types for CLI commands.
//!
//! Per-file reports produced by the `split` and `check` commands and the
//! parameters that drive them.

use std::path::PathBuf;

use serde::Serialize;

use crate::{cli::Format, statement::StatementAdapter};

/// Parameters for the split command.
///
/// # Example
///
/// ```
/// use sql_pre_create::{app::SplitParams, cli::Format};
///
/// let params = SplitParams {
///     sql_paths:     vec!["target/run/model.sql".to_string()],
///     project_dir:   None,
///     output_format: Format::Json,
///     no_color:      true
/// };
/// ```
#[derive(Debug, Clone)]
pub struct SplitParams {
    /// Statement files, or "-" for stdin.
    pub sql_paths:     Vec<String>,
    /// dbt project root; falls back to configuration.
    pub project_dir:   Option<PathBuf>,
    pub output_format: Format,
    pub no_color:      bool
}

/// What happened to one statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    /// Split into create and insert statements.
    Split,
    /// Left unchanged: not a CTAS or model not opted in.
    Passthrough,
    Error
}

/// Outcome for a single statement file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path:             String,
    pub status:           FileStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model:            Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relation:         Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_statement: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_statement: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insert_statement: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error:            Option<String>
}

impl FileReport {
    pub fn split(path: impl Into<String>, adapter: &StatementAdapter) -> Self {
        Self {
            path:             path.into(),
            status:           FileStatus::Split,
            model:            Some(adapter.model_name().to_string()),
            relation:         Some(adapter.relation().quoted()),
            create_statement: adapter.create_statement().map(str::to_string),
            config_statement: adapter.config_statement().map(str::to_string),
            insert_statement: adapter.insert_statement().map(str::to_string),
            error:            None
        }
    }

    pub fn passthrough(path: impl Into<String>) -> Self {
        Self::empty(path, FileStatus::Passthrough)
    }

    pub fn error(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::empty(path, FileStatus::Error)
        }
    }

    fn empty(path: impl Into<String>, status: FileStatus) -> Self {
        Self {
            path: path.into(),
            status,
            model: None,
            relation: None,
            create_statement: None,
            config_statement: None,
            insert_statement: None,
            error: None
        }
    }
}

/// Reports for every input, in input order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SplitReport {
    pub files: Vec<FileReport>
}

impl SplitReport {
    pub fn has_errors(&self) -> bool {
        self.files.iter().any(|f| f.status == FileStatus::Error)
    }

    pub fn count(&self, status: FileStatus) -> usize {
        self.files.iter().filter(|f| f.status == status).count()
    }
}

/// Classification of one statement file.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub path:          String,
    pub pre_creatable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error:         Option<String>
}

impl CheckReport {
    pub fn checked(path: impl Into<String>, pre_creatable: bool) -> Self {
        Self {
            path: path.into(),
            pre_creatable,
            error: None
        }
    }

    /// The input could not be read.
    pub fn error(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path:          path.into(),
            pre_creatable: false,
            error:         Some(message.into())
        }
    }
}

/// Output from CLI command execution.
///
/// # Example
///
/// ```
/// use sql_pre_create::app::CommandOutput;
///
/// let output = CommandOutput {
///     exit_code: 0,
///     stdout:    vec!["1 split, 0 passthrough, 0 failed".to_string()]
/// };
/// ```
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Exit code for the process (0=success, 1=some statement failed).
    pub exit_code: i32,
    /// Lines to print to stdout.
    pub stdout:    Vec<String>
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_counts() {
        let report = SplitReport {
            files: vec![
                FileReport::passthrough("a.sql"),
                FileReport::error("b.sql", "boom"),
                FileReport::passthrough("c.sql"),
            ]
        };
        assert!(report.has_errors());
        assert_eq!(report.count(FileStatus::Passthrough), 2);
        assert_eq!(report.count(FileStatus::Split), 0);
    }

    #[test]
    fn test_check_report_error_serialized_only_when_set() {
        let ok = serde_json::to_string(&CheckReport::checked("a.sql", true)).unwrap();
        assert!(!ok.contains("error"));
        let failed = serde_json::to_string(&CheckReport::error("b.sql", "unreadable")).unwrap();
        assert!(failed.contains("\"error\":\"unreadable\""));
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&FileStatus::Passthrough).unwrap();
        assert_eq!(json, "\"passthrough\"");
    }
}

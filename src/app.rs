//! Application logic for the SQL Pre-Create CLI.
//!
//! This module contains the command implementations separated from the main
//! entry point to enable testing. Each input file holds one statement;
//! statements are independent, so files are processed in parallel and
//! reported in input order.

mod types;

use std::{
    fs::read_to_string,
    io::{self, Read},
    path::{Path, PathBuf}
};

use rayon::prelude::*;
use tracing::{info, warn};
pub use types::{CheckReport, CommandOutput, FileReport, FileStatus, SplitParams, SplitReport};

use crate::{
    classifier::is_pre_creatable,
    cli::Format,
    config::Config,
    error::{AppResult, error_message, file_read_error, is_config_error},
    output::{OutputFormat, OutputOptions, format_check_reports, format_split_report},
    project::{DbtProject, ModelsConfig},
    statement::create_adapter_with,
    template::FileTemplateLoader
};

/// Everything needed to split statements of one dbt project.
#[derive(Debug, Clone)]
pub struct ProjectContext {
    pub project_root: PathBuf,
    pub model_paths:  Vec<String>,
    pub models:       ModelsConfig,
    pub loader:       FileTemplateLoader
}

impl ProjectContext {
    /// Load `dbt_project.yml` under `project_root`.
    pub fn load(project_root: &Path, config: &Config) -> AppResult<Self> {
        let project = DbtProject::load(project_root)?;
        let model_paths = project.model_paths_or(&config.project.model_paths);
        info!(
            project = project.name.as_deref().unwrap_or("<unnamed>"),
            root = %project_root.display(),
            model_paths = ?model_paths,
            "loaded dbt project"
        );
        let loader =
            FileTemplateLoader::with_config(project_root, model_paths.clone(), &config.template);
        Ok(Self {
            project_root: project_root.to_path_buf(),
            model_paths,
            models: project.models,
            loader
        })
    }

    /// Split one statement, turning failures into an error report.
    pub fn split_sql(&self, path: &str, sql: &str) -> FileReport {
        match create_adapter_with(sql, &self.loader, &self.models) {
            Ok(Some(adapter)) => FileReport::split(path, &adapter),
            Ok(None) => FileReport::passthrough(path),
            Err(e) => {
                let family = if is_config_error(&e) { "configuration" } else { "parse" };
                warn!(path, family, "failed to split statement");
                FileReport::error(path, error_message(&e))
            }
        }
    }
}

/// Convert CLI format to internal OutputFormat
pub fn convert_format(format: Format) -> OutputFormat {
    match format {
        Format::Text => OutputFormat::Text,
        Format::Json => OutputFormat::Json,
        Format::Yaml => OutputFormat::Yaml
    }
}

/// Create output options from parameters
pub fn create_output_options(format: Format, no_color: bool) -> OutputOptions {
    OutputOptions {
        format:  convert_format(format),
        colored: !no_color
    }
}

/// Read a statement from file or stdin
pub fn read_sql_input(path: &str) -> AppResult<String> {
    if path == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| file_read_error("stdin", e))?;
        Ok(buffer)
    } else {
        read_to_string(path).map_err(|e| file_read_error(path, e))
    }
}

/// Split every input against one project.
pub fn split_files(paths: &[String], ctx: &ProjectContext) -> SplitReport {
    let files = paths
        .par_iter()
        .map(|path| match read_sql_input(path) {
            Ok(sql) => ctx.split_sql(path, &sql),
            Err(e) => FileReport::error(path.as_str(), error_message(&e))
        })
        .collect();
    SplitReport {
        files
    }
}

/// Calculate exit code based on failed statements
pub fn calculate_exit_code(report: &SplitReport) -> i32 {
    if report.has_errors() { 1 } else { 0 }
}

/// Run the split command
pub fn run_split(params: SplitParams, config: Config) -> AppResult<CommandOutput> {
    let project_root = params
        .project_dir
        .unwrap_or_else(|| config.project.dir.clone());
    let ctx = ProjectContext::load(&project_root, &config)?;
    let report = split_files(&params.sql_paths, &ctx);
    let opts = create_output_options(params.output_format, params.no_color);
    Ok(CommandOutput {
        exit_code: calculate_exit_code(&report),
        stdout:    vec![format_split_report(&report, &opts)]
    })
}

/// Run the check command
///
/// Unreadable inputs are reported per file and turn the exit code to 1.
pub fn run_check(paths: &[String], format: Format, no_color: bool) -> AppResult<CommandOutput> {
    let reports: Vec<CheckReport> = paths
        .iter()
        .map(|path| match read_sql_input(path) {
            Ok(sql) => CheckReport::checked(path.as_str(), is_pre_creatable(&sql)),
            Err(e) => {
                warn!(path = path.as_str(), "failed to read statement");
                CheckReport::error(path.as_str(), error_message(&e))
            }
        })
        .collect();
    let exit_code = if reports.iter().any(|r| r.error.is_some()) { 1 } else { 0 };
    let opts = create_output_options(format, no_color);
    Ok(CommandOutput {
        exit_code,
        stdout: vec![format_check_reports(&reports, &opts)]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_format_text() {
        assert!(matches!(convert_format(Format::Text), OutputFormat::Text));
    }

    #[test]
    fn test_convert_format_json() {
        assert!(matches!(convert_format(Format::Json), OutputFormat::Json));
    }

    #[test]
    fn test_convert_format_yaml() {
        assert!(matches!(convert_format(Format::Yaml), OutputFormat::Yaml));
    }

    #[test]
    fn test_create_output_options_no_color() {
        let opts = create_output_options(Format::Text, true);
        assert!(!opts.colored);
    }

    #[test]
    fn test_exit_code() {
        let ok = SplitReport {
            files: vec![FileReport::passthrough("a.sql")]
        };
        let failed = SplitReport {
            files: vec![FileReport::passthrough("a.sql"), FileReport::error("b.sql", "x")]
        };
        assert_eq!(calculate_exit_code(&ok), 0);
        assert_eq!(calculate_exit_code(&failed), 1);
    }

    #[test]
    fn test_check_reports_unreadable_input_per_file() {
        let paths = vec!["/nonexistent/a.sql".to_string(), "/nonexistent/b.sql".to_string()];
        let output = run_check(&paths, Format::Json, true).unwrap();
        assert_eq!(output.exit_code, 1);
        assert!(output.stdout[0].contains("/nonexistent/a.sql"));
        assert!(output.stdout[0].contains("/nonexistent/b.sql"));
        assert!(output.stdout[0].contains("\"error\""));
    }

    #[test]
    fn test_read_missing_file() {
        assert!(read_sql_input("/nonexistent/statement.sql").is_err());
    }
}

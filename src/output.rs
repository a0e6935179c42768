use colored::Colorize;

use crate::app::{CheckReport, FileStatus, SplitReport};

/// Output format for results
#[derive(Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml
}

/// Output options
#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub format:  OutputFormat,
    pub colored: bool
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            format:  OutputFormat::Text,
            colored: true
        }
    }
}

/// Format split results based on output options
pub fn format_split_report(report: &SplitReport, opts: &OutputOptions) -> String {
    match opts.format {
        OutputFormat::Json => serde_json::to_string_pretty(report).unwrap_or_default(),
        OutputFormat::Yaml => serde_yaml::to_string(report).unwrap_or_default(),
        OutputFormat::Text => format_split_text(report, opts)
    }
}

/// Format classification results based on output options
pub fn format_check_reports(reports: &[CheckReport], opts: &OutputOptions) -> String {
    match opts.format {
        OutputFormat::Json => serde_json::to_string_pretty(reports).unwrap_or_default(),
        OutputFormat::Yaml => serde_yaml::to_string(reports).unwrap_or_default(),
        OutputFormat::Text => {
            let mut output = String::new();
            for report in reports {
                let verdict = if let Some(error) = &report.error {
                    paint(&format!("error: {}", error), opts, |s| s.red().to_string())
                } else if report.pre_creatable {
                    paint("pre-creatable", opts, |s| s.green().to_string())
                } else {
                    paint("not pre-creatable", opts, |s| s.dimmed().to_string())
                };
                output.push_str(&format!("{}: {}\n", report.path, verdict));
            }
            output
        }
    }
}

fn format_split_text(report: &SplitReport, opts: &OutputOptions) -> String {
    let mut output = String::new();

    for file in &report.files {
        let header = format!("-- {}", file.path);
        output.push_str(&paint(&header, opts, |s| s.cyan().bold().to_string()));
        output.push('\n');

        match file.status {
            FileStatus::Split => {
                if let (Some(model), Some(relation)) = (&file.model, &file.relation) {
                    output.push_str(&format!("-- model: {} ({})\n", model, relation));
                }
                if let Some(create) = &file.create_statement {
                    output.push_str(&format!("{};\n", create));
                }
                if let Some(insert) = &file.insert_statement {
                    output.push_str(&format!("{};\n", insert));
                }
            }
            FileStatus::Passthrough => {
                output.push_str(&paint("-- unchanged", opts, |s| s.dimmed().to_string()));
                output.push('\n');
            }
            FileStatus::Error => {
                let message = file.error.as_deref().unwrap_or("unknown error");
                output.push_str(&paint(&format!("-- error: {}", message), opts, |s| {
                    s.red().to_string()
                }));
                output.push('\n');
            }
        }
        output.push('\n');
    }

    let summary = format!(
        "{} split, {} passthrough, {} failed",
        report.count(FileStatus::Split),
        report.count(FileStatus::Passthrough),
        report.count(FileStatus::Error)
    );
    output.push_str(&paint(&summary, opts, |s| s.bold().to_string()));
    output
}

fn paint(text: &str, opts: &OutputOptions, style: impl Fn(&str) -> String) -> String {
    if opts.colored { style(text) } else { text.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::FileReport;

    fn plain() -> OutputOptions {
        OutputOptions {
            format:  OutputFormat::Text,
            colored: false
        }
    }

    #[test]
    fn test_text_summary_line() {
        let report = SplitReport {
            files: vec![FileReport::passthrough("a.sql"), FileReport::error("b.sql", "bad")]
        };
        let out = format_split_report(&report, &plain());
        assert!(out.contains("-- a.sql"));
        assert!(out.contains("-- error: bad"));
        assert!(out.ends_with("0 split, 1 passthrough, 1 failed"));
    }

    #[test]
    fn test_json_report() {
        let report = SplitReport {
            files: vec![FileReport::passthrough("a.sql")]
        };
        let opts = OutputOptions {
            format:  OutputFormat::Json,
            colored: false
        };
        let out = format_split_report(&report, &opts);
        assert!(out.contains("\"status\": \"passthrough\""));
        assert!(!out.contains("insert_statement"));
    }

    #[test]
    fn test_check_text() {
        let reports = vec![CheckReport::checked("a.sql", true)];
        assert_eq!(format_check_reports(&reports, &plain()), "a.sql: pre-creatable\n");
    }

    #[test]
    fn test_check_text_error() {
        let reports = vec![CheckReport::error("a.sql", "missing"), CheckReport::checked("b.sql", false)];
        assert_eq!(
            format_check_reports(&reports, &plain()),
            "a.sql: error: missing\nb.sql: not pre-creatable\n"
        );
    }
}

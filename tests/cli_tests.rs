// SPDX-FileCopyrightText: 2025 RAprogramm
// SPDX-License-Identifier: MIT

use clap::Parser;
use sql_pre_create::cli::{Cli, Commands, Format};

#[test]
fn test_parse_split_command() {
    let cli = Cli::parse_from([
        "sql-pre-create",
        "split",
        "--sql",
        "a.sql",
        "b.sql",
        "-p",
        "/proj",
        "-f",
        "json"
    ]);
    match cli.command {
        Commands::Split {
            sql,
            project_dir,
            output_format,
            no_color
        } => {
            assert_eq!(sql.len(), 2);
            assert_eq!(project_dir.unwrap().to_str(), Some("/proj"));
            assert!(matches!(output_format, Format::Json));
            assert!(!no_color);
        }
        Commands::Check {
            ..
        } => panic!("expected split")
    }
}

#[test]
fn test_parse_check_command() {
    let cli = Cli::parse_from(["sql-pre-create", "check", "--sql", "-", "--no-color"]);
    match cli.command {
        Commands::Check {
            sql,
            output_format,
            no_color
        } => {
            assert_eq!(sql[0].to_str(), Some("-"));
            assert!(matches!(output_format, Format::Text));
            assert!(no_color);
        }
        Commands::Split {
            ..
        } => panic!("expected check")
    }
}

#[test]
fn test_split_requires_sql() {
    assert!(Cli::try_parse_from(["sql-pre-create", "split"]).is_err());
}

#[test]
fn test_global_log_level() {
    let cli = Cli::parse_from(["sql-pre-create", "check", "--sql", "a.sql", "--log-level", "debug"]);
    assert_eq!(cli.log_level.as_deref(), Some("debug"));
}

#[test]
fn test_format_debug() {
    let format = Format::Yaml;
    let debug = format!("{:?}", format);
    assert!(debug.contains("Yaml"));
}

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// SQL Pre-Create - Split dbt CTAS statements into CREATE TABLE and INSERT
#[derive(Parser, Debug)]
#[command(name = "sql-pre-create")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log filter (e.g. "debug", "sql_pre_create=trace")
    #[arg(long, global = true, env = "PRE_CREATE_LOG")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Split CTAS statements using the project's pre-create templates
    Split {
        /// SQL statement files, one statement per file (use - for stdin)
        #[arg(short, long = "sql", required = true, num_args = 1..)]
        sql: Vec<PathBuf>,

        /// dbt project root containing dbt_project.yml
        #[arg(short, long)]
        project_dir: Option<PathBuf>,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value = "text")]
        output_format: Format,

        /// Disable colored output
        #[arg(long)]
        no_color: bool
    },
    /// Report whether statements are pre-creatable CTAS candidates
    Check {
        /// SQL statement files, one statement per file (use - for stdin)
        #[arg(short, long = "sql", required = true, num_args = 1..)]
        sql: Vec<PathBuf>,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value = "text")]
        output_format: Format,

        /// Disable colored output
        #[arg(long)]
        no_color: bool
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Format {
    Text,
    Json,
    Yaml
}

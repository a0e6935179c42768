//! # SQL Pre-Create
//!
//! Split dbt-generated `CREATE TABLE ... AS SELECT` statements into a
//! template-driven `CREATE TABLE` and an `INSERT ... SELECT`.
//!
//! dbt materializes a table model with a single CTAS, which leaves no room
//! for column definitions the query cannot express (auto-increment keys,
//! explicit types). Models that opt in through `+pre_create` get their table
//! created from a hand-written template first and then populated by an
//! insert.
//!
//! # Quick Start
//!
//! ```bash
//! # Split compiled statements of a project
//! sql-pre-create split -p ./jaffle_shop --sql target/run/customers.sql
//!
//! # Several files at once, JSON output
//! sql-pre-create split -p . --sql a.sql b.sql -f json
//!
//! # Is this statement a CTAS candidate?
//! echo "create table \`db\`.\`t\` as select 1" | sql-pre-create check --sql -
//! ```
//!
//! # Project Layout
//!
//! ```text
//! dbt_project.yml               # models: { customers: { +pre_create: {...} } }
//! models/
//!   customers.sql
//!   pre_create/
//!     template_customers.sql    # create table ... {relation_name} (...)
//! ```
//!
//! # Exit Codes
//!
//! - `0` - Success
//! - `1` - At least one statement could not be split
//! - `2` - Configuration or input error before processing

use std::process;

use clap::Parser;
use sql_pre_create::{
    app::{CommandOutput, SplitParams, run_check, run_split},
    cli::{Cli, Commands},
    config::Config,
    error::{AppResult, error_message}
};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", error_message(&e));
            process::exit(2);
        }
    };
    init_tracing(cli.log_level.as_deref().unwrap_or(&config.log.level));

    match run(cli, config) {
        Ok(output) => {
            for line in output.stdout {
                println!("{}", line);
            }
            process::exit(output.exit_code);
        }
        Err(e) => {
            eprintln!("Error: {}", error_message(&e));
            process::exit(2);
        }
    }
}

fn init_tracing(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

fn run(cli: Cli, config: Config) -> AppResult<CommandOutput> {
    match cli.command {
        Commands::Split {
            sql,
            project_dir,
            output_format,
            no_color
        } => {
            let params = SplitParams {
                sql_paths: sql.iter().map(|p| p.display().to_string()).collect(),
                project_dir,
                output_format,
                no_color
            };
            run_split(params, config)
        }
        Commands::Check {
            sql,
            output_format,
            no_color
        } => {
            let paths: Vec<String> = sql.iter().map(|p| p.display().to_string()).collect();
            run_check(&paths, output_format, no_color)
        }
    }
}

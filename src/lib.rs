//! # SQL Pre-Create Library
//!
//! Splits dbt-generated CTAS statements into `CREATE TABLE` and
//! `INSERT ... SELECT` statements.
//!
//! - [`classifier`] - decides whether a statement is a CTAS candidate
//! - [`statement`] - identifier extraction, splitting and assembly
//! - [`template`] - `CREATE TABLE` template lookup and rendering
//! - [`project`] - dbt project and per-model settings
//! - [`config`] - tool configuration
//! - [`app`] - command implementations used by the binary
//! - [`output`] - report formatting
//! - [`error`] - error constructors

pub mod app;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod project;
pub mod statement;
pub mod template;

//! `CREATE TABLE` template lookup and rendering.
//!
//! Templates are hand-written DDL files holding the column definitions a CTAS
//! cannot express (auto-increment keys, explicit types). They live next to the
//! models:
//!
//! ```text
//! <project_root>/<model_path>/pre_create/template_<model>.sql
//! ```
//!
//! and name the target relation through a placeholder:
//!
//! ```sql
//! create table if not exists {relation_name} (
//!     id BIGINT,
//!     uid BIGINT AUTO_INCREMENT
//! )
//! ```
//!
//! Lookup is a trait so the text transformation never touches the filesystem
//! directly.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf}
};

use tracing::debug;

use crate::{
    config::TemplateConfig,
    error::{
        AppResult, template_not_found_error, template_placeholder_error, template_read_error
    },
    statement::Relation
};

/// Placeholders standing for the fully qualified relation name.
pub const RELATION_PLACEHOLDERS: [&str; 2] = ["{relation_name}", "{relation}"];

/// Source of raw `CREATE TABLE` templates, keyed by model name.
pub trait TemplateLoader {
    /// Raw template text for `model_name`.
    ///
    /// # Errors
    ///
    /// Configuration error when no template exists for the model or it cannot
    /// be read.
    fn load(&self, model_name: &str) -> AppResult<String>;
}

/// Filesystem lookup across the project's model paths, first match wins.
#[derive(Debug, Clone)]
pub struct FileTemplateLoader {
    project_root: PathBuf,
    model_paths:  Vec<String>,
    directory:    String,
    prefix:       String
}

impl FileTemplateLoader {
    pub fn new(project_root: impl Into<PathBuf>, model_paths: Vec<String>) -> Self {
        Self::with_config(project_root, model_paths, &TemplateConfig::default())
    }

    pub fn with_config(
        project_root: impl Into<PathBuf>,
        model_paths: Vec<String>,
        config: &TemplateConfig
    ) -> Self {
        Self {
            project_root: project_root.into(),
            model_paths,
            directory: config.directory.clone(),
            prefix: config.prefix.clone()
        }
    }

    /// Template file name for a model, e.g. `template_orders.sql`.
    pub fn file_name(&self, model_name: &str) -> String {
        format!("{}{}.sql", self.prefix, model_name)
    }

    /// Candidate paths in lookup order.
    pub fn candidates(&self, model_name: &str) -> Vec<PathBuf> {
        let file_name = self.file_name(model_name);
        self.model_paths
            .iter()
            .map(|mp| {
                self.project_root
                    .join(mp)
                    .join(&self.directory)
                    .join(&file_name)
            })
            .collect()
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }
}

impl TemplateLoader for FileTemplateLoader {
    fn load(&self, model_name: &str) -> AppResult<String> {
        for path in self.candidates(model_name) {
            if path.is_file() {
                debug!(path = %path.display(), model = model_name, "loading pre-create template");
                return fs::read_to_string(&path).map_err(|e| template_read_error(&path, e));
            }
        }
        Err(template_not_found_error(
            &self.project_root,
            &self.model_paths,
            &self.file_name(model_name)
        ))
    }
}

/// In-memory templates keyed by model name.
impl TemplateLoader for HashMap<String, String> {
    fn load(&self, model_name: &str) -> AppResult<String> {
        self.get(model_name).cloned().ok_or_else(|| {
            template_not_found_error(Path::new("<memory>"), &[], model_name)
        })
    }
}

/// Substitute the quoted relation into the template's single placeholder.
///
/// # Errors
///
/// Configuration error unless exactly one placeholder occurrence exists.
pub fn render_template(template: &str, model_name: &str, relation: &Relation) -> AppResult<String> {
    let found: usize = RELATION_PLACEHOLDERS
        .iter()
        .map(|p| template.matches(p).count())
        .sum();
    if found != 1 {
        return Err(template_placeholder_error(model_name, found));
    }

    let quoted = relation.quoted();
    let rendered = RELATION_PLACEHOLDERS
        .iter()
        .fold(template.to_string(), |acc, p| acc.replace(p, &quoted));
    Ok(rendered)
}

/// Load and render the template for the relation's model.
pub fn load_create_table_statement(
    loader: &dyn TemplateLoader,
    relation: &Relation
) -> AppResult<String> {
    let model_name = relation.model_name();
    let template = loader.load(model_name)?;
    render_template(&template, model_name, relation)
}

//! dbt project settings relevant to pre-creation.
//!
//! Only two things are read from `dbt_project.yml`: the model paths that hold
//! templates and the per-model `+pre_create` sections.
//!
//! ```yaml
//! name: jaffle_shop
//! model-paths: ["models"]
//! models:
//!   customers:
//!     +pre_create:
//!       insert_columns: [id, value]
//!   staging:
//!     stg_orders:
//!       +pre_create: true
//! ```
//!
//! A model opts in when its `+pre_create` (or `pre_create`) key is `true` or a
//! section whose `enabled` is not `false`.

use std::{fs, path::Path};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::{
    config::default_model_paths,
    error::{AppResult, config_error, file_read_error}
};

/// Keys recognised as the pre-create opt-in.
pub const PRE_CREATE_KEYS: [&str; 2] = ["+pre_create", "pre_create"];

/// dbt project file name.
pub const PROJECT_FILE: &str = "dbt_project.yml";

/// Per-model pre-create settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PreCreateConfig {
    #[serde(default = "default_enabled")]
    pub enabled:        bool,
    /// Columns listed in the generated `INSERT`, in order.
    #[serde(default)]
    pub insert_columns: Vec<String>
}

impl Default for PreCreateConfig {
    fn default() -> Self {
        Self {
            enabled:        true,
            insert_columns: Vec::new()
        }
    }
}

fn default_enabled() -> bool {
    true
}

impl PreCreateConfig {
    pub fn with_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>
    {
        Self {
            enabled:        true,
            insert_columns: columns.into_iter().map(Into::into).collect()
        }
    }
}

/// `+pre_create: true` or a full section.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum PreCreateSetting {
    Flag(bool),
    Section(PreCreateConfig)
}

impl From<PreCreateSetting> for PreCreateConfig {
    fn from(setting: PreCreateSetting) -> Self {
        match setting {
            PreCreateSetting::Flag(enabled) => Self {
                enabled,
                ..Self::default()
            },
            PreCreateSetting::Section(section) => section
        }
    }
}

/// The `models:` tree of a dbt project.
///
/// Kept as raw YAML so unrelated dbt settings never fail deserialization;
/// only the `+pre_create` leaf is typed.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ModelsConfig(IndexMap<String, Value>);

impl ModelsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a model with a pre-create section.
    pub fn insert(&mut self, model_name: impl Into<String>, pre_create: PreCreateConfig) {
        let mut section = serde_yaml::Mapping::new();
        let value = serde_yaml::to_value(&pre_create).unwrap_or(Value::Bool(true));
        section.insert(Value::from(PRE_CREATE_KEYS[0]), value);
        self.0.insert(model_name.into(), Value::Mapping(section));
    }

    /// Register a model without any pre-create section.
    pub fn insert_raw(&mut self, model_name: impl Into<String>, value: Value) {
        self.0.insert(model_name.into(), value);
    }

    /// Parse a `models:` tree from YAML text.
    pub fn from_yaml(content: &str) -> AppResult<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| config_error(format!("Invalid models configuration: {}", e)))
    }

    /// Pre-create settings of `model_name`, searching nested folders.
    ///
    /// Returns `None` when the model is absent, has no pre-create key or has
    /// it disabled.
    ///
    /// # Errors
    ///
    /// Configuration error when the pre-create value has the wrong shape.
    pub fn pre_create(&self, model_name: &str) -> AppResult<Option<PreCreateConfig>> {
        let Some(model) = find_model(&self.0, model_name) else {
            return Ok(None);
        };
        let Some(raw) = pre_create_value(model) else {
            return Ok(None);
        };

        let setting: PreCreateSetting = serde_yaml::from_value(raw.clone()).map_err(|e| {
            config_error(format!(
                "Invalid pre_create configuration for model '{}': {}",
                model_name, e
            ))
        })?;
        let config = PreCreateConfig::from(setting);
        Ok(config.enabled.then_some(config))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn find_model<'a>(tree: &'a IndexMap<String, Value>, model_name: &str) -> Option<&'a Value> {
    if let Some(model) = tree.get(model_name) {
        return Some(model);
    }
    tree.iter()
        .filter(|(key, _)| !key.starts_with('+'))
        .find_map(|(_, value)| find_in_value(value, model_name))
}

fn find_in_value<'a>(value: &'a Value, model_name: &str) -> Option<&'a Value> {
    let Value::Mapping(mapping) = value else {
        return None;
    };
    if let Some(model) = mapping.get(model_name) {
        return Some(model);
    }
    mapping
        .iter()
        .filter(|(key, _)| key.as_str().is_some_and(|k| !k.starts_with('+')))
        .find_map(|(_, child)| find_in_value(child, model_name))
}

fn pre_create_value(model: &Value) -> Option<&Value> {
    let Value::Mapping(mapping) = model else {
        return None;
    };
    PRE_CREATE_KEYS.iter().find_map(|key| mapping.get(*key))
}

/// The subset of `dbt_project.yml` this tool reads.
#[derive(Debug, Clone, Deserialize)]
pub struct DbtProject {
    #[serde(default)]
    pub name:        Option<String>,
    #[serde(default, rename = "model-paths", alias = "source-paths")]
    pub model_paths: Option<Vec<String>>,
    #[serde(default)]
    pub models:      ModelsConfig
}

impl DbtProject {
    /// Read `dbt_project.yml` from the project root.
    pub fn load(project_root: &Path) -> AppResult<Self> {
        let path = project_root.join(PROJECT_FILE);
        let content = fs::read_to_string(&path)
            .map_err(|e| file_read_error(&path.display().to_string(), e))?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> AppResult<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| config_error(format!("Invalid {}: {}", PROJECT_FILE, e)))
    }

    /// Declared model paths, or `fallback` when the project declares none.
    pub fn model_paths_or(&self, fallback: &[String]) -> Vec<String> {
        match &self.model_paths {
            Some(paths) if !paths.is_empty() => paths.clone(),
            _ if fallback.is_empty() => default_model_paths(),
            _ => fallback.to_vec()
        }
    }
}

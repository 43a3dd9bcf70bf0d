//! Generation options and per-field overrides
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::path_de;

/// Nesting bound applied when no explicit `maxDepth` is configured.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Options for one generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerateOptions {
    /// Wrap every field type as nullable unless an override says otherwise
    pub make_nullable: bool,

    /// Emit `@Default(...)` literals for primitive and list fields
    pub use_default_values: bool,

    /// Raw literals fed to the default-value policy
    pub defaults: DefaultLiterals,

    /// Maximum object/array nesting depth, root object counted as 1
    pub max_depth: usize,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            make_nullable: false,
            use_default_values: false,
            defaults: DefaultLiterals::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl GenerateOptions {
    pub fn from_json(src: &str) -> Result<Self, ConfigError> {
        path_de::from_str_with_path(src)
    }

    pub fn from_file(file: &Path) -> Result<Self, ConfigError> {
        path_de::from_file_with_path(file)
    }
}

/// User-configured default literals, one per kind.
///
/// Values are raw text; the default-value policy validates and quotes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DefaultLiterals {
    pub string: String,
    pub int: String,
    pub float: String,
    pub bool: String,
    pub list: String,
}

impl Default for DefaultLiterals {
    fn default() -> Self {
        Self {
            string: String::new(),
            int: "0".to_string(),
            float: "0.0".to_string(),
            bool: "false".to_string(),
            list: String::new(),
        }
    }
}

/// Caller-supplied settings for one root-level JSON key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldOverride {
    /// Raw JSON key this override applies to
    pub key: String,
    /// Target Dart identifier; still sanitized and uniquified
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub nullable: Option<bool>,
    /// Dart expression used verbatim inside `@Default(...)`
    #[serde(default)]
    pub default_value: Option<String>,
}

impl FieldOverride {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: None,
            nullable: None,
            default_value: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = Some(nullable);
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Target name, ignoring blank values.
    pub fn target_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// Default literal, ignoring blank values.
    pub fn default_literal(&self) -> Option<&str> {
        self.default_value.as_deref().filter(|s| !s.trim().is_empty())
    }
}

/// Ordered overrides keyed by raw JSON key. A later entry for the same key
/// replaces the earlier one in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldOverrides {
    by_key: IndexMap<String, FieldOverride>,
}

impl FieldOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&FieldOverride> {
        self.by_key.get(key)
    }

    pub fn insert(&mut self, entry: FieldOverride) {
        self.by_key.insert(entry.key.clone(), entry);
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldOverride> {
        self.by_key.values()
    }

    /// Parse a JSON array of overrides.
    pub fn from_json(src: &str) -> Result<Self, ConfigError> {
        let list: Vec<FieldOverride> = path_de::from_str_with_path(src)?;
        Ok(list.into_iter().collect())
    }

    pub fn from_file(file: &Path) -> Result<Self, ConfigError> {
        let list: Vec<FieldOverride> = path_de::from_file_with_path(file)?;
        Ok(list.into_iter().collect())
    }
}

impl FromIterator<FieldOverride> for FieldOverrides {
    fn from_iter<I: IntoIterator<Item = FieldOverride>>(iter: I) -> Self {
        let mut out = Self::new();
        for entry in iter {
            out.insert(entry);
        }
        out
    }
}

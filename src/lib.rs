//! Infer immutable Dart models from a JSON sample.
//!
//! ```text
//! JSON object ─▶ inference ─▶ Vec<ClassRecord> ─▶ codegen ─▶ Dart source
//!                  │   │
//!             naming   defaults
//! ```
//!
//! ```
//! use json_freezed::{generate, FieldOverrides, GenerateOptions};
//! use serde_json::json;
//!
//! let sample = json!({"name": "Alice", "address": {"city": "NYC"}});
//! let src = generate(
//!     "User",
//!     sample.as_object().unwrap(),
//!     &GenerateOptions::default(),
//!     &FieldOverrides::default(),
//!     "json_converters.dart",
//! )
//! .unwrap();
//! assert!(src.contains("class Address with _$Address"));
//! ```
pub mod codegen;
pub mod defaults;
pub mod error;
pub mod helpers;
pub mod inference;
pub mod ir;
pub mod naming;
pub mod options;
pub mod path_de;

use serde_json::{Map, Value};

pub use error::{ConfigError, GenerateError};
pub use inference::infer_classes;
pub use ir::{ClassRecord, FieldRecord, Ty};
pub use options::{DefaultLiterals, FieldOverride, FieldOverrides, GenerateOptions};

/// Infer classes from `root` and render them as one Dart file.
///
/// `companion_import_path` is emitted verbatim as the converter-module import.
pub fn generate(
    root_name: &str,
    root: &Map<String, Value>,
    options: &GenerateOptions,
    overrides: &FieldOverrides,
    companion_import_path: &str,
) -> Result<String, GenerateError> {
    let classes = infer_classes(root_name, root, options, overrides)?;
    Ok(codegen::render(root_name, &classes, companion_import_path))
}

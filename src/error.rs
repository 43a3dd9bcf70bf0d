//! Error types for generation and option loading

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the inference/render pipeline.
///
/// Well-formed input within the depth bound never fails: unknown shapes become
/// `dynamic` and unparsable default literals become zero values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    /// JSON nesting deeper than `GenerateOptions::max_depth`
    #[error("Maximum nesting depth exceeded: {depth} > {max}")]
    MaxDepthExceeded { depth: usize, max: usize },
}

/// Errors raised while loading options or field overrides.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Deserialization failure, with the JSON path of the offending value
    #[error("{}at JSON path {path} → {message}", source_prefix(.file))]
    Parse {
        file: Option<PathBuf>,
        path: String,
        message: String,
    },

    #[error("failed to read {}: {source}", .file.display())]
    Io {
        file: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn source_prefix(file: &Option<PathBuf>) -> String {
    match file {
        Some(f) => format!("{}: ", f.display()),
        None => String::new(),
    }
}

impl ConfigError {
    pub(crate) fn in_file(self, file: &std::path::Path) -> Self {
        match self {
            ConfigError::Parse { path, message, .. } => ConfigError::Parse {
                file: Some(file.to_path_buf()),
                path,
                message,
            },
            other => other,
        }
    }
}

//! Target-project plumbing: root discovery, import paths, write-back.
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};

/// File whose presence marks a Dart project root.
pub const PROJECT_MARKER: &str = "pubspec.yaml";

/// Nearest ancestor of `start` (inclusive) containing [`PROJECT_MARKER`].
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let start = normalize(&std::path::absolute(start).ok()?);
    start
        .ancestors()
        .find(|dir| dir.join(PROJECT_MARKER).is_file())
        .map(Path::to_path_buf)
}

/// Lexically resolve `.` and `..`; does not touch the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

/// Import URI for `target` as seen from a file in `from_dir`, `/`-separated.
///
/// ```text
/// from_dir = /app/lib/models, target = /app/lib/core/json_converters.dart
///   → ../core/json_converters.dart
/// ```
pub fn relative_import(from_dir: &Path, target: &Path) -> Result<String> {
    let from = normalize(&std::path::absolute(from_dir)
        .with_context(|| format!("failed to resolve {}", from_dir.display()))?);
    let target = normalize(&std::path::absolute(target)
        .with_context(|| format!("failed to resolve {}", target.display()))?);

    let from_parts: Vec<Component> = from.components().collect();
    let target_parts: Vec<Component> = target.components().collect();
    let common = from_parts
        .iter()
        .zip(&target_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let mut segments: Vec<String> = vec!["..".to_string(); from_parts.len() - common];
    segments.extend(
        target_parts[common..]
            .iter()
            .map(|c| c.as_os_str().to_string_lossy().into_owned()),
    );
    Ok(segments.join("/"))
}

/// Write `contents` to `path`, creating parent directories.
pub fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
    }
    std::fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}

/// Write the converter module unless it already exists (or `force`).
/// Returns whether the file was written.
pub fn ensure_converters(path: &Path, force: bool) -> Result<bool> {
    if path.exists() && !force {
        tracing::warn!(path = %path.display(), "converter module exists, leaving it untouched");
        return Ok(false);
    }
    write_file(path, json_freezed::helpers::CONVERTERS_DART)?;
    tracing::info!(path = %path.display(), "wrote converter module");
    Ok(true)
}

//! Default-value policy: resolved field type → `@Default(...)` literal.
use crate::ir::{Primitive, Ty};
use crate::options::{DefaultLiterals, GenerateOptions};

/// Literal used for list fields when no list literal is configured.
pub const EMPTY_LIST_LITERAL: &str = "[]";

/// Pick the default literal for a field.
///
/// A non-blank override wins verbatim. Otherwise a literal is derived from
/// the configured values, and only when `use_default_values` is on.
pub fn resolve_default(
    ty: &Ty,
    options: &GenerateOptions,
    override_literal: Option<&str>,
) -> Option<String> {
    if let Some(lit) = override_literal.filter(|s| !s.trim().is_empty()) {
        return Some(lit.to_string());
    }
    if !options.use_default_values {
        return None;
    }
    default_literal(ty, &options.defaults)
}

/// Policy proper; nullability is looked through.
pub fn default_literal(ty: &Ty, literals: &DefaultLiterals) -> Option<String> {
    match ty.base() {
        Ty::ListOf(_) => {
            let configured = literals.list.trim();
            if configured.is_empty() {
                Some(EMPTY_LIST_LITERAL.to_string())
            } else {
                Some(configured.to_string())
            }
        }
        Ty::Primitive(Primitive::String) => Some(dart_string_literal(&literals.string)),
        Ty::Primitive(Primitive::Int) => Some(int_literal(&literals.int)),
        Ty::Primitive(Primitive::Float) => Some(float_literal(&literals.float)),
        Ty::Primitive(Primitive::Bool) => Some(bool_literal(&literals.bool)),
        Ty::ClassRef(_) | Ty::Untyped | Ty::Nullable(_) => None,
    }
}

/// Escape text for a single-quoted Dart string literal (without the quotes).
pub fn escape_dart_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            '$' => out.push_str("\\$"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out
}

pub fn dart_string_literal(s: &str) -> String {
    format!("'{}'", escape_dart_string(s))
}

fn int_literal(raw: &str) -> String {
    raw.trim()
        .parse::<i64>()
        .map(|n| n.to_string())
        .unwrap_or_else(|_| "0".to_string())
}

fn float_literal(raw: &str) -> String {
    match raw.trim().parse::<f64>() {
        // Debug keeps a decimal point: 2.0, 1.5, 1e100
        Ok(f) if f.is_finite() => format!("{f:?}"),
        _ => "0.0".to_string(),
    }
}

fn bool_literal(raw: &str) -> String {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("true") {
        "true".to_string()
    } else {
        "false".to_string()
    }
}

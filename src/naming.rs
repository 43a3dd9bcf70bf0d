//! Identifier casing, sanitization and uniqueness for generated Dart code.
//!
//! All functions here are pure string transforms. Word boundaries are runs of
//! non-ASCII-alphanumeric characters and lowercase/digit → uppercase
//! transitions, so `user-id`, `user_id` and `userId` all split into
//! `["user", "id"]`-shaped words.
use std::collections::{HashMap, HashSet};

// ------------------------------- Policy ---------------------------------- //

/// Substituted when sanitization leaves nothing, and prefixed when an
/// identifier would start with a digit.
pub const FALLBACK_IDENTIFIER: &str = "field";

/// Appended to identifiers that collide with [`RESERVED_WORDS`].
pub const RESERVED_SUFFIX: &str = "Value";

/// Dart reserved words, built-in identifiers, and members every generated
/// class already has.
pub const RESERVED_WORDS: &[&str] = &[
    "abstract", "as", "assert", "await", "break", "case", "catch", "class", "const",
    "continue", "covariant", "default", "deferred", "do", "dynamic", "else", "enum",
    "export", "extends", "extension", "external", "factory", "false", "final",
    "finally", "for", "Function", "get", "if", "implements", "import", "in",
    "interface", "is", "late", "library", "mixin", "new", "null", "operator", "part",
    "required", "rethrow", "return", "set", "static", "super", "switch", "this",
    "throw", "true", "try", "typedef", "var", "void", "while", "with", "yield",
    // Object / freezed members
    "copyWith", "hashCode", "noSuchMethod", "runtimeType", "toJson", "toString",
];

/// Class names that would shadow `dart:core` types inside the generated file.
pub const DISALLOWED_CLASS_NAMES: &[&str] = &[
    "List", "Map", "Set", "Object", "String", "Iterable", "Function", "Type", "Null",
    "Future", "Stream", "Record", "Symbol", "Never", "Enum", "DateTime", "Duration",
    "Uri", "FormatException",
    // referenced by every generated file
    "Default", "Freezed", "JsonKey", "JsonConverter", "JsonSerializable",
    "IntConverter", "DoubleConverter", "BoolConverter", "StringConverter",
];

// ------------------------------- Casing ---------------------------------- //

/// Split into words on separators and at lowercase/digit → uppercase steps.
fn split_words(s: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut start: Option<usize> = None;
    let mut prev: Option<char> = None;

    for (i, c) in s.char_indices() {
        if !c.is_ascii_alphanumeric() {
            if let Some(st) = start.take() {
                words.push(&s[st..i]);
            }
            prev = None;
            continue;
        }
        let boundary = c.is_ascii_uppercase()
            && prev.is_some_and(|p| p.is_ascii_lowercase() || p.is_ascii_digit());
        if boundary {
            if let Some(st) = start.take() {
                words.push(&s[st..i]);
            }
        }
        if start.is_none() {
            start = Some(i);
        }
        prev = Some(c);
    }
    if let Some(st) = start {
        words.push(&s[st..]);
    }
    words
}

/// Words of `s`; all-uppercase words are lowercased when `s` has separators
/// (`USER_ID` → `user`, `id`), so already-cased output splits back unchanged.
fn normalized_words(s: &str) -> Vec<String> {
    let delimited = s.chars().any(|c| !c.is_ascii_alphanumeric());
    split_words(s)
        .into_iter()
        .map(|w| {
            let screaming = !w.chars().any(|c| c.is_ascii_lowercase());
            if delimited && screaming {
                w.to_ascii_lowercase()
            } else {
                w.to_string()
            }
        })
        .collect()
}

/// Uppercase the first character and keep the rest as written.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
    }
}

fn protect_leading_digit(out: String, letter: char) -> String {
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        format!("{letter}{out}")
    } else {
        out
    }
}

/// `user_profile`, `user-profile`, `userProfile` → `UserProfile`.
///
/// ```
/// use json_freezed::naming::to_pascal_case;
///
/// assert_eq!(to_pascal_case("user_profile"), "UserProfile");
/// assert_eq!(to_pascal_case("2fa"), "N2fa");
/// ```
pub fn to_pascal_case(s: &str) -> String {
    let out: String = normalized_words(s).iter().map(|w| capitalize(w)).collect();
    protect_leading_digit(out, 'N')
}

/// `user-id`, `user_id`, `UserId` → `userId`.
///
/// ```
/// use json_freezed::naming::to_camel_case;
///
/// assert_eq!(to_camel_case("user-id"), "userId");
/// assert_eq!(to_camel_case("ID"), "id");
/// ```
pub fn to_camel_case(s: &str) -> String {
    let mut out = String::new();
    for (i, word) in normalized_words(s).iter().enumerate() {
        if i == 0 {
            out.push_str(&word.to_ascii_lowercase());
        } else {
            out.push_str(&capitalize(word));
        }
    }
    protect_leading_digit(out, 'n')
}

/// `UserProfile` → `user_profile`. Used for generated file stems.
pub fn to_snake_case(s: &str) -> String {
    let out = split_words(s)
        .into_iter()
        .map(|w| w.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join("_");
    protect_leading_digit(out, 'n')
}

// ---------------------------- Sanitization ------------------------------- //

/// Reduce `s` to a bare Dart identifier.
///
/// Strips everything outside `[A-Za-z0-9_]` and any leading `_` (named
/// parameters cannot be private), substitutes [`FALLBACK_IDENTIFIER`] when
/// nothing is left, prefixes it when the result
/// starts with a digit, and appends [`RESERVED_SUFFIX`] to reserved words.
pub fn sanitize_identifier(s: &str) -> String {
    let stripped: String = s
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .skip_while(|c| *c == '_')
        .collect();

    let ident = if stripped.is_empty() {
        FALLBACK_IDENTIFIER.to_string()
    } else if stripped.starts_with(|c: char| c.is_ascii_digit()) {
        format!("{FALLBACK_IDENTIFIER}{stripped}")
    } else {
        stripped
    };

    if RESERVED_WORDS.contains(&ident.as_str()) {
        format!("{ident}{RESERVED_SUFFIX}")
    } else {
        ident
    }
}

/// Append `suffix` when `name` would shadow a core Dart type or a name the
/// generated file references.
pub fn ensure_safe_class_name(name: &str, suffix: &str) -> String {
    if DISALLOWED_CLASS_NAMES.contains(&name) {
        format!("{name}{suffix}")
    } else {
        name.to_string()
    }
}

/// Naive plural stripping: `items` → `item`, `s` → `s`, `data` → `data`.
pub fn singularize(key: &str) -> &str {
    if key.chars().count() > 1 {
        if let Some(stem) = key.strip_suffix('s') {
            return stem;
        }
    }
    key
}

// ------------------------------- Registry -------------------------------- //

/// Occurrence counter handing out `Foo`, `Foo2`, `Foo3`, ...
///
/// One registry is shared by every class of a generation call; each class gets
/// a fresh one for its fields.
#[derive(Debug, Clone, Default)]
pub struct NameRegistry {
    counts: HashMap<String, usize>,
    issued: HashSet<String>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `base` on first use, otherwise `base` plus the next count.
    ///
    /// A suffixed candidate that was already handed out verbatim (e.g. a raw
    /// key `userId2`) is skipped.
    pub fn unique(&mut self, base: &str) -> String {
        if !self.counts.contains_key(base) && !self.issued.contains(base) {
            self.counts.insert(base.to_string(), 1);
            self.issued.insert(base.to_string());
            return base.to_string();
        }
        let count = self.counts.entry(base.to_string()).or_insert(1);
        loop {
            *count += 1;
            let candidate = format!("{base}{count}");
            if self.issued.insert(candidate.clone()) {
                return candidate;
            }
        }
    }

}

// ------------------------------- Tests ------------------------------------ //

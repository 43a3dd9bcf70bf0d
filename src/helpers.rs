//! Fixed Dart module with the converters referenced by generated code.
//!
//! Not inferred: the same text is written once per target project, next to
//! the generated models, and imported from every generated file.

/// Default location of the converter module, relative to the project root.
pub const DEFAULT_CONVERTERS_PATH: &str = "lib/core/json_converters.dart";

/// `IntConverter`, `DoubleConverter`, `BoolConverter`, `StringConverter`.
///
/// Each accepts any JSON scalar. Unparsable strings fall back to `0`, `0.0`,
/// `false` and `''`; maps and lists throw a `FormatException`.
pub const CONVERTERS_DART: &str = r#"// Loose JSON scalar converters used by generated freezed models.
import 'package:freezed_annotation/freezed_annotation.dart';

Never _incompatible(Object value, String target) =>
    throw FormatException('Cannot convert ${value.runtimeType} to $target', value);

/// Accepts int, double (truncated), numeric strings and bools. Unparsable strings become 0.
class IntConverter implements JsonConverter<int, Object?> {
  const IntConverter();

  @override
  int fromJson(Object? json) {
    if (json == null) return 0;
    if (json is int) return json;
    if (json is num) return json.toInt();
    if (json is bool) return json ? 1 : 0;
    if (json is String) {
      final trimmed = json.trim();
      return int.tryParse(trimmed) ?? double.tryParse(trimmed)?.toInt() ?? 0;
    }
    _incompatible(json, 'int');
  }

  @override
  Object? toJson(int object) => object;
}

/// Accepts any number, numeric strings and bools. Unparsable strings become 0.0.
class DoubleConverter implements JsonConverter<double, Object?> {
  const DoubleConverter();

  @override
  double fromJson(Object? json) {
    if (json == null) return 0.0;
    if (json is num) return json.toDouble();
    if (json is bool) return json ? 1.0 : 0.0;
    if (json is String) return double.tryParse(json.trim()) ?? 0.0;
    _incompatible(json, 'double');
  }

  @override
  Object? toJson(double object) => object;
}

/// Accepts bools, numbers (non-zero is true) and strings like "true", "1", "yes".
/// Anything else becomes false.
class BoolConverter implements JsonConverter<bool, Object?> {
  const BoolConverter();

  @override
  bool fromJson(Object? json) {
    if (json == null) return false;
    if (json is bool) return json;
    if (json is num) return json != 0;
    if (json is String) {
      switch (json.trim().toLowerCase()) {
        case 'true':
        case '1':
        case 'yes':
        case 'y':
          return true;
        default:
          return false;
      }
    }
    _incompatible(json, 'bool');
  }

  @override
  Object? toJson(bool object) => object;
}

/// Accepts strings, numbers and bools. null becomes ''.
class StringConverter implements JsonConverter<String, Object?> {
  const StringConverter();

  @override
  String fromJson(Object? json) {
    if (json == null) return '';
    if (json is String) return json;
    if (json is num || json is bool) return json.toString();
    _incompatible(json, 'String');
  }

  @override
  Object? toJson(String object) => object;
}
"#;

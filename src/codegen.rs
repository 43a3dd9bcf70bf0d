//! Dart source rendering for inferred class records.
//!
//! Output layout, in order:
//! - `freezed_annotation` import and the converter-module import
//! - `part` directives for the `.freezed.dart` and `.g.dart` companions
//! - one `@freezed` class per record, in discovery order
//!
//! Rendering is a pure function of the records: no inference, no new names.
use crate::defaults::escape_dart_string;
use crate::ir::{ClassRecord, FieldRecord, Primitive, Ty};
use crate::naming::to_snake_case;

pub const FREEZED_IMPORT: &str = "package:freezed_annotation/freezed_annotation.dart";
pub const FREEZED_PART_SUFFIX: &str = ".freezed.dart";
pub const JSON_PART_SUFFIX: &str = ".g.dart";

pub struct Codegen {
    out: String,
    companion_import: String,
}

impl Codegen {
    pub fn new(companion_import: impl Into<String>) -> Self {
        Self {
            out: String::new(),
            companion_import: companion_import.into(),
        }
    }

    /// Render the whole file for `classes`; `root_name` picks the part stem.
    pub fn emit(&mut self, root_name: &str, classes: &[ClassRecord]) {
        let stem = to_snake_case(root_name);
        self.line(&format!("import '{FREEZED_IMPORT}';"));
        self.line(&format!("import '{}';", escape_dart_string(&self.companion_import)));
        self.out.push('\n');
        self.line(&format!("part '{stem}{FREEZED_PART_SUFFIX}';"));
        self.line(&format!("part '{stem}{JSON_PART_SUFFIX}';"));

        for class in classes {
            self.out.push('\n');
            self.emit_class(class);
        }
        tracing::debug!(root = root_name, classes = classes.len(), bytes = self.out.len(), "rendered dart");
    }

    pub fn into_string(self) -> String {
        self.out
    }

    fn line(&mut self, s: &str) {
        self.out.push_str(s);
        self.out.push('\n');
    }

    fn emit_class(&mut self, class: &ClassRecord) {
        let name = &class.name;
        self.line("@freezed");
        self.line(&format!("class {name} with _${name} {{"));
        if class.fields.is_empty() {
            self.line(&format!("  const factory {name}() = _{name};"));
        } else {
            self.line(&format!("  const factory {name}({{"));
            for field in &class.fields {
                self.line(&format!("    {},", param(field)));
            }
            self.line(&format!("  }}) = _{name};"));
        }
        self.out.push('\n');
        self.line(&format!(
            "  factory {name}.fromJson(Map<String, dynamic> json) => _${name}FromJson(json);"
        ));
        self.line("}");
    }
}

/// One constructor parameter, annotations inline.
fn param(field: &FieldRecord) -> String {
    let mut s = String::new();
    if field.needs_key_annotation {
        s.push_str(&format!("@JsonKey(name: '{}') ", escape_dart_string(&field.original_key)));
    }
    if let Some(coercion) = field.coercion {
        s.push_str(&format!("@{}() ", coercion.converter()));
    }
    if let Some(lit) = &field.default_literal {
        s.push_str(&format!("@Default({lit}) "));
    }
    if field.required {
        s.push_str("required ");
    }
    s.push_str(&format!("{} {}", dart_type(&field.declared_type), field.name));
    s
}

pub fn dart_type(ty: &Ty) -> String {
    match ty {
        Ty::Primitive(Primitive::String) => "String".to_string(),
        Ty::Primitive(Primitive::Int) => "int".to_string(),
        Ty::Primitive(Primitive::Float) => "double".to_string(),
        Ty::Primitive(Primitive::Bool) => "bool".to_string(),
        Ty::Untyped => "dynamic".to_string(),
        Ty::ClassRef(name) => name.clone(),
        Ty::ListOf(inner) => format!("List<{}>", dart_type(inner)),
        Ty::Nullable(inner) => format!("{}?", dart_type(inner)),
    }
}

/// Render `classes` into one Dart source file.
pub fn render(root_name: &str, classes: &[ClassRecord], companion_import: &str) -> String {
    let mut cg = Codegen::new(companion_import);
    cg.emit(root_name, classes);
    cg.into_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Coercion;

    fn field(name: &str, key: &str, ty: Ty) -> FieldRecord {
        let coercion = ty.primitive().map(Coercion::for_primitive);
        FieldRecord {
            name: name.into(),
            required: !ty.is_nullable(),
            declared_type: ty,
            original_key: key.into(),
            needs_key_annotation: name != key,
            coercion,
            default_literal: None,
        }
    }

    #[test]
    fn dart_types_nest() {
        let ty = Ty::ListOf(Box::new(Ty::ClassRef("Item".into()).nullable())).nullable();
        assert_eq!(dart_type(&ty), "List<Item?>?");
        assert_eq!(dart_type(&Ty::ListOf(Box::new(Ty::Untyped))), "List<dynamic>");
        assert_eq!(dart_type(&Ty::Primitive(Primitive::Float)), "double");
    }

    #[test]
    fn header_and_parts_use_snake_stem() {
        let src = render("UserProfile", &[], "../core/json_converters.dart");
        assert_eq!(
            src,
            "import 'package:freezed_annotation/freezed_annotation.dart';\n\
             import '../core/json_converters.dart';\n\
             \n\
             part 'user_profile.freezed.dart';\n\
             part 'user_profile.g.dart';\n"
        );
    }

    #[test]
    fn class_declaration_layout() {
        let mut id = field("userId", "user-id", Ty::Primitive(Primitive::Int));
        id.default_literal = Some("0".into());
        id.required = false;
        let class = ClassRecord {
            name: "User".into(),
            fields: vec![id, field("name", "name", Ty::Primitive(Primitive::String))],
        };
        let src = render("User", &[class], "c.dart");
        let expected = "\
@freezed
class User with _$User {
  const factory User({
    @JsonKey(name: 'user-id') @IntConverter() @Default(0) int userId,
    @StringConverter() required String name,
  }) = _User;

  factory User.fromJson(Map<String, dynamic> json) => _$UserFromJson(json);
}
";
        assert!(src.ends_with(expected), "{src}");
    }

    #[test]
    fn empty_class_has_no_brace_parameters() {
        let class = ClassRecord { name: "Empty".into(), fields: vec![] };
        let src = render("Empty", &[class], "c.dart");
        assert!(src.contains("  const factory Empty() = _Empty;\n"));
    }

    #[test]
    fn json_key_is_escaped() {
        let f = field("itS", "it's$", Ty::Untyped);
        assert_eq!(param(&f), r"@JsonKey(name: 'it\'s\$') dynamic itS");
    }

    #[test]
    fn classes_are_separated_by_blank_lines() {
        let a = ClassRecord { name: "A".into(), fields: vec![] };
        let b = ClassRecord { name: "B".into(), fields: vec![] };
        let src = render("A", &[a, b], "c.dart");
        assert!(src.contains("}\n\n@freezed\nclass B with _$B {"));
    }
}

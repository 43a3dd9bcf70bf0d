//! Single-sample schema inference: JSON object → ordered class records.
//!
//! Walk one JSON document depth-first, register a class for every object
//! (and for the first object element of every array), and give each key a
//! field with a Dart-safe name, a type, nullability and an optional default.
//!
//! Design goals:
//! - Deterministic: same input + options → same records, same order.
//! - No hidden state: naming registries live in a per-call [`Discovery`]
//!   threaded through the walk as `&mut`.
//! - Bounded recursion: nesting beyond `max_depth` fails fast.
//! - Best effort for arrays: the first non-null element decides the element
//!   type; later elements are not reconciled.
pub mod arr;
pub mod num;
pub mod obj;

use serde_json::{Map, Value};

use crate::error::GenerateError;
use crate::ir::{ClassRecord, Primitive, Ty};
use crate::naming::NameRegistry;
use crate::options::{FieldOverrides, GenerateOptions};

// ------------------------------- Policy ---------------------------------- //

const ROOT_FALLBACK: &str = "Root";
const NESTED_FALLBACK: &str = "Nested";
const NESTED_SUFFIX: &str = "Model";
const ITEM_FALLBACK: &str = "Item";
const ITEM_SUFFIX: &str = "Item";

// ------------------------------- State ----------------------------------- //

/// Output and class-name registry of one generation call.
#[derive(Debug, Default)]
pub(crate) struct Discovery {
    /// Root first, then nested classes in first-encounter order
    pub(crate) classes: Vec<ClassRecord>,
    pub(crate) class_names: NameRegistry,
}

/// Where a class was found: drives its name hint, fallback and suffix.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ClassSite<'k> {
    hint: &'k str,
    fallback: &'static str,
    disallowed_suffix: &'static str,
}

impl<'k> ClassSite<'k> {
    fn root(name: &'k str) -> Self {
        Self { hint: name, fallback: ROOT_FALLBACK, disallowed_suffix: NESTED_SUFFIX }
    }

    fn nested(key: &'k str) -> Self {
        Self { hint: key, fallback: NESTED_FALLBACK, disallowed_suffix: NESTED_SUFFIX }
    }

    fn item(key: &'k str) -> Self {
        Self { hint: key, fallback: ITEM_FALLBACK, disallowed_suffix: ITEM_SUFFIX }
    }
}

// ------------------------------ Inferencer ------------------------------- //

/// Read-only configuration of a walk. Cheap to build; holds no results.
pub struct Inferencer<'a> {
    options: &'a GenerateOptions,
    overrides: &'a FieldOverrides,
}

impl<'a> Inferencer<'a> {
    pub fn new(options: &'a GenerateOptions, overrides: &'a FieldOverrides) -> Self {
        Self { options, overrides }
    }

    /// Infer every class reachable from `root`; the root class comes first.
    pub fn infer(
        &self,
        root_name: &str,
        root: &Map<String, Value>,
    ) -> Result<Vec<ClassRecord>, GenerateError> {
        let mut found = Discovery::default();
        self.create_class(&mut found, ClassSite::root(root_name), root, Some(self.overrides), 1)?;
        Ok(found.classes)
    }

    pub(crate) fn infer_type(
        &self,
        found: &mut Discovery,
        key: &str,
        value: &Value,
        depth: usize,
    ) -> Result<Ty, GenerateError> {
        let ty = match value {
            Value::Null => Ty::Untyped,
            Value::Array(xs) => self.infer_array_type(found, key, xs, depth)?,
            Value::Object(obj) => {
                let name = self.create_class(found, ClassSite::nested(key), obj, None, depth)?;
                Ty::ClassRef(name)
            }
            Value::String(_) => Ty::Primitive(Primitive::String),
            Value::Number(n) => Ty::Primitive(num::classify(n)),
            Value::Bool(_) => Ty::Primitive(Primitive::Bool),
        };
        Ok(ty)
    }

    /// Containers count one level each; the root object is depth 1.
    fn enter(&self, depth: usize) -> Result<(), GenerateError> {
        if depth > self.options.max_depth {
            return Err(GenerateError::MaxDepthExceeded {
                depth,
                max: self.options.max_depth,
            });
        }
        Ok(())
    }
}

// ------------------------------- Front API -------------------------------- //

/// Convenience wrapper around [`Inferencer::infer`].
pub fn infer_classes(
    root_name: &str,
    root: &Map<String, Value>,
    options: &GenerateOptions,
    overrides: &FieldOverrides,
) -> Result<Vec<ClassRecord>, GenerateError> {
    Inferencer::new(options, overrides).infer(root_name, root)
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Coercion;
    use crate::options::FieldOverride;
    use serde_json::json;

    fn infer(v: Value) -> Vec<ClassRecord> {
        infer_with(v, &GenerateOptions::default(), &FieldOverrides::new())
    }

    fn infer_with(v: Value, opts: &GenerateOptions, overrides: &FieldOverrides) -> Vec<ClassRecord> {
        let root = v.as_object().expect("object root").clone();
        infer_classes("Root", &root, opts, overrides).unwrap()
    }

    fn class_names(classes: &[ClassRecord]) -> Vec<&str> {
        classes.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn flat_object_has_required_primitives() {
        let classes = infer(json!({"name": "Alice", "age": 30}));
        assert_eq!(classes.len(), 1);
        let fields = &classes[0].fields;
        assert_eq!(fields[0].name, "name");
        assert_eq!(fields[0].declared_type, Ty::Primitive(Primitive::String));
        assert!(fields[0].required);
        assert_eq!(fields[1].declared_type, Ty::Primitive(Primitive::Int));
        assert_eq!(fields[1].coercion, Some(Coercion::Int));
        assert!(!fields[1].needs_key_annotation);
    }

    #[test]
    fn whole_floats_are_ints() {
        let classes = infer(json!({"a": 1.0, "b": 1.5, "c": -3}));
        let tys: Vec<_> = classes[0].fields.iter().map(|f| f.declared_type.clone()).collect();
        assert_eq!(tys, [
            Ty::Primitive(Primitive::Int),
            Ty::Primitive(Primitive::Float),
            Ty::Primitive(Primitive::Int),
        ]);
    }

    #[test]
    fn nested_objects_follow_depth_first_discovery_order() {
        let classes = infer(json!({
            "a": {"b": {"x": 1}},
            "c": {"y": 2},
        }));
        assert_eq!(class_names(&classes), ["Root", "A", "B", "C"]);
        assert_eq!(classes[0].fields[0].declared_type, Ty::ClassRef("A".into()));
    }

    #[test]
    fn repeated_keys_at_different_levels_get_numbered_classes() {
        let classes = infer(json!({
            "data": {"id": 1},
            "meta": {"data": {"id": 2}},
        }));
        assert_eq!(class_names(&classes), ["Root", "Data", "Meta", "Data2"]);
        let meta = &classes[2];
        assert_eq!(meta.fields[0].declared_type, Ty::ClassRef("Data2".into()));
    }

    #[test]
    fn array_of_objects_creates_singular_item_class() {
        let classes = infer(json!({"items": [{"id": 1}, null]}));
        assert_eq!(class_names(&classes), ["Root", "Item"]);
        let items = &classes[0].fields[0];
        assert_eq!(
            items.declared_type,
            Ty::ListOf(Box::new(Ty::ClassRef("Item".into()).nullable()))
        );
        assert_eq!(items.coercion, None);
    }

    #[test]
    fn only_first_non_null_element_decides() {
        let classes = infer(json!({"mixed": [null, 1, "two", {"x": 1}]}));
        assert_eq!(classes.len(), 1);
        assert_eq!(
            classes[0].fields[0].declared_type,
            Ty::ListOf(Box::new(Ty::Primitive(Primitive::Int).nullable()))
        );
    }

    #[test]
    fn empty_and_all_null_arrays_are_untyped_lists() {
        let classes = infer(json!({"a": [], "b": [null, null]}));
        let untyped_list = Ty::ListOf(Box::new(Ty::Untyped));
        assert_eq!(classes[0].fields[0].declared_type, untyped_list);
        assert_eq!(classes[0].fields[1].declared_type, untyped_list);
    }

    #[test]
    fn nested_arrays_recurse() {
        let classes = infer(json!({"points": [[{"x": 1}]]}));
        assert_eq!(class_names(&classes), ["Root", "Point"]);
        assert_eq!(
            classes[0].fields[0].declared_type,
            Ty::ListOf(Box::new(Ty::ListOf(Box::new(Ty::ClassRef("Point".into())))))
        );
    }

    #[test]
    fn null_value_is_untyped_and_never_required() {
        let classes = infer(json!({"gone": null}));
        let f = &classes[0].fields[0];
        assert_eq!(f.declared_type, Ty::Untyped);
        assert!(!f.required);
        assert_eq!(f.coercion, None);
    }

    #[test]
    fn disallowed_names_get_site_suffix() {
        let classes = infer(json!({"list": {"a": 1}, "maps": [{"b": 2}]}));
        assert_eq!(class_names(&classes), ["Root", "ListModel", "MapItem"]);
    }

    #[test]
    fn unnameable_keys_fall_back() {
        let classes = infer(json!({"???": {"a": 1}, "!!": [{"b": 2}]}));
        assert_eq!(class_names(&classes), ["Root", "Nested", "Item"]);
        assert_eq!(classes[0].fields[0].name, "field");
        assert_eq!(classes[0].fields[1].name, "field2");
    }

    #[test]
    fn colliding_field_names_are_suffixed_and_annotated() {
        let classes = infer(json!({"user-id": 1, "userId": 2}));
        let f = &classes[0].fields;
        assert_eq!(f[0].name, "userId");
        assert!(f[0].needs_key_annotation);
        assert_eq!(f[1].name, "userId2");
        assert!(f[1].needs_key_annotation);
    }

    #[test]
    fn global_nullable_wraps_every_field() {
        let opts = GenerateOptions { make_nullable: true, ..GenerateOptions::default() };
        let classes = infer_with(json!({"a": 1, "b": {"c": "x"}}), &opts, &FieldOverrides::new());
        for class in &classes {
            for f in &class.fields {
                assert!(f.declared_type.is_nullable());
                assert!(!f.required);
            }
        }
    }

    #[test]
    fn defaults_make_fields_optional() {
        let opts = GenerateOptions { use_default_values: true, ..GenerateOptions::default() };
        let classes = infer_with(
            json!({"n": 1, "s": "x", "tags": [], "child": {"k": true}}),
            &opts,
            &FieldOverrides::new(),
        );
        let root = &classes[0].fields;
        assert_eq!(root[0].default_literal.as_deref(), Some("0"));
        assert_eq!(root[1].default_literal.as_deref(), Some("''"));
        assert_eq!(root[2].default_literal.as_deref(), Some("[]"));
        assert_eq!(root[3].default_literal, None);
        assert!(root[3].required);
        assert!(!root[0].required);
        assert_eq!(classes[1].fields[0].default_literal.as_deref(), Some("false"));
    }

    #[test]
    fn overrides_apply_to_root_keys_only() {
        let overrides: FieldOverrides = [
            FieldOverride::new("id").name("identifier").nullable(true),
            FieldOverride::new("count").default_value("10"),
        ]
        .into_iter()
        .collect();
        let classes = infer_with(
            json!({"id": 1, "count": 2, "child": {"id": 3}}),
            &GenerateOptions::default(),
            &overrides,
        );
        let root = &classes[0].fields;
        assert_eq!(root[0].name, "identifier");
        assert!(root[0].needs_key_annotation);
        assert!(root[0].declared_type.is_nullable());
        assert_eq!(root[1].default_literal.as_deref(), Some("10"));
        assert!(!root[1].required);

        let child = &classes[1].fields[0];
        assert_eq!(child.name, "id");
        assert!(child.required);
    }

    #[test]
    fn override_can_force_non_null_when_global_nullable() {
        let opts = GenerateOptions { make_nullable: true, ..GenerateOptions::default() };
        let overrides: FieldOverrides = [FieldOverride::new("a").nullable(false)].into_iter().collect();
        let classes = infer_with(json!({"a": 1, "b": 2}), &opts, &overrides);
        assert!(classes[0].fields[0].required);
        assert!(!classes[0].fields[1].required);
    }

    #[test]
    fn depth_bound_fails_fast() {
        let opts = GenerateOptions { max_depth: 2, ..GenerateOptions::default() };
        let root = json!({"a": {"b": {"c": 1}}});
        let err = infer_classes("Root", root.as_object().unwrap(), &opts, &FieldOverrides::new())
            .unwrap_err();
        assert_eq!(err, GenerateError::MaxDepthExceeded { depth: 3, max: 2 });

        let ok = json!({"a": {"b": 1}});
        assert!(infer_classes("Root", ok.as_object().unwrap(), &opts, &FieldOverrides::new()).is_ok());
    }

    #[test]
    fn arrays_count_towards_depth() {
        let opts = GenerateOptions { max_depth: 2, ..GenerateOptions::default() };
        let root = json!({"a": [[1]]});
        let err = infer_classes("Root", root.as_object().unwrap(), &opts, &FieldOverrides::new())
            .unwrap_err();
        assert_eq!(err, GenerateError::MaxDepthExceeded { depth: 3, max: 2 });
    }
}

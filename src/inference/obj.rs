use serde_json::{Map, Value};

use super::{ClassSite, Discovery, Inferencer};
use crate::defaults;
use crate::error::GenerateError;
use crate::ir::{ClassRecord, Coercion, FieldRecord};
use crate::naming::{self, NameRegistry};
use crate::options::{FieldOverride, FieldOverrides};

impl Inferencer<'_> {
    /// Register a class for `object` and infer its fields; returns the class name.
    ///
    /// The record is pushed before its fields are walked so that the parent
    /// precedes every class discovered beneath it.
    pub(crate) fn create_class(
        &self,
        found: &mut Discovery,
        site: ClassSite<'_>,
        object: &Map<String, Value>,
        overrides: Option<&FieldOverrides>,
        depth: usize,
    ) -> Result<String, GenerateError> {
        self.enter(depth)?;

        let base = match naming::to_pascal_case(site.hint) {
            pascal if pascal.is_empty() => site.fallback.to_string(),
            pascal => pascal,
        };
        let safe = naming::ensure_safe_class_name(&base, site.disallowed_suffix);
        let class_name = found.class_names.unique(&safe);

        let slot = found.classes.len();
        found.classes.push(ClassRecord {
            name: class_name.clone(),
            fields: Vec::with_capacity(object.len()),
        });
        tracing::debug!(class = %class_name, depth, "registered class");

        let mut field_names = NameRegistry::new();
        let mut fields = Vec::with_capacity(object.len());
        for (key, value) in object {
            let entry = overrides.and_then(|o| o.get(key));
            fields.push(self.infer_field(found, &mut field_names, key, value, entry, depth)?);
        }

        tracing::debug!(class = %class_name, fields = fields.len(), "inferred class");
        found.classes[slot].fields = fields;
        Ok(class_name)
    }

    fn infer_field(
        &self,
        found: &mut Discovery,
        field_names: &mut NameRegistry,
        key: &str,
        value: &Value,
        entry: Option<&FieldOverride>,
        depth: usize,
    ) -> Result<FieldRecord, GenerateError> {
        let base = match entry.and_then(FieldOverride::target_name) {
            Some(target) => naming::sanitize_identifier(target),
            None => naming::sanitize_identifier(&naming::to_camel_case(key)),
        };
        let name = field_names.unique(&base);
        let needs_key_annotation = name != key;

        let inferred = self.infer_type(found, key, value, depth + 1)?;
        let nullable = entry
            .and_then(|o| o.nullable)
            .unwrap_or(self.options.make_nullable);
        let declared_type = if nullable { inferred.nullable() } else { inferred };

        let coercion = declared_type.primitive().map(Coercion::for_primitive);
        let default_literal = defaults::resolve_default(
            &declared_type,
            self.options,
            entry.and_then(FieldOverride::default_literal),
        );
        let required = !declared_type.is_nullable() && default_literal.is_none();

        tracing::trace!(key, field = %name, ty = ?declared_type, required, "inferred field");
        Ok(FieldRecord {
            name,
            declared_type,
            original_key: key.to_string(),
            needs_key_annotation,
            coercion,
            default_literal,
            required,
        })
    }
}

use serde_json::Value;

use super::{ClassSite, Discovery, Inferencer};
use crate::error::GenerateError;
use crate::ir::Ty;
use crate::naming::singularize;

impl Inferencer<'_> {
    /// `List<T>` where `T` comes from the first non-null element.
    ///
    /// A null anywhere in the array makes `T` nullable. Objects become an
    /// item class named after the singular form of `key`.
    pub(crate) fn infer_array_type(
        &self,
        found: &mut Discovery,
        key: &str,
        elements: &[Value],
        depth: usize,
    ) -> Result<Ty, GenerateError> {
        self.enter(depth)?;

        let saw_null = elements.iter().any(Value::is_null);
        let element = match elements.iter().find(|v| !v.is_null()) {
            None => Ty::Untyped,
            Some(Value::Array(inner)) => self.infer_array_type(found, key, inner, depth + 1)?,
            Some(Value::Object(obj)) => {
                let site = ClassSite::item(singularize(key));
                Ty::ClassRef(self.create_class(found, site, obj, None, depth + 1)?)
            }
            Some(other) => self.infer_type(found, key, other, depth + 1)?,
        };

        let element = if saw_null { element.nullable() } else { element };
        Ok(Ty::ListOf(Box::new(element)))
    }
}

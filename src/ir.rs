// Strongly-typed IR between inference and codegen. No serde_json::Value here.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Primitive {
    String,
    Int,
    Float,
    Bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Ty {
    Primitive(Primitive),
    Untyped,                 // null / unknown; nullable by convention
    ClassRef(String),        // name of a ClassRecord from the same call
    ListOf(Box<Ty>),
    Nullable(Box<Ty>),       // never wraps Untyped or another Nullable
}

impl Ty {
    /// Wrap as nullable; no-op when already nullable or untyped.
    pub fn nullable(self) -> Ty {
        match self {
            Ty::Untyped | Ty::Nullable(_) => self,
            other => Ty::Nullable(Box::new(other)),
        }
    }

    pub fn is_nullable(&self) -> bool {
        matches!(self, Ty::Untyped | Ty::Nullable(_))
    }

    /// The type with any nullable wrapper removed.
    pub fn base(&self) -> &Ty {
        match self {
            Ty::Nullable(inner) => inner,
            other => other,
        }
    }

    pub fn primitive(&self) -> Option<Primitive> {
        match self.base() {
            Ty::Primitive(p) => Some(*p),
            _ => None,
        }
    }
}

/// Converter annotation from the coercion-helper module, one per primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Coercion {
    String,
    Int,
    Double,
    Bool,
}

impl Coercion {
    pub fn for_primitive(p: Primitive) -> Self {
        match p {
            Primitive::String => Coercion::String,
            Primitive::Int => Coercion::Int,
            Primitive::Float => Coercion::Double,
            Primitive::Bool => Coercion::Bool,
        }
    }

    /// Dart class name of the converter.
    pub fn converter(self) -> &'static str {
        match self {
            Coercion::String => "StringConverter",
            Coercion::Int => "IntConverter",
            Coercion::Double => "DoubleConverter",
            Coercion::Bool => "BoolConverter",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassRecord {
    pub name: String,
    pub fields: Vec<FieldRecord>, // JSON insertion order
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldRecord {
    pub name: String,
    pub declared_type: Ty,
    pub original_key: String,
    pub needs_key_annotation: bool,  // name != original_key
    pub coercion: Option<Coercion>,
    pub default_literal: Option<String>,
    pub required: bool,              // non-nullable and no default
}

use serde_json::Number;

use crate::ir::Primitive;

/// Int when the value has no fractional part (`1.0` included), else Float.
pub fn classify(n: &Number) -> Primitive {
    if n.is_i64() || n.is_u64() {
        return Primitive::Int;
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 => Primitive::Int,
        _ => Primitive::Float,
    }
}

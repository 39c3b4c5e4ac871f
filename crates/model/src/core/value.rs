use serde_json::Value;

/// Index fields may come back either as a scalar or as a single-element
/// array depending on the schema. Returns the scalar in both cases.
pub fn first_scalar(value: &Value) -> Option<&Value> {
    match value {
        Value::Array(items) => items.first().filter(|v| !v.is_null()),
        Value::Null => None,
        other => Some(other),
    }
}

pub fn scalar_i64(value: Option<&Value>) -> Option<i64> {
    match first_scalar(value?)? {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub fn scalar_string(value: Option<&Value>) -> Option<String> {
    match first_scalar(value?)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

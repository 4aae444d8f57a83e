//! Built-in scalars: `String`, `Int`, `Float`, `Boolean` and `ID`.

use crate::{
    ast::InputValue,
    executor::{FieldError, FieldResult},
    schema::meta::ScalarMeta,
    value::{ScalarValue, Value},
};

/// Builds the metadata of every built-in scalar, registered into each new
/// [`Registry`].
///
/// [`Registry`]: crate::Registry
pub fn builtin_scalars() -> [ScalarMeta; 5] {
    [
        ScalarMeta::new("String", serialize_string, parse_string).description(
            "The `String` scalar type represents textual data, represented as UTF-8 \
             character sequences.",
        ),
        ScalarMeta::new("Int", serialize_int, parse_int).description(
            "The `Int` scalar type represents non-fractional signed whole numeric values. \
             Int can represent values between -(2^31) and 2^31 - 1.",
        ),
        ScalarMeta::new("Float", serialize_float, parse_float).description(
            "The `Float` scalar type represents signed double-precision fractional values.",
        ),
        ScalarMeta::new("Boolean", serialize_boolean, parse_boolean)
            .description("The `Boolean` scalar type represents `true` or `false`."),
        ScalarMeta::new("ID", serialize_id, parse_id).description(
            "The `ID` scalar type represents a unique identifier, serialized as a String.",
        ),
    ]
}

fn serialization_error(ty: &str, what: &str, v: &Value) -> FieldError {
    FieldError::serialization(format!("{ty} cannot represent {what}value: {v}"))
}

fn parse_error(ty: &str, v: &InputValue) -> FieldError {
    format!("{ty} cannot represent value: {v}").into()
}

fn serialize_string(v: &Value) -> FieldResult<Value> {
    match v.as_scalar() {
        Some(ScalarValue::String(s)) => Ok(Value::scalar(s.as_str())),
        Some(ScalarValue::Int(i)) => Ok(Value::scalar(i.to_string())),
        Some(ScalarValue::Float(f)) => Ok(Value::scalar(f.to_string())),
        Some(ScalarValue::Boolean(b)) => Ok(Value::scalar(b.to_string())),
        None => Err(serialization_error("String", "", v)),
    }
}

fn parse_string(v: &InputValue) -> FieldResult<Value> {
    match v.as_scalar() {
        Some(ScalarValue::String(s)) => Ok(Value::scalar(s.as_str())),
        _ => Err(parse_error("String", v)),
    }
}

fn int_from_float(f: f64) -> Option<i32> {
    (f.fract() == 0.0 && f >= f64::from(i32::MIN) && f <= f64::from(i32::MAX))
        .then_some(f as i32)
}

fn serialize_int(v: &Value) -> FieldResult<Value> {
    let int = match v.as_scalar() {
        Some(ScalarValue::Int(i)) => Some(*i),
        Some(ScalarValue::Float(f)) => int_from_float(*f),
        Some(ScalarValue::Boolean(b)) => Some(i32::from(*b)),
        Some(ScalarValue::String(s)) => s.trim().parse::<f64>().ok().and_then(int_from_float),
        None => None,
    };
    int.map(Value::scalar)
        .ok_or_else(|| serialization_error("Int", "non-integer ", v))
}

fn parse_int(v: &InputValue) -> FieldResult<Value> {
    match v.as_scalar() {
        Some(ScalarValue::Int(i)) => Ok(Value::scalar(*i)),
        _ => Err(parse_error("Int", v)),
    }
}

fn serialize_float(v: &Value) -> FieldResult<Value> {
    let float = match v.as_scalar() {
        Some(ScalarValue::Int(i)) => Some(f64::from(*i)),
        Some(ScalarValue::Float(f)) => Some(*f),
        Some(ScalarValue::Boolean(b)) => Some(if *b { 1.0 } else { 0.0 }),
        Some(ScalarValue::String(s)) => s.trim().parse::<f64>().ok(),
        None => None,
    };
    float
        .filter(|f| f.is_finite())
        .map(Value::scalar)
        .ok_or_else(|| serialization_error("Float", "non numeric ", v))
}

fn parse_float(v: &InputValue) -> FieldResult<Value> {
    match v.as_scalar() {
        Some(s @ (ScalarValue::Int(_) | ScalarValue::Float(_))) => {
            s.as_float().map(Value::scalar).ok_or_else(|| parse_error("Float", v))
        }
        _ => Err(parse_error("Float", v)),
    }
}

fn serialize_boolean(v: &Value) -> FieldResult<Value> {
    match v.as_scalar() {
        Some(ScalarValue::Boolean(b)) => Ok(Value::scalar(*b)),
        Some(ScalarValue::Int(i)) => Ok(Value::scalar(*i != 0)),
        Some(ScalarValue::Float(f)) if f.is_finite() => Ok(Value::scalar(*f != 0.0)),
        _ => Err(serialization_error("Boolean", "a non boolean ", v)),
    }
}

fn parse_boolean(v: &InputValue) -> FieldResult<Value> {
    match v.as_scalar() {
        Some(ScalarValue::Boolean(b)) => Ok(Value::scalar(*b)),
        _ => Err(parse_error("Boolean", v)),
    }
}

fn serialize_id(v: &Value) -> FieldResult<Value> {
    match v.as_scalar() {
        Some(ScalarValue::String(s)) => Ok(Value::scalar(s.as_str())),
        Some(ScalarValue::Int(i)) => Ok(Value::scalar(i.to_string())),
        _ => Err(serialization_error("ID", "", v)),
    }
}

fn parse_id(v: &InputValue) -> FieldResult<Value> {
    match v.as_scalar() {
        Some(ScalarValue::String(s)) => Ok(Value::scalar(s.as_str())),
        Some(ScalarValue::Int(i)) => Ok(Value::scalar(i.to_string())),
        _ => Err(parse_error("ID", v)),
    }
}

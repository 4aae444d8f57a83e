//! Conversions between [`Value`] and [`serde_json::Value`].
//!
//! Resolvers backed by JSON documents may hand those out directly as runtime
//! data, and results may be turned back into JSON without going through a
//! string.

use serde_json::{Map, Number, Value as Json};

use crate::{Object, ScalarValue, Value};

impl From<Json> for Value {
    fn from(json: Json) -> Self {
        match json {
            Json::Null => Self::Null,
            Json::Bool(b) => Self::scalar(b),
            Json::Number(n) => match n.as_i64().map(i32::try_from) {
                Some(Ok(i)) => Self::scalar(i),
                // Integers outside of `Int` range stay representable as `Float`.
                _ => n.as_f64().map_or(Self::Null, Self::scalar),
            },
            Json::String(s) => Self::scalar(s),
            Json::Array(l) => Self::list(l.into_iter().map(Into::into).collect()),
            Json::Object(o) => {
                Self::object(o.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<Value> for Json {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Scalar(ScalarValue::Int(i)) => Self::from(i),
            // Non-finite floats have no JSON representation.
            Value::Scalar(ScalarValue::Float(f)) => {
                Number::from_f64(f).map_or(Self::Null, Self::Number)
            }
            Value::Scalar(ScalarValue::String(s)) => Self::String(s),
            Value::Scalar(ScalarValue::Boolean(b)) => Self::Bool(b),
            Value::List(l) => Self::Array(l.into_iter().map(Into::into).collect()),
            Value::Object(o) => Self::Object(
                o.into_iter()
                    .map(|(k, v)| (k, Self::from(v)))
                    .collect::<Map<_, _>>(),
            ),
        }
    }
}

impl From<Object> for Json {
    fn from(o: Object) -> Self {
        Value::Object(o).into()
    }
}

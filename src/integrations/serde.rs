//! `serde` support for responses, errors and input values.

use std::fmt;

use serde::{
    de::{self, Deserializer},
    ser::{SerializeMap as _, Serializer},
    Deserialize, Serialize,
};

use crate::{
    ast::InputValue,
    executor::{ErrorKind, ExecutionError, ExecutionOutput, PathSegment},
    validation::RuleError,
    GraphQLError, Object, ScalarValue, Value,
};

impl Serialize for ExecutionError {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        let mut map = ser.serialize_map(Some(3))?;

        map.serialize_key("message")?;
        map.serialize_value(self.error().message())?;

        map.serialize_key("path")?;
        map.serialize_value(self.path())?;

        let mut extensions = Object::with_capacity(1);
        extensions.add_field("kind", Value::scalar(self.error().kind().to_string()));
        if let Some(custom) = self.error().extensions().as_object_value() {
            for (k, v) in custom.iter().filter(|(k, _)| *k != "kind") {
                extensions.add_field(k.as_str(), v.clone());
            }
        }
        map.serialize_key("extensions")?;
        map.serialize_value(&extensions)?;

        map.end()
    }
}

impl Serialize for ErrorKind {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        ser.collect_str(self)
    }
}

impl Serialize for PathSegment {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Field(name) => ser.serialize_str(name),
            Self::Index(i) => ser.serialize_u64(*i as u64),
        }
    }
}

impl Serialize for ExecutionOutput {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        let len = if self.errors.is_empty() { 1 } else { 2 };
        let mut map = ser.serialize_map(Some(len))?;

        map.serialize_key("data")?;
        map.serialize_value(&self.data)?;

        if !self.errors.is_empty() {
            map.serialize_key("errors")?;
            map.serialize_value(&self.errors)?;
        }

        map.end()
    }
}

impl Serialize for GraphQLError {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::ValidationError(es) => es.serialize(ser),
        }
    }
}

impl Serialize for RuleError {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        let mut map = ser.serialize_map(Some(2))?;

        map.serialize_key("message")?;
        map.serialize_value(self.message())?;

        map.serialize_key("path")?;
        map.serialize_value(&self.path().iter().map(|k| k.as_str()).collect::<Vec<_>>())?;

        map.end()
    }
}

impl Serialize for Object {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        let mut map = ser.serialize_map(Some(self.field_count()))?;
        for (f, v) in self.iter() {
            map.serialize_key(f)?;
            map.serialize_value(v)?;
        }
        map.end()
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => ser.serialize_unit(),
            Self::Scalar(s) => s.serialize(ser),
            Self::List(l) => l.serialize(ser),
            Self::Object(o) => o.serialize(ser),
        }
    }
}

impl<'de> Deserialize<'de> for InputValue {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        struct Visitor;

        impl<'de> de::Visitor<'de> for Visitor {
            type Value = InputValue;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a valid input value")
            }

            fn visit_bool<E: de::Error>(self, b: bool) -> Result<Self::Value, E> {
                Ok(InputValue::scalar(b))
            }

            fn visit_i64<E: de::Error>(self, n: i64) -> Result<Self::Value, E> {
                // Integers outside of `Int` range stay representable as `Float`.
                Ok(match i32::try_from(n) {
                    Ok(n) => InputValue::scalar(n),
                    Err(_) => InputValue::scalar(n as f64),
                })
            }

            fn visit_u64<E: de::Error>(self, n: u64) -> Result<Self::Value, E> {
                Ok(match i32::try_from(n) {
                    Ok(n) => InputValue::scalar(n),
                    Err(_) => InputValue::scalar(n as f64),
                })
            }

            fn visit_f64<E: de::Error>(self, f: f64) -> Result<Self::Value, E> {
                Ok(InputValue::scalar(f))
            }

            fn visit_str<E: de::Error>(self, s: &str) -> Result<Self::Value, E> {
                Ok(InputValue::scalar(s))
            }

            fn visit_string<E: de::Error>(self, s: String) -> Result<Self::Value, E> {
                Ok(InputValue::Scalar(ScalarValue::String(s)))
            }

            fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(InputValue::Null)
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(InputValue::Null)
            }

            fn visit_seq<V>(self, mut visitor: V) -> Result<Self::Value, V::Error>
            where
                V: de::SeqAccess<'de>,
            {
                let mut vals = Vec::with_capacity(visitor.size_hint().unwrap_or(0));
                while let Some(v) = visitor.next_element()? {
                    vals.push(v);
                }
                Ok(InputValue::list(vals))
            }

            fn visit_map<V>(self, _: V) -> Result<Self::Value, V::Error>
            where
                V: de::MapAccess<'de>,
            {
                Err(de::Error::invalid_type(de::Unexpected::Map, &self))
            }
        }

        de.deserialize_any(Visitor)
    }
}

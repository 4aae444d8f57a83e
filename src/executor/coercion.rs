//! Coercion of argument literals into runtime values.

use arcstr::ArcStr;
use indexmap::IndexMap;

use crate::{
    ast::{InputValue, Variables},
    executor::{ErrorKind, FieldError, FieldResult},
    schema::{
        meta::{EnumMeta, Field, MetaType, Type},
        registry::Registry,
    },
    types::base::Arguments,
    value::{ScalarValue, Value},
};

/// Coerces the literals provided for the arguments of a field.
///
/// Omitted arguments, and arguments bound to a variable absent from
/// `variables`, take their default value if they have one and are left out
/// otherwise.
pub(crate) fn coerce_arguments(
    registry: &Registry,
    field: &Field,
    provided: &IndexMap<ArcStr, InputValue>,
    variables: &Variables,
) -> FieldResult<Arguments> {
    if let Some(unknown) = provided.keys().find(|n| field.argument_by_name(n).is_none()) {
        return Err(FieldError::of_kind(
            ErrorKind::UnknownArgument,
            format!("Unknown argument \"{unknown}\" on field \"{}\"", field.name),
        ));
    }

    let mut args = IndexMap::with_capacity(field.arguments.len());
    for arg in &field.arguments {
        let literal = match provided.get(arg.name.as_str()) {
            Some(InputValue::Variable(var)) => variables.get(var).map(|v| (v, true)),
            Some(v) => Some((v, false)),
            None => None,
        };

        let value = match (literal, &arg.default_value) {
            (Some((v, from_variable)), _) => {
                coerce_input_value(registry, &arg.arg_type, v, variables, from_variable)
            }
            (None, Some(default)) => {
                coerce_input_value(registry, &arg.arg_type, default, variables, false)
            }
            (None, None) if arg.arg_type.is_non_null() => {
                return Err(FieldError::of_kind(
                    ErrorKind::MissingRequiredArgument,
                    format!(
                        "Field \"{}\" argument \"{}\" of type \"{}\" is required, but it was \
                         not provided",
                        field.name, arg.name, arg.arg_type,
                    ),
                ));
            }
            (None, None) => continue,
        }
        .map_err(|e| {
            e.map_message(|m| format!("Invalid value for argument \"{}\": {m}", arg.name))
        })?;

        args.insert(arg.name.clone(), value);
    }

    Ok(Arguments::new(args))
}

/// Coerces an input literal into a runtime value of the given [`Type`].
///
/// Enum values may only be spelled as strings when they come from a variable,
/// as variable values carry no enum literals of their own. A single value
/// where a list is expected is coerced into a list of one.
pub(crate) fn coerce_input_value(
    registry: &Registry,
    ty: &Type,
    value: &InputValue,
    variables: &Variables,
    from_variable: bool,
) -> FieldResult<Value> {
    if let InputValue::Variable(name) = value {
        return match variables.get(name) {
            Some(v) => coerce_input_value(registry, ty, v, variables, true),
            None => coerce_input_value(registry, ty, &InputValue::Null, variables, from_variable),
        };
    }

    match ty {
        Type::NonNull(inner) => {
            if value.is_null() {
                return Err(FieldError::of_kind(
                    ErrorKind::NullArgument,
                    format!("Expected non-nullable type \"{ty}\" not to be null"),
                ));
            }
            coerce_input_value(registry, inner, value, variables, from_variable)
        }
        _ if value.is_null() => Ok(Value::null()),
        Type::List(inner) => match value {
            InputValue::List(items) => items
                .iter()
                .map(|item| coerce_input_value(registry, inner, item, variables, from_variable))
                .collect::<FieldResult<Vec<_>>>()
                .map(Value::list),
            single => coerce_input_value(registry, inner, single, variables, from_variable)
                .map(|v| Value::list(vec![v])),
        },
        Type::Named(name) => match registry.get_type(name) {
            Some(MetaType::Scalar(s)) => s
                .parse(value)
                .map_err(|e| e.or_kind(ErrorKind::InvalidArgument)),
            Some(MetaType::Enum(e)) => coerce_enum(e, value, from_variable),
            Some(_) => Err(FieldError::of_kind(
                ErrorKind::InvalidArgument,
                format!("Type \"{name}\" is not an input type"),
            )),
            None => Err(FieldError::of_kind(
                ErrorKind::InvalidArgument,
                format!("Unknown type \"{name}\""),
            )),
        },
    }
}

fn coerce_enum(meta: &EnumMeta, value: &InputValue, from_variable: bool) -> FieldResult<Value> {
    let name = match value {
        InputValue::Enum(name) => name.as_str(),
        InputValue::Scalar(ScalarValue::String(name)) if from_variable => name.as_str(),
        _ => {
            return Err(FieldError::of_kind(
                ErrorKind::InvalidArgument,
                format!("Enum \"{}\" cannot represent non-enum value: {value}", meta.name),
            ));
        }
    };

    meta.value_by_name(name)
        .map(|v| v.value.clone())
        .ok_or_else(|| {
            FieldError::of_kind(
                ErrorKind::UnknownEnumValue,
                format!("Value \"{name}\" does not exist in \"{}\" enum", meta.name),
            )
        })
}

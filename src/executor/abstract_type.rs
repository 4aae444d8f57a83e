use arcstr::ArcStr;

use crate::{
    executor::{ErrorKind, FieldError, FieldResult},
    schema::{
        meta::{MetaType, ObjectMeta},
        model::Schema,
    },
    value::Value,
};

/// Determines the concrete object type of a value of an interface or union
/// type.
///
/// Uses the type's own resolver if it has one, and the `__typename` entry of
/// the value otherwise. The outcome has to be an object type which is a
/// possible type of the abstract one.
pub(crate) fn resolve_abstract_type<'s>(
    schema: &'s Schema,
    abstract_type: &MetaType,
    value: &Value,
) -> FieldResult<&'s ObjectMeta> {
    let resolve_type = match abstract_type {
        MetaType::Interface(i) => i.resolve_type.as_ref(),
        MetaType::Union(u) => u.resolve_type.as_ref(),
        _ => None,
    };
    let abstract_name = abstract_type.name();

    let type_name = match resolve_type {
        Some(resolve_type) => resolve_type(value),
        None => typename_of(value),
    };
    let Some(type_name) = type_name else {
        return Err(error(format!(
            "Abstract type \"{abstract_name}\" must resolve to an Object type at runtime. \
             Either the \"{abstract_name}\" type should provide a type resolver or the \
             value should carry a \"__typename\" entry",
        )));
    };

    let concrete = match schema.type_by_name(&type_name) {
        Some(MetaType::Object(o)) => o,
        Some(_) => {
            return Err(error(format!(
                "Abstract type \"{abstract_name}\" was resolved to a non-object type \
                 \"{type_name}\"",
            )));
        }
        None => {
            return Err(error(format!(
                "Abstract type \"{abstract_name}\" was resolved to a type \"{type_name}\" \
                 that does not exist inside the schema",
            )));
        }
    };

    if !schema.is_possible_type(abstract_name, &concrete.name) {
        return Err(error(format!(
            "Runtime Object type \"{type_name}\" is not a possible type for \"{abstract_name}\"",
        )));
    }

    tracing::trace!(%abstract_name, concrete = %type_name, "resolved abstract type");
    Ok(concrete)
}

fn typename_of(value: &Value) -> Option<ArcStr> {
    value
        .as_object_value()?
        .get_field_value("__typename")?
        .as_string_value()
        .map(Into::into)
}

fn error(message: String) -> FieldError {
    FieldError::of_kind(ErrorKind::AbstractTypeResolution, message)
}

//! Field resolution with `null` propagation.
//!
//! Every completion step yields either a [`Value`] or a [`Bubble`]. A
//! [`Bubble`] means the position became `null` and its error is already
//! recorded: nullable positions swallow it, non-null ones pass it up to their
//! parent.

use arcstr::ArcStr;
use futures::{
    future::{self, BoxFuture},
    stream::{FuturesOrdered, StreamExt as _},
    FutureExt as _,
};
use indexmap::IndexMap;

use crate::{
    ast::{self, OperationType, Selection},
    executor::{
        abstract_type::resolve_abstract_type, coercion::coerce_arguments, ErrorKind, Executor,
        FieldError, FieldPath,
    },
    schema::meta::{MetaType, ObjectMeta, Type},
    value::{Object, Value},
};

/// Marker of a `null` propagating towards the closest nullable position.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Bubble;

type Completion = Result<Value, Bubble>;

/// Executes the root selections of an operation against the `root` value.
///
/// Resolves to `null` if a `null` propagated up to the root.
pub(crate) async fn execute_operation(
    exec: &Executor<'_>,
    operation: &ast::Operation,
    root: &Value,
) -> Value {
    let Some(root_type) = exec.schema().root_type(operation.operation_type) else {
        return Value::null();
    };
    let serial = operation.operation_type == OperationType::Mutation;

    execute_fields(
        exec,
        root_type,
        root,
        operation.selection_set.iter().collect(),
        FieldPath::root(),
        serial,
    )
    .await
    .unwrap_or_default()
}

/// Groups the selections applying to the given object type by response key,
/// keeping the order in which keys first appear.
fn collect_fields<'r>(
    exec: &Executor<'_>,
    object_type: &ObjectMeta,
    selections: impl IntoIterator<Item = &'r Selection>,
    grouped: &mut IndexMap<ArcStr, Vec<&'r ast::Field>>,
) {
    for selection in selections {
        match selection {
            Selection::Field(f) => {
                let declared = f.name == "__typename"
                    || object_type.fields.get().iter().any(|d| d.name == f.name);
                if declared {
                    grouped.entry(f.response_key().clone()).or_default().push(f);
                }
            }
            Selection::InlineFragment(frag) => {
                let applies = frag.type_condition.as_ref().is_none_or(|cond| {
                    exec.schema()
                        .registry()
                        .fragment_applies(cond, &object_type.name)
                });
                if applies {
                    collect_fields(exec, object_type, &frag.selection_set, grouped);
                }
            }
        }
    }
}

/// Executes the selections of an object value, concurrently unless `serial`.
///
/// Bubbles if any non-null field bubbled.
fn execute_fields<'r>(
    exec: &'r Executor<'r>,
    object_type: &'r ObjectMeta,
    value: &'r Value,
    selections: Vec<&'r Selection>,
    path: FieldPath,
    serial: bool,
) -> BoxFuture<'r, Completion> {
    async move {
        let mut grouped = IndexMap::new();
        collect_fields(exec, object_type, selections, &mut grouped);

        let results = if serial {
            let mut results = Vec::with_capacity(grouped.len());
            for (key, fields) in grouped {
                let path = path.field(&key);
                results.push((key, execute_field(exec, object_type, value, fields, path).await));
            }
            results
        } else {
            grouped
                .into_iter()
                .map(|(key, fields)| {
                    let path = path.field(&key);
                    execute_field(exec, object_type, value, fields, path).map(|res| (key, res))
                })
                .collect::<FuturesOrdered<_>>()
                .collect::<Vec<_>>()
                .await
        };

        let mut object = Object::with_capacity(results.len());
        let mut bubbled = false;
        for (key, res) in results {
            match res {
                Ok(v) => {
                    object.add_field(key.as_str(), v);
                }
                Err(Bubble) => bubbled = true,
            }
        }

        if bubbled {
            Err(Bubble)
        } else {
            Ok(Value::object(object))
        }
    }
    .boxed()
}

/// Resolves and completes a single response key of an object.
async fn execute_field<'r>(
    exec: &'r Executor<'r>,
    object_type: &'r ObjectMeta,
    parent: &'r Value,
    fields: Vec<&'r ast::Field>,
    path: FieldPath,
) -> Completion {
    let Some(&field) = fields.first() else {
        return Ok(Value::null());
    };

    if field.name == "__typename" {
        return Ok(Value::scalar(object_type.name.as_str()));
    }

    let Some(meta_field) = object_type
        .fields
        .get()
        .iter()
        .find(|f| f.name == field.name)
    else {
        return Ok(Value::null());
    };
    let field_type = &meta_field.field_type;

    let args = match coerce_arguments(
        exec.schema().registry(),
        meta_field,
        &field.arguments,
        exec.variables(),
    ) {
        Ok(args) => args,
        Err(e) => return field_failed(exec, &path, e, field_type),
    };

    let resolved = match &meta_field.resolver {
        Some(resolver) => resolver(parent, &args).resolve().await,
        None => Ok(parent
            .as_object_value()
            .and_then(|o| o.get_field_value(&field.name))
            .cloned()
            .unwrap_or_default()),
    };
    let resolved = match resolved {
        Ok(v) => v,
        Err(e) => return field_failed(exec, &path, e, field_type),
    };

    let selections = fields
        .iter()
        .flat_map(|f| f.selection_set.iter().flatten())
        .collect();
    complete_value(exec, field_type, &resolved, selections, path).await
}

/// Records the failure of a field and nulls it.
fn field_failed(exec: &Executor<'_>, path: &FieldPath, error: FieldError, ty: &Type) -> Completion {
    exec.push_error(path, error);
    if ty.is_non_null() {
        Err(Bubble)
    } else {
        Ok(Value::null())
    }
}

/// Completes a resolved value according to its declared [`Type`].
fn complete_value<'r>(
    exec: &'r Executor<'r>,
    ty: &'r Type,
    value: &'r Value,
    selections: Vec<&'r Selection>,
    path: FieldPath,
) -> BoxFuture<'r, Completion> {
    async move {
        match ty {
            Type::NonNull(inner) => {
                match complete_inner(exec, inner, value, selections, path.clone()).await? {
                    Value::Null => {
                        exec.push_error(
                            &path,
                            FieldError::of_kind(
                                ErrorKind::NonNullViolation,
                                format!("Cannot return null for non-nullable type \"{ty}\""),
                            ),
                        );
                        Err(Bubble)
                    }
                    v => Ok(v),
                }
            }
            _ => Ok(complete_inner(exec, ty, value, selections, path)
                .await
                .unwrap_or_default()),
        }
    }
    .boxed()
}

/// Completes a resolved value of a nullable [`Type`], without swallowing
/// bubbles.
async fn complete_inner<'r>(
    exec: &'r Executor<'r>,
    ty: &'r Type,
    value: &'r Value,
    selections: Vec<&'r Selection>,
    path: FieldPath,
) -> Completion {
    if value.is_null() {
        return Ok(Value::null());
    }

    match ty {
        Type::NonNull(_) => complete_value(exec, ty, value, selections, path).await,
        Type::List(inner) => {
            let Some(items) = value.as_list_value() else {
                exec.push_error(
                    &path,
                    FieldError::serialization(format!(
                        "Expected a list for type \"{ty}\", found: {value}",
                    )),
                );
                return Err(Bubble);
            };

            future::join_all(items.iter().enumerate().map(|(i, item)| {
                complete_value(exec, inner, item, selections.clone(), path.index(i))
            }))
            .await
            .into_iter()
            .collect::<Result<Vec<_>, _>>()
            .map(Value::list)
        }
        Type::Named(name) => {
            let Some(meta) = exec.schema().type_by_name(name) else {
                exec.push_error(
                    &path,
                    FieldError::serialization(format!("Unknown type \"{name}\"")),
                );
                return Err(Bubble);
            };

            match meta {
                MetaType::Object(o) => {
                    execute_fields(exec, o, value, selections, path, false).await
                }
                MetaType::Interface(_) | MetaType::Union(_) => {
                    match resolve_abstract_type(exec.schema(), meta, value) {
                        Ok(o) => execute_fields(exec, o, value, selections, path, false).await,
                        Err(e) => {
                            exec.push_error(&path, e);
                            Err(Bubble)
                        }
                    }
                }
                MetaType::Scalar(_) | MetaType::Enum(_) => match meta.serialize(value) {
                    Some(Ok(v)) => Ok(v),
                    Some(Err(e)) => {
                        exec.push_error(&path, e.or_kind(ErrorKind::Serialization));
                        Err(Bubble)
                    }
                    None => Ok(Value::null()),
                },
            }
        }
    }
}

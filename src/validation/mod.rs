//! Operation validation related methods and data structures
//!
//! Binds every selection of an operation against the schema before any
//! resolver runs, so a malformed operation fails as a whole instead of
//! producing partial data.

mod context;

use crate::{
    ast::{Field, InlineFragment, Operation, OperationType, Selection},
    schema::{
        meta::{self, MetaType},
        model::Schema,
    },
};

pub use self::context::RuleError;
pub(crate) use self::context::ValidatorContext;

/// Validates the given [`Operation`] against the [`Schema`], returning every
/// violation found.
pub fn validate_operation(schema: &Schema, operation: &Operation) -> Vec<RuleError> {
    let mut ctx = ValidatorContext::new(schema);

    let root_name = match operation.operation_type {
        OperationType::Query => Some(schema.query_type_name()),
        OperationType::Mutation => schema.mutation_type_name(),
    };
    match root_name.and_then(|name| schema.type_by_name(name)) {
        Some(root) => visit_selection_set(&mut ctx, root, &operation.selection_set),
        None => ctx.report_error("Schema is not configured for mutations"),
    }

    ctx.into_errors()
}

fn visit_selection_set<'a>(
    ctx: &mut ValidatorContext<'a>,
    parent: &'a MetaType,
    selections: &[Selection],
) {
    for selection in selections {
        match selection {
            Selection::Field(f) => {
                ctx.with_pushed_key(f.response_key(), |ctx| visit_field(ctx, parent, f));
            }
            Selection::InlineFragment(frag) => visit_inline_fragment(ctx, parent, frag),
        }
    }
}

fn visit_field<'a>(ctx: &mut ValidatorContext<'a>, parent: &'a MetaType, field: &Field) {
    let schema = ctx.schema;

    if field.name == "__typename" {
        if schema.is_introspection_disabled() {
            ctx.report_error(
                "GraphQL introspection is not allowed, but the operation contained \
                 \"__typename\"",
            );
        }
        if field.selection_set.is_some() {
            ctx.report_error(
                "Field \"__typename\" must not have a selection since type \"String!\" has no \
                 subfields",
            );
        }
        return;
    }

    let Some(field_def) = field_def(schema, parent, &field.name) else {
        ctx.report_error(format!(
            "Unknown field \"{}\" on type \"{}\"",
            field.name,
            parent.name(),
        ));
        return;
    };
    let Some(target) = schema.registry().lookup_type(&field_def.field_type) else {
        return;
    };

    match (&field.selection_set, target.is_leaf()) {
        (Some(_), true) => ctx.report_error(format!(
            "Field \"{}\" must not have a selection since type \"{}\" has no subfields",
            field.name, field_def.field_type,
        )),
        (None, false) => ctx.report_error(format!(
            "Field \"{}\" of type \"{}\" must have a selection of subfields",
            field.name, field_def.field_type,
        )),
        (Some(selections), false) => visit_selection_set(ctx, target, selections),
        (None, true) => {}
    }
}

fn visit_inline_fragment<'a>(
    ctx: &mut ValidatorContext<'a>,
    parent: &'a MetaType,
    fragment: &InlineFragment,
) {
    let schema = ctx.schema;

    let target = match &fragment.type_condition {
        None => parent,
        Some(cond) => match schema.type_by_name(cond) {
            None => return ctx.report_error(format!("Unknown type \"{cond}\"")),
            Some(t) if !t.is_composite() => {
                return ctx.report_error(format!(
                    "Fragment cannot condition on non composite type \"{cond}\"",
                ));
            }
            Some(t) if !types_overlap(schema, parent, t) => {
                return ctx.report_error(format!(
                    "Fragment cannot be spread here as objects of type \"{}\" can never be of \
                     type \"{cond}\"",
                    parent.name(),
                ));
            }
            Some(t) => t,
        },
    };

    visit_selection_set(ctx, target, &fragment.selection_set);
}

/// Looks up a field declared on the given type or, for abstract types, on any
/// of its possible types.
fn field_def<'a>(schema: &'a Schema, parent: &'a MetaType, name: &str) -> Option<&'a meta::Field> {
    parent.field_by_name(name).or_else(|| {
        if !parent.is_abstract() {
            return None;
        }
        schema
            .possible_types(parent.name())
            .into_iter()
            .find_map(|o| o.fields.get().iter().find(|f| f.name == name))
    })
}

fn possible_names<'a>(schema: &'a Schema, t: &'a MetaType) -> Vec<&'a str> {
    match t {
        MetaType::Object(o) => vec![o.name.as_str()],
        _ => schema
            .possible_types(t.name())
            .into_iter()
            .map(|o| o.name.as_str())
            .collect(),
    }
}

fn types_overlap(schema: &Schema, a: &MetaType, b: &MetaType) -> bool {
    if a.name() == b.name() {
        return true;
    }
    let b_names = possible_names(schema, b);
    possible_names(schema, a)
        .into_iter()
        .any(|n| b_names.contains(&n))
}

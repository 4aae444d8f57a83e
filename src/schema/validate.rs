//! Structural rules every registry has to satisfy before it may back a
//! schema.

use arcstr::ArcStr;
use derive_more::{Display, Error};
use fnv::FnvHashSet;

use crate::{
    ast::Variables,
    executor::coercion::coerce_input_value,
    schema::{
        meta::{Argument, EnumMeta, Field, MetaType, ObjectMeta, Type, UnionMeta},
        registry::Registry,
    },
    types::name::Name,
};

/// Rule violated by a [`SchemaValidationError`].
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum SchemaRule {
    /// Names match `/^[_a-zA-Z][_a-zA-Z0-9]*$/`.
    #[display("invalid name")]
    InvalidName,
    /// Names starting with `__` are reserved.
    #[display("reserved name")]
    ReservedName,
    /// Objects and interfaces declare at least one field.
    #[display("no fields")]
    EmptyFields,
    /// Enums declare at least one value.
    #[display("no enum values")]
    EmptyEnum,
    /// Unions have at least one member.
    #[display("no union members")]
    EmptyUnion,
    /// Fields, arguments and enum values are unique by name.
    #[display("duplicate name")]
    DuplicateName,
    /// Every referenced type is registered.
    #[display("unknown type")]
    UnknownType,
    /// Arguments are of scalar or enum types, possibly wrapped.
    #[display("non-input argument")]
    NonInputArgument,
    /// A non-null type never directly wraps another non-null type.
    #[display("nested non-null")]
    NestedNonNull,
    /// Default values coerce against their argument type.
    #[display("invalid default value")]
    InvalidDefaultValue,
    /// Objects only implement interfaces.
    #[display("not an interface")]
    NotAnInterface,
    /// Objects declare every field of their interfaces.
    #[display("missing interface field")]
    MissingInterfaceField,
    /// Object fields narrow the type of the interface field they implement.
    #[display("incompatible field type")]
    IncompatibleFieldType,
    /// Object fields accept every argument of the interface field.
    #[display("missing interface argument")]
    MissingInterfaceArgument,
    /// Object field arguments have the type of the interface field argument.
    #[display("incompatible argument type")]
    IncompatibleArgumentType,
    /// Object fields don't require arguments their interface field lacks.
    #[display("required extra argument")]
    RequiredExtraArgument,
    /// Unions only contain object types.
    #[display("non-object union member")]
    NonObjectUnionMember,
    /// The query and mutation roots are object types.
    #[display("invalid root type")]
    InvalidRootType,
}

/// Violation of a structural rule, naming the offending type.
#[derive(Clone, Debug, Display, Eq, Error, PartialEq)]
#[display("{type_name}: {message}")]
pub struct SchemaValidationError {
    /// Name of the offending type.
    pub type_name: ArcStr,
    /// Violated rule.
    pub rule: SchemaRule,
    /// Human readable description of the violation.
    pub message: String,
}

impl SchemaValidationError {
    pub(crate) fn new(type_name: &ArcStr, rule: SchemaRule, message: impl Into<String>) -> Self {
        Self {
            type_name: type_name.clone(),
            rule,
            message: message.into(),
        }
    }
}

struct Validator<'r> {
    registry: &'r Registry,
    errors: Vec<SchemaValidationError>,
}

pub(crate) fn validate_registry(registry: &Registry) -> Vec<SchemaValidationError> {
    let mut v = Validator {
        registry,
        errors: vec![],
    };
    for meta in registry.types() {
        v.validate_type(meta);
    }
    for err in &v.errors {
        tracing::debug!(type_name = %err.type_name, rule = %err.rule, "{}", err.message);
    }
    v.errors
}

/// Checks that the named root type exists and is an object type.
pub(crate) fn validate_root(
    registry: &Registry,
    name: &str,
    operation: &str,
) -> Option<SchemaValidationError> {
    match registry.get_type(name) {
        Some(MetaType::Object(_)) => None,
        Some(meta) => Some(SchemaValidationError::new(
            meta.name(),
            SchemaRule::InvalidRootType,
            format!("{operation} root type must be an object type, got {:?}", meta.type_kind()),
        )),
        None => Some(SchemaValidationError::new(
            &ArcStr::from(name),
            SchemaRule::InvalidRootType,
            format!("{operation} root type \"{name}\" is not registered"),
        )),
    }
}

impl Validator<'_> {
    fn report(&mut self, type_name: &ArcStr, rule: SchemaRule, message: impl Into<String>) {
        self.errors
            .push(SchemaValidationError::new(type_name, rule, message));
    }

    fn validate_name(&mut self, type_name: &ArcStr, name: &str, what: &str) {
        if !Name::is_valid(name) {
            self.report(
                type_name,
                SchemaRule::InvalidName,
                format!(
                    "{what} names must match /^[_a-zA-Z][_a-zA-Z0-9]*$/ but \"{name}\" does not",
                ),
            );
        } else if Name::is_reserved(name) {
            self.report(
                type_name,
                SchemaRule::ReservedName,
                format!("{what} \"{name}\" must not begin with \"__\", which is reserved"),
            );
        }
    }

    fn validate_type(&mut self, meta: &MetaType) {
        let name = meta.name();
        self.validate_name(name, name, "Type");

        match meta {
            MetaType::Scalar(_) => {}
            MetaType::Enum(e) => self.validate_enum(e),
            MetaType::Object(o) => {
                self.validate_fields(name, o.fields.get());
                self.validate_interfaces(o);
            }
            MetaType::Interface(i) => self.validate_fields(name, i.fields.get()),
            MetaType::Union(u) => self.validate_union(u),
        }
    }

    fn validate_enum(&mut self, e: &EnumMeta) {
        if e.values.is_empty() {
            self.report(
                &e.name,
                SchemaRule::EmptyEnum,
                format!("Enum \"{}\" must define one or more values", e.name),
            );
        }
        let mut seen = FnvHashSet::default();
        for value in &e.values {
            self.validate_name(&e.name, &value.name, "Enum value");
            if !seen.insert(value.name.as_str()) {
                self.report(
                    &e.name,
                    SchemaRule::DuplicateName,
                    format!("Enum value \"{}.{}\" is defined more than once", e.name, value.name),
                );
            }
        }
    }

    fn validate_fields(&mut self, type_name: &ArcStr, fields: &[Field]) {
        if fields.is_empty() {
            self.report(
                type_name,
                SchemaRule::EmptyFields,
                format!("Type \"{type_name}\" must define one or more fields"),
            );
        }

        let mut seen = FnvHashSet::default();
        for field in fields {
            self.validate_name(type_name, &field.name, "Field");
            if !seen.insert(field.name.as_str()) {
                self.report(
                    type_name,
                    SchemaRule::DuplicateName,
                    format!("Field \"{type_name}.{}\" is defined more than once", field.name),
                );
            }

            let at = format!("{type_name}.{}", field.name);
            self.validate_type_ref(type_name, &field.field_type, &at);

            let mut seen_args = FnvHashSet::default();
            for arg in &field.arguments {
                let at = format!("{at}({}:)", arg.name);
                self.validate_name(type_name, &arg.name, "Argument");
                if !seen_args.insert(arg.name.as_str()) {
                    self.report(
                        type_name,
                        SchemaRule::DuplicateName,
                        format!("Argument \"{at}\" is defined more than once"),
                    );
                }
                self.validate_argument(type_name, arg, &at);
            }
        }
    }

    /// Returns whether the referenced named type is registered.
    fn validate_type_ref(&mut self, type_name: &ArcStr, ty: &Type, at: &str) -> bool {
        if has_nested_non_null(ty) {
            self.report(
                type_name,
                SchemaRule::NestedNonNull,
                format!("Type of \"{at}\" wraps a non-null type into a non-null type: {ty}"),
            );
        }
        if self.registry.lookup_type(ty).is_none() {
            self.report(
                type_name,
                SchemaRule::UnknownType,
                format!("\"{at}\" references unknown type \"{}\"", ty.innermost_name()),
            );
            return false;
        }
        true
    }

    fn validate_argument(&mut self, type_name: &ArcStr, arg: &Argument, at: &str) {
        if !self.validate_type_ref(type_name, &arg.arg_type, at) {
            return;
        }
        if self
            .registry
            .lookup_type(&arg.arg_type)
            .is_some_and(|t| !t.is_input())
        {
            self.report(
                type_name,
                SchemaRule::NonInputArgument,
                format!("The type of \"{at}\" must be an input type, got \"{}\"", arg.arg_type),
            );
            return;
        }

        let Some(default) = &arg.default_value else {
            return;
        };
        let problem = if !default.referenced_variables().is_empty() {
            Some("variables are not allowed".to_owned())
        } else {
            coerce_input_value(self.registry, &arg.arg_type, default, &Variables::new(), false)
                .err()
                .map(|e| e.message().to_owned())
        };
        if let Some(problem) = problem {
            self.report(
                type_name,
                SchemaRule::InvalidDefaultValue,
                format!("Default value {default} of \"{at}\" is invalid: {problem}"),
            );
        }
    }

    fn validate_interfaces(&mut self, object: &ObjectMeta) {
        for iface_name in &object.interface_names {
            let iface = match self.registry.get_type(iface_name) {
                Some(MetaType::Interface(i)) => i,
                Some(_) => {
                    self.report(
                        &object.name,
                        SchemaRule::NotAnInterface,
                        format!(
                            "Type \"{}\" can only implement interfaces, and \"{iface_name}\" \
                             is not one",
                            object.name,
                        ),
                    );
                    continue;
                }
                None => {
                    self.report(
                        &object.name,
                        SchemaRule::UnknownType,
                        format!(
                            "Type \"{}\" implements unknown interface \"{iface_name}\"",
                            object.name,
                        ),
                    );
                    continue;
                }
            };

            for iface_field in iface.fields.get() {
                let at = format!("{iface_name}.{}", iface_field.name);
                let Some(field) = object
                    .fields
                    .get()
                    .iter()
                    .find(|f| f.name == iface_field.name)
                else {
                    self.report(
                        &object.name,
                        SchemaRule::MissingInterfaceField,
                        format!(
                            "Interface field \"{at}\" expected but \"{}\" does not provide it",
                            object.name,
                        ),
                    );
                    continue;
                };

                if !self
                    .registry
                    .is_subtype(&field.field_type, &iface_field.field_type)
                {
                    self.report(
                        &object.name,
                        SchemaRule::IncompatibleFieldType,
                        format!(
                            "Interface field \"{at}\" expects type \"{}\" but \"{}.{}\" is \
                             type \"{}\"",
                            iface_field.field_type, object.name, field.name, field.field_type,
                        ),
                    );
                }

                for iface_arg in &iface_field.arguments {
                    match field.argument_by_name(&iface_arg.name) {
                        None => self.report(
                            &object.name,
                            SchemaRule::MissingInterfaceArgument,
                            format!(
                                "Interface field argument \"{at}({}:)\" expected but \"{}.{}\" \
                                 does not provide it",
                                iface_arg.name, object.name, field.name,
                            ),
                        ),
                        Some(arg) if arg.arg_type != iface_arg.arg_type => self.report(
                            &object.name,
                            SchemaRule::IncompatibleArgumentType,
                            format!(
                                "Interface field argument \"{at}({}:)\" expects type \"{}\" but \
                                 \"{}.{}({}:)\" is type \"{}\"",
                                iface_arg.name,
                                iface_arg.arg_type,
                                object.name,
                                field.name,
                                arg.name,
                                arg.arg_type,
                            ),
                        ),
                        Some(_) => {}
                    }
                }

                for arg in &field.arguments {
                    if arg.arg_type.is_non_null()
                        && arg.default_value.is_none()
                        && iface_field.argument_by_name(&arg.name).is_none()
                    {
                        self.report(
                            &object.name,
                            SchemaRule::RequiredExtraArgument,
                            format!(
                                "Object field \"{}.{}\" includes required argument \"{}\" that is \
                                 missing from the interface field \"{at}\"",
                                object.name, field.name, arg.name,
                            ),
                        );
                    }
                }
            }
        }
    }

    fn validate_union(&mut self, union: &UnionMeta) {
        if union.of_type_names.is_empty() {
            self.report(
                &union.name,
                SchemaRule::EmptyUnion,
                format!("Union \"{}\" must define one or more member types", union.name),
            );
        }

        let mut seen = FnvHashSet::default();
        for member in &union.of_type_names {
            if !seen.insert(member.as_str()) {
                self.report(
                    &union.name,
                    SchemaRule::DuplicateName,
                    format!("Union \"{}\" can only include type \"{member}\" once", union.name),
                );
            }
            match self.registry.get_type(member) {
                Some(MetaType::Object(_)) => {}
                Some(_) => self.report(
                    &union.name,
                    SchemaRule::NonObjectUnionMember,
                    format!(
                        "Union \"{}\" can only include object types, it cannot include \
                         \"{member}\"",
                        union.name,
                    ),
                ),
                None => self.report(
                    &union.name,
                    SchemaRule::UnknownType,
                    format!("Union \"{}\" includes unknown type \"{member}\"", union.name),
                ),
            }
        }
    }
}

fn has_nested_non_null(ty: &Type) -> bool {
    match ty {
        Type::Named(_) => false,
        Type::NonNull(inner) if inner.is_non_null() => true,
        Type::NonNull(inner) | Type::List(inner) => has_nested_non_null(inner),
    }
}

use arcstr::ArcStr;
use derive_more::{Display, Error};
use fnv::FnvBuildHasher;
use indexmap::IndexMap;

use crate::{
    schema::{
        meta::{MetaType, ObjectMeta, Type, UnionMeta},
        validate::{self, SchemaValidationError},
    },
    types::scalars::builtin_scalars,
};

/// Error of registering or looking up a named type.
#[derive(Clone, Debug, Display, Eq, Error, PartialEq)]
pub enum RegistryError {
    /// A type with the same name is already registered.
    #[display("Type \"{_0}\" is already registered")]
    DuplicateType(#[error(not(source))] ArcStr),

    /// No type with the given name is registered.
    #[display("Unknown type \"{_0}\"")]
    UnknownType(#[error(not(source))] ArcStr),
}

/// A type registry holding every named type of a schema.
///
/// Built-in scalars are registered on creation. Once every type is
/// registered, the registry is validated and frozen into a [`Schema`].
///
/// [`Schema`]: crate::Schema
#[derive(Debug)]
pub struct Registry {
    types: IndexMap<ArcStr, MetaType, FnvBuildHasher>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Constructs a new [`Registry`] with the built-in scalars registered.
    pub fn new() -> Self {
        let mut types = IndexMap::default();
        for scalar in builtin_scalars() {
            types.insert(scalar.name.clone(), scalar.into_meta());
        }
        Self { types }
    }

    /// Registers a new named type.
    ///
    /// # Errors
    ///
    /// If a type with the same name is already registered.
    pub fn register(&mut self, meta: MetaType) -> Result<(), RegistryError> {
        let name = meta.name().clone();
        if self.types.contains_key(&name) {
            return Err(RegistryError::DuplicateType(name));
        }
        tracing::trace!(type_name = %name, kind = ?meta.type_kind(), "registered type");
        self.types.insert(name, meta);
        Ok(())
    }

    /// Looks up a registered type by its name.
    ///
    /// # Errors
    ///
    /// If no type with the given name is registered.
    pub fn resolve_named_type(&self, name: &str) -> Result<&MetaType, RegistryError> {
        self.get_type(name)
            .ok_or_else(|| RegistryError::UnknownType(name.into()))
    }

    /// Looks up a registered type by its name.
    pub fn get_type(&self, name: &str) -> Option<&MetaType> {
        self.types.get(name)
    }

    /// Looks up the named type a [`Type`] reference ends in.
    pub fn lookup_type(&self, ty: &Type) -> Option<&MetaType> {
        self.get_type(ty.innermost_name())
    }

    /// Returns an iterator over all registered types in registration order.
    pub fn types(&self) -> impl Iterator<Item = &MetaType> {
        self.types.values()
    }

    /// Looks up a registered object type by its name.
    pub fn concrete_type_by_name(&self, name: &str) -> Option<&ObjectMeta> {
        match self.get_type(name)? {
            MetaType::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Validates every registered type, forcing lazy field sets.
    ///
    /// # Errors
    ///
    /// With every violated rule, not just the first one.
    pub fn validate(&self) -> Result<(), Vec<SchemaValidationError>> {
        let errors = validate::validate_registry(self);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Lists the object types values of the given abstract type may have.
    ///
    /// Empty for anything but interfaces and unions.
    pub fn possible_types(&self, abstract_name: &str) -> Vec<&ObjectMeta> {
        match self.get_type(abstract_name) {
            Some(MetaType::Union(UnionMeta { of_type_names, .. })) => of_type_names
                .iter()
                .filter_map(|n| self.concrete_type_by_name(n))
                .collect(),
            Some(MetaType::Interface(_)) => self
                .types
                .values()
                .filter_map(|t| match t {
                    MetaType::Object(o) if o.interface_names.iter().any(|i| i == abstract_name) => {
                        Some(o)
                    }
                    _ => None,
                })
                .collect(),
            _ => vec![],
        }
    }

    /// Checks whether values of the given object type may be values of the
    /// given abstract type.
    pub fn is_possible_type(&self, abstract_name: &str, concrete_name: &str) -> bool {
        match self.get_type(abstract_name) {
            Some(MetaType::Union(u)) => u.of_type_names.iter().any(|n| n == concrete_name),
            Some(MetaType::Interface(_)) => self
                .concrete_type_by_name(concrete_name)
                .is_some_and(|o| o.interface_names.iter().any(|i| i == abstract_name)),
            _ => false,
        }
    }

    /// Checks whether a value of the `sub_type` may stand where the
    /// `super_type` is expected.
    ///
    /// Non-null narrows nullable, lists are covariant, and an object narrows
    /// any abstract type it is a possible type of.
    pub fn is_subtype(&self, sub_type: &Type, super_type: &Type) -> bool {
        use Type::{List, Named, NonNull};

        if super_type == sub_type {
            return true;
        }

        match (super_type, sub_type) {
            (NonNull(super_inner), NonNull(sub_inner)) => self.is_subtype(sub_inner, super_inner),
            (NonNull(_), _) => false,
            (_, NonNull(sub_inner)) => self.is_subtype(sub_inner, super_type),
            (List(super_inner), List(sub_inner)) => self.is_subtype(sub_inner, super_inner),
            (Named(super_name), Named(sub_name)) => self.is_possible_type(super_name, sub_name),
            _ => false,
        }
    }

    /// Checks whether the `type_condition` of an inline fragment applies to
    /// values of the given object type.
    pub(crate) fn fragment_applies(&self, type_condition: &str, concrete_name: &str) -> bool {
        type_condition == concrete_name || self.is_possible_type(type_condition, concrete_name)
    }
}

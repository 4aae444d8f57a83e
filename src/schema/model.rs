use arcstr::ArcStr;

use crate::{
    ast::OperationType,
    schema::{
        meta::{MetaType, ObjectMeta},
        registry::Registry,
        validate::{self, SchemaValidationError},
    },
};

/// Validated, immutable schema
///
/// Brings the query and the optional mutation root types together with the
/// [`Registry`] holding every type they reach. Once built, a [`Schema`] is
/// only ever read, so it may be shared by any number of concurrent
/// executions.
#[derive(Debug)]
pub struct Schema {
    registry: Registry,
    query_type_name: ArcStr,
    mutation_type_name: Option<ArcStr>,
    introspection_disabled: bool,
}

static_assertions::assert_impl_all!(Schema: Send, Sync);

impl Schema {
    /// Validates the `registry` and freezes it into a new [`Schema`] rooted at
    /// the named query and, optionally, mutation object types.
    ///
    /// # Errors
    ///
    /// With every structural violation found in the `registry`, including
    /// missing or non-object root types.
    pub fn new(
        registry: Registry,
        query: &str,
        mutation: Option<&str>,
    ) -> Result<Self, Vec<SchemaValidationError>> {
        let mut errors = registry.validate().err().unwrap_or_default();
        errors.extend(validate::validate_root(&registry, query, "Query"));
        if let Some(mutation) = mutation {
            errors.extend(validate::validate_root(&registry, mutation, "Mutation"));
        }

        if !errors.is_empty() {
            tracing::warn!(errors = errors.len(), "schema validation failed");
            return Err(errors);
        }

        tracing::debug!(
            query,
            mutation,
            types = registry.types().count(),
            "schema built",
        );
        Ok(Self {
            registry,
            query_type_name: query.into(),
            mutation_type_name: mutation.map(Into::into),
            introspection_disabled: false,
        })
    }

    /// Disables the `__typename` meta-field on every type of this [`Schema`].
    ///
    /// Operations selecting it then fail validation.
    #[must_use]
    pub fn disable_introspection(mut self) -> Self {
        self.introspection_disabled = true;
        self
    }

    /// Whether the `__typename` meta-field is disabled.
    pub fn is_introspection_disabled(&self) -> bool {
        self.introspection_disabled
    }

    /// The [`Registry`] backing this [`Schema`].
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Name of the query root type.
    pub fn query_type_name(&self) -> &str {
        &self.query_type_name
    }

    /// Name of the mutation root type, if any.
    pub fn mutation_type_name(&self) -> Option<&str> {
        self.mutation_type_name.as_deref()
    }

    /// The query root type.
    pub fn query_type(&self) -> Option<&ObjectMeta> {
        self.registry.concrete_type_by_name(&self.query_type_name)
    }

    /// The mutation root type, if any.
    pub fn mutation_type(&self) -> Option<&ObjectMeta> {
        self.registry
            .concrete_type_by_name(self.mutation_type_name.as_deref()?)
    }

    /// The root type operations of the given type start at.
    pub fn root_type(&self, operation_type: OperationType) -> Option<&ObjectMeta> {
        match operation_type {
            OperationType::Query => self.query_type(),
            OperationType::Mutation => self.mutation_type(),
        }
    }

    /// Looks up a type by its name.
    pub fn type_by_name(&self, name: &str) -> Option<&MetaType> {
        self.registry.get_type(name)
    }

    /// Looks up an object type by its name.
    pub fn concrete_type_by_name(&self, name: &str) -> Option<&ObjectMeta> {
        self.registry.concrete_type_by_name(name)
    }

    /// Lists the object types values of the given abstract type may have.
    pub fn possible_types(&self, abstract_name: &str) -> Vec<&ObjectMeta> {
        self.registry.possible_types(abstract_name)
    }

    /// Checks whether values of the given object type may be values of the
    /// given abstract type.
    pub fn is_possible_type(&self, abstract_name: &str, concrete_name: &str) -> bool {
        self.registry.is_possible_type(abstract_name, concrete_name)
    }
}

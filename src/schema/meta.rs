//! Types used to describe a schema

use std::{
    fmt,
    sync::{Arc, OnceLock},
};

use arcstr::ArcStr;

use crate::{
    ast::InputValue,
    executor::{FieldError, FieldResult},
    types::base::{Arguments, Resolution, TypeKind},
    value::Value,
};

/// A type reference in a field or argument declaration.
///
/// References name the type they point to, so definitions may refer to types
/// registered later, including themselves.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Type {
    /// A nullable named type, e.g. `String`
    Named(ArcStr),
    /// A nullable list type, e.g. `[String]`
    ///
    /// The list itself is what's nullable, the containing type might be non-null.
    List(Box<Type>),
    /// A non-null type, e.g. `String!` or `[String]!`
    NonNull(Box<Type>),
}

impl Type {
    /// Builds a nullable reference to the named type.
    pub fn named(name: impl Into<ArcStr>) -> Self {
        Self::Named(name.into())
    }

    /// Wraps this [`Type`] into a nullable list.
    #[must_use]
    pub fn list(self) -> Self {
        Self::List(Box::new(self))
    }

    /// Wraps this [`Type`] into a non-null one.
    #[must_use]
    pub fn non_null(self) -> Self {
        Self::NonNull(Box::new(self))
    }

    /// Get the name of a named type.
    ///
    /// Only applies to nullable named types; wrappers will return `None`.
    pub fn name(&self) -> Option<&ArcStr> {
        match self {
            Self::Named(n) => Some(n),
            _ => None,
        }
    }

    /// Get the innermost name by unpacking lists and non-null wrappers.
    ///
    /// All type references contain exactly one named type.
    pub fn innermost_name(&self) -> &ArcStr {
        match self {
            Self::Named(n) => n,
            Self::List(t) | Self::NonNull(t) => t.innermost_name(),
        }
    }

    /// Determines if a type only can represent non-null values.
    pub fn is_non_null(&self) -> bool {
        matches!(self, Self::NonNull(_))
    }

    /// Strips the outermost non-null wrapper, if any.
    pub fn nullable(&self) -> &Self {
        match self {
            Self::NonNull(t) => t,
            t => t,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(n) => write!(f, "{n}"),
            Self::List(t) => write!(f, "[{t}]"),
            Self::NonNull(t) => write!(f, "{t}!"),
        }
    }
}

/// Shortcut for a scalar serialization function.
///
/// Turns runtime data into the literal put into a response.
pub type SerializeFn = fn(&Value) -> FieldResult<Value>;

/// Shortcut for a scalar parsing function.
///
/// Turns a variable-free input literal into runtime data handed to resolvers.
pub type ParseFn = fn(&InputValue) -> FieldResult<Value>;

/// Shortcut for a field resolver.
pub type ResolverFn = Arc<dyn Fn(&Value, &Arguments) -> Resolution + Send + Sync>;

/// Shortcut for an abstract type's concrete type resolver.
pub type ResolveTypeFn = Arc<dyn Fn(&Value) -> Option<ArcStr> + Send + Sync>;

/// Whether an item is deprecated, with context.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum DeprecationStatus {
    /// The field/variant is not deprecated.
    Current,
    /// The field/variant is deprecated, with an optional reason
    Deprecated(Option<ArcStr>),
}

impl DeprecationStatus {
    /// If this deprecation status indicates the item is deprecated.
    pub fn is_deprecated(&self) -> bool {
        matches!(self, Self::Deprecated(_))
    }

    /// An optional reason for the deprecation, or none if `Current`.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Current => None,
            Self::Deprecated(rsn) => rsn.as_deref(),
        }
    }
}

/// Field set of an object or an interface.
///
/// Either given eagerly or produced on first access by a thunk, so mutually
/// recursive types can be declared in any order. A thunk runs at most once.
pub struct Fields {
    thunk: Option<Box<dyn Fn() -> Vec<Field> + Send + Sync>>,
    cell: OnceLock<Vec<Field>>,
}

impl Fields {
    /// Wraps already built fields.
    pub fn eager(fields: Vec<Field>) -> Self {
        Self {
            thunk: None,
            cell: OnceLock::from(fields),
        }
    }

    /// Defers building the fields until they are first needed.
    pub fn lazy<F>(thunk: F) -> Self
    where
        F: Fn() -> Vec<Field> + Send + Sync + 'static,
    {
        Self {
            thunk: Some(Box::new(thunk)),
            cell: OnceLock::new(),
        }
    }

    /// Returns the fields, building them on the first call.
    pub fn get(&self) -> &[Field] {
        self.cell
            .get_or_init(|| self.thunk.as_ref().map(|f| f()).unwrap_or_default())
    }

    /// Whether the fields were already built.
    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl From<Vec<Field>> for Fields {
    fn from(fields: Vec<Field>) -> Self {
        Self::eager(fields)
    }
}

impl fmt::Debug for Fields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cell.get() {
            Some(fields) => f.debug_list().entries(fields).finish(),
            None => f.write_str("<lazy>"),
        }
    }
}

/// Scalar type metadata
pub struct ScalarMeta {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    pub(crate) serialize_fn: SerializeFn,
    pub(crate) parse_fn: ParseFn,
}

/// Object type metadata
#[derive(Debug)]
pub struct ObjectMeta {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[doc(hidden)]
    pub fields: Fields,
    #[doc(hidden)]
    pub interface_names: Vec<ArcStr>,
}

/// Enum type metadata
#[derive(Debug)]
pub struct EnumMeta {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[doc(hidden)]
    pub values: Vec<EnumValue>,
}

/// Interface type metadata
pub struct InterfaceMeta {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[doc(hidden)]
    pub fields: Fields,
    pub(crate) resolve_type: Option<ResolveTypeFn>,
}

/// Union type metadata
pub struct UnionMeta {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[doc(hidden)]
    pub of_type_names: Vec<ArcStr>,
    pub(crate) resolve_type: Option<ResolveTypeFn>,
}

/// Generic type metadata
#[derive(Debug)]
pub enum MetaType {
    #[doc(hidden)]
    Scalar(ScalarMeta),
    #[doc(hidden)]
    Object(ObjectMeta),
    #[doc(hidden)]
    Enum(EnumMeta),
    #[doc(hidden)]
    Interface(InterfaceMeta),
    #[doc(hidden)]
    Union(UnionMeta),
}

/// Metadata for a field
#[derive(Clone)]
pub struct Field {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[doc(hidden)]
    pub arguments: Vec<Argument>,
    #[doc(hidden)]
    pub field_type: Type,
    #[doc(hidden)]
    pub deprecation_status: DeprecationStatus,
    pub(crate) resolver: Option<ResolverFn>,
}

/// Metadata for an argument to a field
#[derive(Clone, Debug)]
pub struct Argument {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[doc(hidden)]
    pub arg_type: Type,
    #[doc(hidden)]
    pub default_value: Option<InputValue>,
}

/// Metadata for a single value in an enum
#[derive(Clone, Debug)]
pub struct EnumValue {
    /// The name of the enum value
    ///
    /// This is the string literal representation of the enum in responses.
    pub name: ArcStr,
    /// The internal value handed to resolvers in place of the name.
    pub value: Value,
    /// The optional description of the enum value.
    ///
    /// Note: this is not the description of the enum itself; it's the
    /// description of this enum _value_.
    pub description: Option<ArcStr>,
    /// Whether the field is deprecated or not, with an optional reason.
    pub deprecation_status: DeprecationStatus,
}

impl MetaType {
    /// Access the name of the type.
    pub fn name(&self) -> &ArcStr {
        match self {
            Self::Scalar(ScalarMeta { name, .. })
            | Self::Object(ObjectMeta { name, .. })
            | Self::Enum(EnumMeta { name, .. })
            | Self::Interface(InterfaceMeta { name, .. })
            | Self::Union(UnionMeta { name, .. }) => name,
        }
    }

    /// Access the description of the type, if any.
    pub fn description(&self) -> Option<&ArcStr> {
        match self {
            Self::Scalar(ScalarMeta { description, .. })
            | Self::Object(ObjectMeta { description, .. })
            | Self::Enum(EnumMeta { description, .. })
            | Self::Interface(InterfaceMeta { description, .. })
            | Self::Union(UnionMeta { description, .. }) => description.as_ref(),
        }
    }

    /// Construct a `TypeKind` for a given type
    pub fn type_kind(&self) -> TypeKind {
        match self {
            Self::Scalar(_) => TypeKind::Scalar,
            Self::Object(_) => TypeKind::Object,
            Self::Enum(_) => TypeKind::Enum,
            Self::Interface(_) => TypeKind::Interface,
            Self::Union(_) => TypeKind::Union,
        }
    }

    /// Access the fields of the type, building them if they're lazy.
    ///
    /// Only objects and interfaces have fields.
    pub fn fields(&self) -> Option<&[Field]> {
        match self {
            Self::Object(ObjectMeta { fields, .. })
            | Self::Interface(InterfaceMeta { fields, .. }) => Some(fields.get()),
            _ => None,
        }
    }

    /// Access a field's meta data given its name
    ///
    /// Only objects and interfaces have fields. This method always returns `None` for other types.
    pub fn field_by_name(&self, name: &str) -> Option<&Field> {
        self.fields()?.iter().find(|f| f.name == name)
    }

    /// Returns true if the type is a composite type
    ///
    /// Objects, interfaces, and unions are composite.
    pub fn is_composite(&self) -> bool {
        self.type_kind().is_composite()
    }

    /// Returns true if the type can occur in leaf positions in queries
    ///
    /// Only enums and scalars are leaf types.
    pub fn is_leaf(&self) -> bool {
        self.type_kind().is_leaf()
    }

    /// Returns true if the type is abstract
    ///
    /// Only interfaces and unions are abstract types.
    pub fn is_abstract(&self) -> bool {
        self.type_kind().is_abstract()
    }

    /// Returns true if the type can be used in input positions, e.g. arguments or variables
    ///
    /// Only scalars and enums are input types.
    pub fn is_input(&self) -> bool {
        self.is_leaf()
    }

    /// Returns true if the type is built-in.
    pub fn is_builtin(&self) -> bool {
        let name = self.name();
        name.starts_with("__")
            || ["Boolean", "String", "Int", "Float", "ID"].contains(&name.as_str())
    }

    /// Serializes runtime data into a response literal.
    ///
    /// Only leaf types can be serialized.
    pub(crate) fn serialize(&self, value: &Value) -> Option<FieldResult<Value>> {
        match self {
            Self::Scalar(s) => Some(s.serialize(value)),
            Self::Enum(e) => Some(e.serialize(value)),
            _ => None,
        }
    }
}

impl ScalarMeta {
    /// Builds a new [`ScalarMeta`] type with the specified `name` and
    /// conversions.
    pub fn new(name: impl Into<ArcStr>, serialize: SerializeFn, parse: ParseFn) -> Self {
        Self {
            name: name.into(),
            description: None,
            serialize_fn: serialize,
            parse_fn: parse,
        }
    }

    /// Sets the `description` of this [`ScalarMeta`] type.
    ///
    /// Overwrites any previously set description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Serializes runtime data into a response literal.
    pub fn serialize(&self, value: &Value) -> FieldResult<Value> {
        (self.serialize_fn)(value)
    }

    /// Parses an input literal into runtime data.
    pub fn parse(&self, value: &InputValue) -> FieldResult<Value> {
        (self.parse_fn)(value)
    }

    /// Wraps this [`ScalarMeta`] type into a generic [`MetaType`].
    pub fn into_meta(self) -> MetaType {
        MetaType::Scalar(self)
    }
}

impl ObjectMeta {
    /// Build a new [`ObjectMeta`] type with the specified `name` and `fields`.
    pub fn new(name: impl Into<ArcStr>, fields: impl Into<Fields>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: fields.into(),
            interface_names: vec![],
        }
    }

    /// Sets the `description` of this [`ObjectMeta`] type.
    ///
    /// Overwrites any previously set description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the `interfaces` this [`ObjectMeta`] type implements.
    ///
    /// Overwrites any previously set list of interfaces.
    #[must_use]
    pub fn interfaces(mut self, interfaces: impl IntoIterator<Item = impl Into<ArcStr>>) -> Self {
        self.interface_names = interfaces.into_iter().map(Into::into).collect();
        self
    }

    /// Wraps this [`ObjectMeta`] type into a generic [`MetaType`].
    pub fn into_meta(self) -> MetaType {
        MetaType::Object(self)
    }
}

impl EnumMeta {
    /// Build a new [`EnumMeta`] type with the specified `name` and possible
    /// `values`.
    pub fn new(name: impl Into<ArcStr>, values: impl IntoIterator<Item = EnumValue>) -> Self {
        Self {
            name: name.into(),
            description: None,
            values: values.into_iter().collect(),
        }
    }

    /// Sets the `description` of this [`EnumMeta`] type.
    ///
    /// Overwrites any previously set description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Looks up an [`EnumValue`] by its name.
    pub fn value_by_name(&self, name: &str) -> Option<&EnumValue> {
        self.values.iter().find(|v| v.name == name)
    }

    /// Maps an internal value back to the name of the first [`EnumValue`]
    /// holding it.
    pub fn serialize(&self, value: &Value) -> FieldResult<Value> {
        self.values
            .iter()
            .find(|v| &v.value == value)
            .map(|v| Value::scalar(v.name.as_str()))
            .ok_or_else(|| {
                FieldError::serialization(format!(
                    "Enum \"{}\" cannot represent value: {value}",
                    self.name,
                ))
            })
    }

    /// Wraps this [`EnumMeta`] type into a generic [`MetaType`].
    pub fn into_meta(self) -> MetaType {
        MetaType::Enum(self)
    }
}

impl InterfaceMeta {
    /// Builds a new [`InterfaceMeta`] type with the specified `name` and
    /// `fields`.
    pub fn new(name: impl Into<ArcStr>, fields: impl Into<Fields>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: fields.into(),
            resolve_type: None,
        }
    }

    /// Sets the `description` of this [`InterfaceMeta`] type.
    ///
    /// Overwrites any previously set description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the function determining the concrete object type of a runtime
    /// value.
    ///
    /// Without one, the `__typename` entry of the value is used.
    #[must_use]
    pub fn resolve_type<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value) -> Option<ArcStr> + Send + Sync + 'static,
    {
        self.resolve_type = Some(Arc::new(f));
        self
    }

    /// Wraps this [`InterfaceMeta`] type into a generic [`MetaType`].
    pub fn into_meta(self) -> MetaType {
        MetaType::Interface(self)
    }
}

impl UnionMeta {
    /// Build a new [`UnionMeta`] type with the specified `name` and possible
    /// object type names.
    pub fn new(
        name: impl Into<ArcStr>,
        of_types: impl IntoIterator<Item = impl Into<ArcStr>>,
    ) -> Self {
        Self {
            name: name.into(),
            description: None,
            of_type_names: of_types.into_iter().map(Into::into).collect(),
            resolve_type: None,
        }
    }

    /// Sets the `description` of this [`UnionMeta`] type.
    ///
    /// Overwrites any previously set description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the function determining the concrete object type of a runtime
    /// value.
    ///
    /// Without one, the `__typename` entry of the value is used.
    #[must_use]
    pub fn resolve_type<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value) -> Option<ArcStr> + Send + Sync + 'static,
    {
        self.resolve_type = Some(Arc::new(f));
        self
    }

    /// Wraps this [`UnionMeta`] type into a generic [`MetaType`].
    pub fn into_meta(self) -> MetaType {
        MetaType::Union(self)
    }
}

impl Field {
    /// Builds a new [`Field`] of the given [`Type`] with the given `name`.
    ///
    /// Until a resolver is set, the field resolves by looking up its name on
    /// the parent value.
    pub fn new(name: impl Into<ArcStr>, field_type: Type) -> Self {
        Self {
            name: name.into(),
            description: None,
            arguments: vec![],
            field_type,
            deprecation_status: DeprecationStatus::Current,
            resolver: None,
        }
    }

    /// Set the `description` of this [`Field`].
    ///
    /// Overwrites any previously set description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds an `argument` to this [`Field`].
    #[must_use]
    pub fn argument(mut self, argument: Argument) -> Self {
        self.arguments.push(argument);
        self
    }

    /// Sets the resolver of this [`Field`].
    ///
    /// The resolver receives the parent value and the coerced arguments, and
    /// may return a [`Value`], a [`FieldResult`] or a [`Resolution`].
    #[must_use]
    pub fn resolver<F, R>(mut self, f: F) -> Self
    where
        F: Fn(&Value, &Arguments) -> R + Send + Sync + 'static,
        R: Into<Resolution>,
    {
        self.resolver = Some(Arc::new(move |v: &Value, args: &Arguments| f(v, args).into()));
        self
    }

    /// Sets this [`Field`] as deprecated with an optional `reason`.
    ///
    /// Overwrites any previously set deprecation reason.
    #[must_use]
    pub fn deprecated(mut self, reason: Option<&str>) -> Self {
        self.deprecation_status = DeprecationStatus::Deprecated(reason.map(Into::into));
        self
    }

    /// Access an argument's meta data given its name.
    pub fn argument_by_name(&self, name: &str) -> Option<&Argument> {
        self.arguments.iter().find(|a| a.name == name)
    }

    /// Returns true if the field is a meta-field of the engine.
    pub fn is_builtin(&self) -> bool {
        self.name.starts_with("__")
    }
}

impl Argument {
    /// Builds a new [`Argument`] of the given [`Type`] with the given `name`.
    pub fn new(name: impl Into<ArcStr>, arg_type: Type) -> Self {
        Self {
            name: name.into(),
            description: None,
            arg_type,
            default_value: None,
        }
    }

    /// Sets the `description` of this [`Argument`].
    ///
    /// Overwrites any previously set description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the default value of this [`Argument`].
    ///
    /// Overwrites any previously set default value.
    #[must_use]
    pub fn default_value(mut self, val: impl Into<InputValue>) -> Self {
        self.default_value = Some(val.into());
        self
    }
}

impl EnumValue {
    /// Constructs a new [`EnumValue`] with the provided `name`.
    ///
    /// Its internal value is the name itself, as a string.
    pub fn new(name: impl Into<ArcStr>) -> Self {
        let name = name.into();
        Self {
            value: Value::scalar(name.as_str()),
            name,
            description: None,
            deprecation_status: DeprecationStatus::Current,
        }
    }

    /// Sets the internal value of this [`EnumValue`].
    #[must_use]
    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.value = value.into();
        self
    }

    /// Sets the `description` of this [`EnumValue`].
    ///
    /// Overwrites any previously set description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets this [`EnumValue`] as deprecated with an optional `reason`.
    ///
    /// Overwrites any previously set deprecation reason.
    #[must_use]
    pub fn deprecated(mut self, reason: Option<&str>) -> Self {
        self.deprecation_status = DeprecationStatus::Deprecated(reason.map(Into::into));
        self
    }
}

impl fmt::Debug for ScalarMeta {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("ScalarMeta")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish()
    }
}

impl fmt::Debug for InterfaceMeta {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("InterfaceMeta")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("fields", &self.fields)
            .finish()
    }
}

impl fmt::Debug for UnionMeta {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("UnionMeta")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("of_type_names", &self.of_type_names)
            .finish()
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("Field")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("arguments", &self.arguments)
            .field("field_type", &self.field_type)
            .field("deprecation_status", &self.deprecation_status)
            .field("resolver", &self.resolver.as_ref().map(|_| ".."))
            .finish()
    }
}

use std::{fmt, future::Future};

use arcstr::ArcStr;
use futures::future::{BoxFuture, FutureExt as _};
use indexmap::IndexMap;

use crate::{
    executor::{FieldError, FieldResult},
    value::Value,
};

/// Type kind
///
/// Every [`MetaType`] and every [`Type`] literal is of exactly one kind.
///
/// [`MetaType`]: crate::meta::MetaType
/// [`Type`]: crate::meta::Type
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TypeKind {
    /// ## Scalar types
    ///
    /// Scalar types appear as the leaf nodes of queries. Strings, numbers, and
    /// booleans are the built in types.
    Scalar,

    /// ## Object types
    ///
    /// The only kind with a runtime representation. Objects have fields and
    /// can implement interfaces.
    Object,

    /// ## Interface types
    ///
    /// Interface types are used to represent overlapping fields between
    /// multiple types, and can be queried for their concrete type.
    Interface,

    /// ## Union types
    ///
    /// Unions are similar to interfaces but can not contain any fields on
    /// their own.
    Union,

    /// ## Enum types
    ///
    /// Like scalars, enum types appear as the leaf nodes of queries.
    Enum,

    /// ## List types
    List,

    /// ## Non-null types
    NonNull,
}

impl TypeKind {
    /// Whether values of this kind are leaves of a result tree.
    pub fn is_leaf(self) -> bool {
        matches!(self, Self::Scalar | Self::Enum)
    }

    /// Whether this kind requires a sub-selection.
    pub fn is_composite(self) -> bool {
        matches!(self, Self::Object | Self::Interface | Self::Union)
    }

    /// Whether this is an interface or a union.
    pub fn is_abstract(self) -> bool {
        matches!(self, Self::Interface | Self::Union)
    }
}

/// Field argument container
///
/// Holds the already coerced argument values of a single field invocation.
/// Arguments omitted by the caller without a default value are absent, while
/// an explicit `null` is kept as [`Value::Null`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Arguments {
    args: IndexMap<ArcStr, Value>,
}

impl Arguments {
    #[doc(hidden)]
    pub fn new(args: IndexMap<ArcStr, Value>) -> Self {
        Self { args }
    }

    /// Gets the coerced value of an argument.
    ///
    /// Returns `None` if the argument was neither provided nor defaulted.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.args.get(key)
    }

    /// Gets an argument as a string slice, if it's present and a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_string_value)
    }

    /// Returns an iterator over all present arguments in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&ArcStr, &Value)> {
        self.args.iter()
    }

    /// Number of present arguments.
    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// Whether no argument is present.
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }
}

/// Outcome of invoking a field resolver.
///
/// A resolver either answers right away or hands back a pending computation.
/// The executor joins both uniformly, suspending only the subtree that waits
/// on a pending one.
pub enum Resolution {
    /// Resolved synchronously.
    Ready(FieldResult<Value>),
    /// Resolved once the future completes.
    Pending(BoxFuture<'static, FieldResult<Value>>),
}

impl Resolution {
    /// Synchronously resolves to the given value.
    pub fn value(v: impl Into<Value>) -> Self {
        Self::Ready(Ok(v.into()))
    }

    /// Synchronously fails with the given error.
    pub fn error(e: impl Into<FieldError>) -> Self {
        Self::Ready(Err(e.into()))
    }

    /// Resolves to the outcome of the given future.
    pub fn pending<F>(fut: F) -> Self
    where
        F: Future<Output = FieldResult<Value>> + Send + 'static,
    {
        Self::Pending(fut.boxed())
    }

    pub(crate) async fn resolve(self) -> FieldResult<Value> {
        match self {
            Self::Ready(res) => res,
            Self::Pending(fut) => fut.await,
        }
    }
}

impl From<FieldResult<Value>> for Resolution {
    fn from(res: FieldResult<Value>) -> Self {
        Self::Ready(res)
    }
}

impl From<Value> for Resolution {
    fn from(v: Value) -> Self {
        Self::Ready(Ok(v))
    }
}

impl fmt::Debug for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready(res) => f.debug_tuple("Ready").field(res).finish(),
            Self::Pending(_) => f.write_str("Pending(..)"),
        }
    }
}

//! Resolve the document to values

use std::{
    cmp::Ordering,
    fmt,
    sync::{Arc, Mutex, PoisonError},
};

use arcstr::ArcStr;
use derive_more::Display;

use crate::{ast::Variables, schema::model::Schema, value::Value};

pub(crate) mod abstract_type;
pub(crate) mod coercion;
pub(crate) mod resolve;

/// Query execution engine
///
/// The executor drives the execution of a single operation. It keeps track of
/// the variables and collects the errors of every field.
pub(crate) struct Executor<'a> {
    schema: &'a Schema,
    variables: &'a Variables,
    errors: Mutex<Vec<ExecutionError>>,
}

impl<'a> Executor<'a> {
    pub(crate) fn new(schema: &'a Schema, variables: &'a Variables) -> Self {
        Self {
            schema,
            variables,
            errors: Mutex::new(vec![]),
        }
    }

    /// The schema the operation is executed against.
    pub(crate) fn schema(&self) -> &'a Schema {
        self.schema
    }

    /// The variables of the operation.
    pub(crate) fn variables(&self) -> &'a Variables {
        self.variables
    }

    /// Add an error to the execution engine at the given path.
    pub(crate) fn push_error(&self, path: &FieldPath, error: FieldError) {
        tracing::debug!(
            path = %path,
            kind = %error.kind,
            "field error: {}",
            error.message,
        );

        let mut errors = self.errors.lock().unwrap_or_else(PoisonError::into_inner);
        errors.push(ExecutionError {
            path: path.to_vec(),
            error,
        });
    }

    /// Consumes the executor into the errors collected so far, ordered by
    /// their path.
    pub(crate) fn into_errors(self) -> Vec<ExecutionError> {
        let mut errors = self
            .errors
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        errors.sort();
        errors
    }
}

/// Position of a value being resolved, linked to its parent position.
///
/// Cheap to clone, so every concurrently resolved field carries its own.
#[derive(Clone, Debug, Default)]
pub(crate) struct FieldPath(Option<Arc<PathNode>>);

#[derive(Debug)]
struct PathNode {
    segment: PathSegment,
    parent: FieldPath,
}

impl FieldPath {
    pub(crate) fn root() -> Self {
        Self(None)
    }

    pub(crate) fn field(&self, name: &ArcStr) -> Self {
        self.child(PathSegment::Field(name.clone()))
    }

    pub(crate) fn index(&self, index: usize) -> Self {
        self.child(PathSegment::Index(index))
    }

    fn child(&self, segment: PathSegment) -> Self {
        Self(Some(Arc::new(PathNode {
            segment,
            parent: self.clone(),
        })))
    }

    fn construct_path(&self, acc: &mut Vec<PathSegment>) {
        if let Some(node) = &self.0 {
            node.parent.construct_path(acc);
            acc.push(node.segment.clone());
        }
    }

    pub(crate) fn to_vec(&self) -> Vec<PathSegment> {
        let mut path = vec![];
        self.construct_path(&mut path);
        path
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.to_vec().iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

/// Segment of the path leading to a field error.
#[derive(Clone, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum PathSegment {
    /// Response key of a field.
    Field(ArcStr),
    /// Index of a list item.
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(s: &str) -> Self {
        Self::Field(s.into())
    }
}

impl From<usize> for PathSegment {
    fn from(i: usize) -> Self {
        Self::Index(i)
    }
}

/// Classification of a [`FieldError`].
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum ErrorKind {
    /// An argument isn't declared on its field.
    #[display("UNKNOWN_ARGUMENT")]
    UnknownArgument,
    /// A non-null argument without a default value was omitted.
    #[display("MISSING_REQUIRED_ARGUMENT")]
    MissingRequiredArgument,
    /// An enum literal names no value of its enum.
    #[display("UNKNOWN_ENUM_VALUE")]
    UnknownEnumValue,
    /// An explicit `null` was passed for a non-null argument.
    #[display("NULL_ARGUMENT")]
    NullArgument,
    /// An argument literal doesn't fit its type.
    #[display("INVALID_ARGUMENT")]
    InvalidArgument,
    /// The concrete type of an abstract-typed value couldn't be determined.
    #[display("ABSTRACT_TYPE_RESOLUTION")]
    AbstractTypeResolution,
    /// A `null` flowed into a non-null position.
    #[display("NON_NULL_VIOLATION")]
    NonNullViolation,
    /// A leaf value is outside of its type's domain.
    #[display("SERIALIZATION")]
    Serialization,
    /// A resolver failed.
    #[display("RESOLVER")]
    Resolver,
}

/// Error type for errors that occur during field resolution
///
/// Field errors are represented by a human-readable error message, an
/// [`ErrorKind`] and an optional [`Value`] structure containing additional
/// information.
///
/// They can be converted to from any type that implements [`Display`], which
/// makes error chaining with the `?` operator a breeze:
///
/// ```rust
/// # use juniper_dynamic::FieldError;
/// fn get_string(data: Vec<u8>) -> Result<String, FieldError> {
///     let s = String::from_utf8(data)?;
///     Ok(s)
/// }
/// ```
///
/// Failures raised on purpose, like a denied access, are not told apart from
/// unexpected ones: both are of [`ErrorKind::Resolver`].
///
/// [`Display`]: fmt::Display
#[derive(Clone, Debug, PartialEq)]
pub struct FieldError {
    message: String,
    kind: ErrorKind,
    extensions: Value,
}

impl<T: fmt::Display> From<T> for FieldError {
    fn from(e: T) -> Self {
        Self {
            message: e.to_string(),
            kind: ErrorKind::Resolver,
            extensions: Value::null(),
        }
    }
}

impl FieldError {
    /// Construct a new [`FieldError`] with additional data.
    ///
    /// You can use the [`graphql_value!`] macro for construction:
    /// ```rust
    /// use juniper_dynamic::{graphql_value, FieldError};
    ///
    /// # let _ =
    /// FieldError::new(
    ///     "Could not open connection to the database",
    ///     graphql_value!({"internal_error": "Connection refused"}),
    /// );
    /// ```
    ///
    /// The `extensions` are merged into the `"extensions"` entry of the error
    /// object in the response, next to its `"kind"`. If the argument is
    /// [`Value::null()`], only the kind is included.
    ///
    /// [`graphql_value!`]: crate::graphql_value
    pub fn new<T: fmt::Display>(e: T, extensions: Value) -> Self {
        Self {
            message: e.to_string(),
            kind: ErrorKind::Resolver,
            extensions,
        }
    }

    pub(crate) fn of_kind(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind,
            extensions: Value::null(),
        }
    }

    pub(crate) fn serialization(message: impl Into<String>) -> Self {
        Self::of_kind(ErrorKind::Serialization, message)
    }

    /// Reclassifies a plain resolver error raised where a more specific
    /// [`ErrorKind`] applies.
    pub(crate) fn or_kind(mut self, kind: ErrorKind) -> Self {
        if self.kind == ErrorKind::Resolver {
            self.kind = kind;
        }
        self
    }

    pub(crate) fn map_message(mut self, f: impl FnOnce(String) -> String) -> Self {
        self.message = f(self.message);
        self
    }

    /// Returns the `"message"` of this [`FieldError`].
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the [`ErrorKind`] of this [`FieldError`].
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the `"extensions"` of this [`FieldError`].
    ///
    /// If there are none, [`Value::Null`] is returned.
    pub fn extensions(&self) -> &Value {
        &self.extensions
    }
}

/// The result of resolving the value of a field of type `T`
pub type FieldResult<T> = Result<T, FieldError>;

/// Error type for errors that occur during query execution
///
/// All execution errors contain the path of the field that failed to resolve.
#[derive(Clone, Debug, PartialEq)]
pub struct ExecutionError {
    path: Vec<PathSegment>,
    error: FieldError,
}

impl Eq for ExecutionError {}

impl PartialOrd for ExecutionError {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ExecutionError {
    fn cmp(&self, other: &Self) -> Ordering {
        (&self.path, &self.error.message).cmp(&(&other.path, &other.error.message))
    }
}

impl ExecutionError {
    #[doc(hidden)]
    pub fn new(path: impl IntoIterator<Item = PathSegment>, error: FieldError) -> Self {
        Self {
            path: path.into_iter().collect(),
            error,
        }
    }

    /// The error itself.
    pub fn error(&self) -> &FieldError {
        &self.error
    }

    /// The path of response keys and list indices leading to the field that
    /// generated this error.
    pub fn path(&self) -> &[PathSegment] {
        &self.path
    }
}

/// Result tree of an executed operation along with its field errors.
#[derive(Clone, Debug, PartialEq)]
pub struct ExecutionOutput {
    /// The result tree, `null` if a `null` propagated up to the root.
    pub data: Value,
    /// Field errors, ordered by path.
    pub errors: Vec<ExecutionError>,
}

use std::{collections::HashMap, fmt};

use arcstr::ArcStr;
use indexmap::IndexMap;

use crate::value::ScalarValue;

/// Values of the variables passed alongside an [`Operation`], keyed by name.
pub type Variables = HashMap<String, InputValue>;

/// A JSON-like value that can be passed into the query execution, either
/// out-of-band as a variable value, or in-band as an argument literal or a
/// default value. These are _not_ constant and might contain variables.
#[derive(Clone, Debug, PartialEq)]
pub enum InputValue {
    /// Explicit `null`.
    Null,
    /// A scalar literal.
    Scalar(ScalarValue),
    /// An enum literal, referring to a value by its name.
    Enum(String),
    /// A reference to a variable of the operation.
    Variable(String),
    /// A list literal.
    List(Vec<InputValue>),
}

impl InputValue {
    /// Construct a `null` value.
    pub fn null() -> Self {
        Self::Null
    }

    /// Construct a scalar value.
    pub fn scalar<T: Into<ScalarValue>>(v: T) -> Self {
        Self::Scalar(v.into())
    }

    /// Construct an enum value.
    pub fn enum_value<T: AsRef<str>>(s: T) -> Self {
        Self::Enum(s.as_ref().into())
    }

    /// Construct a variable value.
    pub fn variable<T: AsRef<str>>(v: T) -> Self {
        Self::Variable(v.as_ref().into())
    }

    /// Construct a list value.
    pub fn list(l: Vec<Self>) -> Self {
        Self::List(l)
    }

    /// Does the value represent a `null`?
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Does the value represent a variable?
    pub fn is_variable(&self) -> bool {
        matches!(self, Self::Variable(_))
    }

    /// View the underlying enum value, if present.
    pub fn as_enum_value(&self) -> Option<&str> {
        match self {
            Self::Enum(e) => Some(e),
            _ => None,
        }
    }

    /// View the underlying scalar value, if present.
    pub fn as_scalar(&self) -> Option<&ScalarValue> {
        match self {
            Self::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Recursively finds all variables referenced by this value.
    pub fn referenced_variables(&self) -> Vec<&str> {
        match self {
            Self::Variable(name) => vec![name.as_str()],
            Self::List(l) => l.iter().flat_map(Self::referenced_variables).collect(),
            _ => vec![],
        }
    }
}

impl fmt::Display for InputValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Scalar(s) => write!(f, "{s}"),
            Self::Enum(v) => write!(f, "{v}"),
            Self::Variable(v) => write!(f, "${v}"),
            Self::List(v) => {
                write!(f, "[")?;
                for (i, item) in v.iter().enumerate() {
                    write!(f, "{item}")?;
                    if i < v.len() - 1 {
                        write!(f, ", ")?;
                    }
                }
                write!(f, "]")
            }
        }
    }
}

impl<T: Into<InputValue>> From<Option<T>> for InputValue {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }
}

impl From<&str> for InputValue {
    fn from(s: &str) -> Self {
        Self::scalar(s)
    }
}

impl From<String> for InputValue {
    fn from(s: String) -> Self {
        Self::scalar(s)
    }
}

impl From<i32> for InputValue {
    fn from(i: i32) -> Self {
        Self::scalar(i)
    }
}

impl From<f64> for InputValue {
    fn from(f: f64) -> Self {
        Self::scalar(f)
    }
}

impl From<bool> for InputValue {
    fn from(b: bool) -> Self {
        Self::scalar(b)
    }
}

/// Requested field of a selection set.
///
/// Built by whoever parses the request text; every field name is bound against
/// the schema before execution starts.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    /// Response key override.
    pub alias: Option<ArcStr>,
    /// Name of the field on its parent type.
    pub name: ArcStr,
    /// Raw argument literals or variable references, in request order.
    pub arguments: IndexMap<ArcStr, InputValue>,
    /// Sub-selections, required for composite types and forbidden for leaves.
    pub selection_set: Option<Vec<Selection>>,
}

impl Field {
    /// Creates a new [`Field`] with no alias, arguments or sub-selections.
    pub fn new(name: impl Into<ArcStr>) -> Self {
        Self {
            alias: None,
            name: name.into(),
            arguments: IndexMap::new(),
            selection_set: None,
        }
    }

    /// Sets the response key of this [`Field`].
    #[must_use]
    pub fn alias(mut self, alias: impl Into<ArcStr>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Adds an argument to this [`Field`].
    #[must_use]
    pub fn argument(mut self, name: impl Into<ArcStr>, value: impl Into<InputValue>) -> Self {
        self.arguments.insert(name.into(), value.into());
        self
    }

    /// Sets the sub-selections of this [`Field`].
    #[must_use]
    pub fn selections(
        mut self,
        selections: impl IntoIterator<Item = impl Into<Selection>>,
    ) -> Self {
        self.selection_set = Some(selections.into_iter().map(Into::into).collect());
        self
    }

    /// Name of the entry this [`Field`] produces in its parent result object.
    pub fn response_key(&self) -> &ArcStr {
        self.alias.as_ref().unwrap_or(&self.name)
    }
}

/// Selection applied only when the runtime type matches its condition.
///
/// ```text
/// ...on Droid {
///   primaryFunction
/// }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct InlineFragment {
    /// Type the fragment applies to. `None` applies unconditionally.
    pub type_condition: Option<ArcStr>,
    /// Selections of the fragment.
    pub selection_set: Vec<Selection>,
}

impl InlineFragment {
    /// Creates a new [`InlineFragment`] applying to the given type.
    pub fn on(
        type_condition: impl Into<ArcStr>,
        selections: impl IntoIterator<Item = impl Into<Selection>>,
    ) -> Self {
        Self {
            type_condition: Some(type_condition.into()),
            selection_set: selections.into_iter().map(Into::into).collect(),
        }
    }
}

/// Entry in a selection set.
#[derive(Clone, Debug, PartialEq)]
#[expect(missing_docs, reason = "self-explanatory")]
pub enum Selection {
    Field(Field),
    InlineFragment(InlineFragment),
}

impl From<Field> for Selection {
    fn from(f: Field) -> Self {
        Self::Field(f)
    }
}

impl From<InlineFragment> for Selection {
    fn from(f: InlineFragment) -> Self {
        Self::InlineFragment(f)
    }
}

/// Kind of an [`Operation`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[expect(missing_docs, reason = "self-explanatory")]
pub enum OperationType {
    Query,
    Mutation,
}

/// Already parsed and bound request to execute.
#[derive(Clone, Debug, PartialEq)]
pub struct Operation {
    /// Whether the root selections target the query or the mutation type.
    pub operation_type: OperationType,
    /// Optional operation name, only used for logging.
    pub name: Option<ArcStr>,
    /// Root selections.
    pub selection_set: Vec<Selection>,
}

impl Operation {
    /// Creates a new query [`Operation`].
    pub fn query(selections: impl IntoIterator<Item = impl Into<Selection>>) -> Self {
        Self {
            operation_type: OperationType::Query,
            name: None,
            selection_set: selections.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a new mutation [`Operation`].
    pub fn mutation(selections: impl IntoIterator<Item = impl Into<Selection>>) -> Self {
        Self {
            operation_type: OperationType::Mutation,
            name: None,
            selection_set: selections.into_iter().map(Into::into).collect(),
        }
    }

    /// Sets the name of this [`Operation`].
    #[must_use]
    pub fn named(mut self, name: impl Into<ArcStr>) -> Self {
        self.name = Some(name.into());
        self
    }
}

use std::fmt;

use arcstr::ArcStr;
use itertools::Itertools as _;

use crate::schema::model::Schema;

/// Query validation error
#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct RuleError {
    path: Vec<ArcStr>,
    message: String,
}

impl RuleError {
    #[doc(hidden)]
    pub fn new(message: impl Into<String>, path: &[ArcStr]) -> Self {
        Self {
            message: message.into(),
            path: path.to_vec(),
        }
    }

    /// Access the message for a validation error
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Access the response keys leading to the offending selection
    ///
    /// Empty for errors about the operation as a whole.
    pub fn path(&self) -> &[ArcStr] {
        &self.path
    }
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}. At {}", self.message, self.path.iter().join("."))
        }
    }
}

impl std::error::Error for RuleError {}

/// State of a single validation pass.
pub(crate) struct ValidatorContext<'a> {
    pub(crate) schema: &'a Schema,
    errors: Vec<RuleError>,
    path: Vec<ArcStr>,
}

impl<'a> ValidatorContext<'a> {
    pub(crate) fn new(schema: &'a Schema) -> Self {
        Self {
            schema,
            errors: vec![],
            path: vec![],
        }
    }

    pub(crate) fn report_error(&mut self, message: impl Into<String>) {
        let error = RuleError::new(message, &self.path);
        tracing::debug!(%error, "validation error");
        self.errors.push(error);
    }

    pub(crate) fn with_pushed_key<R>(&mut self, key: &ArcStr, f: impl FnOnce(&mut Self) -> R) -> R {
        self.path.push(key.clone());
        let res = f(self);
        self.path.pop();
        res
    }

    pub(crate) fn into_errors(self) -> Vec<RuleError> {
        self.errors
    }
}

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]

use std::fmt;

#[doc(inline)]
pub use futures::future::BoxFuture;
use tracing::Instrument as _;

#[macro_use]
mod value;
mod ast;
pub mod executor;
pub mod integrations;
pub(crate) mod schema;
mod types;
pub mod validation;



use crate::executor::{resolve::execute_operation, Executor};

pub use crate::{
    ast::{Field, InlineFragment, InputValue, Operation, OperationType, Selection, Variables},
    executor::{
        ErrorKind, ExecutionError, ExecutionOutput, FieldError, FieldResult, PathSegment,
    },
    schema::{
        meta,
        model::Schema,
        registry::{Registry, RegistryError},
        validate::{SchemaRule, SchemaValidationError},
    },
    types::{
        base::{Arguments, Resolution, TypeKind},
        name::{Name, NameParseError},
        scalars::builtin_scalars,
    },
    validation::{validate_operation, RuleError},
    value::{Object, ScalarValue, Value},
};

/// An error that prevented operation execution
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GraphQLError {
    /// The operation doesn't bind against the schema.
    ValidationError(Vec<RuleError>),
}

impl fmt::Display for GraphQLError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValidationError(errs) => {
                for e in errs {
                    writeln!(f, "{e}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for GraphQLError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ValidationError(errs) => Some(errs.first()?),
        }
    }
}

/// Execute an operation in a provided schema
///
/// The operation is validated first. On success, resolvers run starting from
/// `root_value`, and the result tree is returned along with every field error
/// raised on the way.
///
/// Dropping the returned future cancels the execution: no resolver is invoked
/// afterwards.
pub async fn execute(
    schema: &Schema,
    operation: &Operation,
    root_value: &Value,
    variables: &Variables,
) -> Result<ExecutionOutput, GraphQLError> {
    let errors = validate_operation(schema, operation);
    if !errors.is_empty() {
        tracing::debug!(errors = errors.len(), "operation failed validation");
        return Err(GraphQLError::ValidationError(errors));
    }

    let span = tracing::debug_span!(
        "execute",
        operation = ?operation.operation_type,
        name = operation.name.as_deref(),
    );
    let executor = Executor::new(schema, variables);
    let data = execute_operation(&executor, operation, root_value)
        .instrument(span)
        .await;
    let errors = executor.into_errors();

    tracing::debug!(errors = errors.len(), "operation executed");
    Ok(ExecutionOutput { data, errors })
}

/// Execute an operation synchronously in a provided schema
///
/// Drives [`execute()`] to completion on the current thread.
pub fn execute_sync(
    schema: &Schema,
    operation: &Operation,
    root_value: &Value,
    variables: &Variables,
) -> Result<ExecutionOutput, GraphQLError> {
    futures::executor::block_on(execute(schema, operation, root_value, variables))
}

//! Provides GraphQL implementations for some well-known types.

#[cfg(feature = "json")]
pub mod json;
pub mod serde;

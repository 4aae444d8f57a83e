use std::{borrow::Borrow, str::FromStr};

use derive_more::{Display, Error};

/// Validated name of a type, field, argument or enum value.
#[derive(Clone, Debug, Display, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Name(String);

impl Name {
    /// Checks whether the `input` matches `/^[_a-zA-Z][_a-zA-Z0-9]*$/`.
    pub fn is_valid(input: &str) -> bool {
        let mut chars = input.chars();
        match chars.next() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
            _ => return false,
        }
        chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    }

    /// Checks whether the `input` is reserved for the meta-fields and types of
    /// the engine itself.
    pub fn is_reserved(input: &str) -> bool {
        input.starts_with("__")
    }
}

/// Error of parsing a [`Name`] from an invalid string.
#[derive(Clone, Debug, Display, Error, PartialEq, Eq)]
#[display("Names must match /^[_a-zA-Z][_a-zA-Z0-9]*$/ but \"{_0}\" does not")]
pub struct NameParseError(#[error(not(source))] String);

impl FromStr for Name {
    type Err = NameParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if Self::is_valid(s) {
            Ok(Self(s.into()))
        } else {
            Err(NameParseError(s.into()))
        }
    }
}

impl Borrow<str> for Name {
    fn borrow(&self) -> &str {
        &self.0
    }
}

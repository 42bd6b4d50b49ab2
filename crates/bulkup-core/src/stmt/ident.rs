use crate::{Error, Result};

use std::fmt;

/// Longest identifier accepted, matching PostgreSQL's `NAMEDATALEN - 1`.
const MAX_LEN: usize = 63;

/// A validated table or column name.
///
/// Identifiers cannot be bound as parameters, so they are spliced into the
/// statement text. Only ASCII letters, digits and `_` are accepted and the
/// first character may not be a digit. Quoting is left to the serializer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ident(String);

impl Ident {
    pub fn new(name: impl Into<String>) -> Result<Ident> {
        let name = name.into();

        let Some(first) = name.chars().next() else {
            return Err(Error::invalid_identifier(name, "identifier is empty"));
        };

        if first.is_ascii_digit() {
            return Err(Error::invalid_identifier(name, "starts with a digit"));
        }

        if let Some(c) = name
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '_'))
        {
            let reason = if c.is_control() {
                format!("contains control character {:?}", c)
            } else {
                format!("contains `{c}`")
            };
            return Err(Error::invalid_identifier(name, reason));
        }

        if name.len() > MAX_LEN {
            return Err(Error::invalid_identifier(
                name,
                format!("longer than {MAX_LEN} characters"),
            ));
        }

        Ok(Ident(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Ident {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Ident {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Ident::new(value)
    }
}

impl PartialEq<str> for Ident {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Ident {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

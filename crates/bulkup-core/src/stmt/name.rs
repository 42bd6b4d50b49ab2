use super::Ident;
use crate::{Error, Result};

use std::fmt;

/// A possibly schema-qualified table name, e.g. `users` or `auth.users`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name(Vec<Ident>);

impl Name {
    /// Parses a `.`-separated name, validating each part as an [`Ident`].
    pub fn parse(name: &str) -> Result<Name> {
        if name.is_empty() {
            return Err(Error::invalid_identifier(name, "table name is empty"));
        }

        let parts = name.split('.').map(Ident::new).collect::<Result<Vec<_>>>()?;
        Ok(Name(parts))
    }

    pub fn parts(&self) -> &[Ident] {
        &self.0
    }

    /// Returns the name with `prefix` prepended to the table part, leaving
    /// any schema qualifier untouched.
    pub fn with_prefix(mut self, prefix: &str) -> Result<Name> {
        if prefix.is_empty() {
            return Ok(self);
        }

        let Some(table) = self.0.pop() else {
            return Err(Error::invalid_identifier("", "table name is empty"));
        };
        self.0.push(Ident::new(format!("{prefix}{table}"))?);
        Ok(self)
    }
}

impl From<Ident> for Name {
    fn from(value: Ident) -> Self {
        Name(vec![value])
    }
}

impl TryFrom<&str> for Name {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Name::parse(value)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = "";
        for ident in &self.0 {
            write!(f, "{s}{ident}")?;
            s = ".";
        }

        Ok(())
    }
}

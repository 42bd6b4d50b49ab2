use super::{Flavor, Formatter, ToSql};

use crate::stmt;

/// Receives bound values while a statement is serialized.
pub trait Params {
    /// Stores `value` and returns the placeholder referring to it.
    fn push(&mut self, value: &stmt::Value) -> Placeholder;
}

/// 1-based position of a bound parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder(pub usize);

impl Params for Vec<stmt::Value> {
    fn push(&mut self, value: &stmt::Value) -> Placeholder {
        self.push(value.clone());
        Placeholder(self.len())
    }
}

impl ToSql for Placeholder {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match f.serializer.flavor {
            Flavor::Mysql => fmt!(f, "?"),
            Flavor::Postgresql => fmt!(f, "$" self.0),
            Flavor::Sqlite => fmt!(f, "?" self.0),
        }
    }
}

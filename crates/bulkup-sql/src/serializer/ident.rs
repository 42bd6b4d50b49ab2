use super::{Formatter, Params, ToSql};

use crate::stmt;

/// A quoted identifier.
///
/// `stmt::Ident` only admits `[A-Za-z0-9_]`, so no escaping is needed inside
/// the quotes.
pub(super) struct Ident<S>(pub(super) S);

impl<S: AsRef<str>> ToSql for Ident<S> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let quote = if f.serializer.is_mysql() { "`" } else { "\"" };
        fmt!(f, quote self.0.as_ref() quote);
    }
}

impl ToSql for &stmt::Ident {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        Ident(self.as_str()).to_sql(f);
    }
}

use super::{Flavor, Formatter, Params, ToSql};

use crate::stmt;

impl ToSql for &stmt::Value {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        if f.serializer.inline {
            Literal(self).to_sql(f);
        } else {
            let placeholder = f.params.push(self);
            fmt!(f, placeholder);
        }
    }
}

/// A value written directly into the statement text.
pub(super) struct Literal<'a>(pub(super) &'a stmt::Value);

impl ToSql for Literal<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        use std::fmt::Write;
        use stmt::Value::*;

        match self.0 {
            Null => fmt!(f, "NULL"),
            // SQLite has no boolean storage class; booleans are integers.
            Bool(v) if f.serializer.flavor == Flavor::Sqlite => {
                fmt!(f, if *v { "1" } else { "0" })
            }
            Bool(v) => fmt!(f, if *v { "TRUE" } else { "FALSE" }),
            I64(v) => {
                let _ = write!(f.dst, "{v}");
            }
            // `{:?}` always keeps a fractional part or exponent, so the
            // literal is read back as a float.
            F64(v) => {
                let _ = write!(f.dst, "{v:?}");
            }
            String(v) => {
                f.dst.push('\'');
                for c in v.chars() {
                    match c {
                        '\'' => f.dst.push_str("''"),
                        '\\' if f.serializer.flavor == Flavor::Mysql => f.dst.push_str("\\\\"),
                        c => f.dst.push(c),
                    }
                }
                f.dst.push('\'');
            }
            value => panic!("unchecked statement; value={value:?}"),
        }
    }
}

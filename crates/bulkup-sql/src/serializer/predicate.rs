use super::{Comma, Delimited, Formatter, Params, ToSql};

use crate::stmt::{self, BulkUpdate};

/// One key value of one row.
///
/// With numbered placeholders the value is bound the first time it is
/// written and the same placeholder is reused afterwards.
pub(super) struct KeyValue<'a> {
    row: usize,
    col: usize,
    value: &'a stmt::Value,
}

impl ToSql for KeyValue<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        if f.serializer.inline || !f.serializer.capability().numbered_params {
            self.value.to_sql(f);
            return;
        }

        let placeholder = match f.key_params[self.row][self.col] {
            Some(placeholder) => placeholder,
            None => {
                let placeholder = f.params.push(self.value);
                f.key_params[self.row][self.col] = Some(placeholder);
                placeholder
            }
        };

        fmt!(f, placeholder);
    }
}

fn key_values(update: &BulkUpdate, row: usize) -> impl Iterator<Item = KeyValue<'_>> {
    update.rows[row]
        .iter()
        .enumerate()
        .map(move |(col, value)| KeyValue { row, col, value })
}

/// `"k1" = v1 AND "k2" = v2`, matching exactly one row's key.
pub(super) struct KeyMatch<'a> {
    pub(super) update: &'a BulkUpdate,
    pub(super) row: usize,
}

impl ToSql for KeyMatch<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let comparisons = self
            .update
            .key
            .iter()
            .zip(key_values(self.update, self.row))
            .map(|(column, value)| ColumnEq { column, value });

        fmt!(f, Delimited(comparisons, " AND "));
    }
}

struct ColumnEq<'a> {
    column: &'a stmt::Ident,
    value: KeyValue<'a>,
}

impl ToSql for ColumnEq<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, self.column " = " self.value);
    }
}

/// The statement's row filter: every row's key, and nothing else.
///
/// * one key column: `"id" IN (v1, v2, ...)`
/// * compound key: `("a", "b") IN ((v1, v2), ...)`
///
/// SQLite only compares row values against a subquery, so the tuple list is
/// written as `IN (VALUES (v1, v2), ...)` there.
pub(super) struct KeyFilter<'a>(pub(super) &'a BulkUpdate);

impl ToSql for KeyFilter<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let update = self.0;

        if let [column] = &update.key[..] {
            let values = Comma((0..update.rows.len()).flat_map(|row| key_values(update, row)));
            fmt!(f, column " IN (" values ")");
            return;
        }

        let columns = Comma(&update.key);
        let tuples = Comma((0..update.rows.len()).map(|row| KeyTuple { update, row }));
        let values = if f.serializer.is_sqlite() { "VALUES " } else { "" };

        fmt!(f, "(" columns ") IN (" values tuples ")");
    }
}

struct KeyTuple<'a> {
    update: &'a BulkUpdate,
    row: usize,
}

impl ToSql for KeyTuple<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let values = Comma(key_values(self.update, self.row));
        fmt!(f, "(" values ")");
    }
}

use super::{predicate::KeyMatch, Formatter, Params, ToSql};

use crate::stmt::{Assignment, BulkUpdate};

/// `"col" = CASE WHEN (<key of row>) THEN <value> ... ELSE "col" END`
///
/// Branches follow input row order, so when two rows share a key the first
/// one wins. Rows that do not set the column fall through to `ELSE`, which
/// keeps the stored value.
pub(super) struct CaseAssignment<'a> {
    pub(super) update: &'a BulkUpdate,
    pub(super) assignment: &'a Assignment,
}

impl ToSql for CaseAssignment<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let column = &self.assignment.column;

        fmt!(f, column " = CASE");

        for case in &self.assignment.cases {
            let condition = KeyMatch {
                update: self.update,
                row: case.row,
            };
            let value = &case.value;

            fmt!(f, " WHEN (" condition ") THEN " value);
        }

        fmt!(f, " ELSE " column " END");
    }
}

use super::{case::CaseAssignment, predicate::KeyFilter, Comma, Params, ToSql};

use crate::stmt::{self, Statement};

impl ToSql for &Statement {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        match self {
            Statement::BulkUpdate(stmt) => stmt.to_sql(f),
        }
    }
}

impl ToSql for &stmt::BulkUpdate {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let table = &self.table;
        let assignments = Comma(self.assignments.iter().map(|assignment| CaseAssignment {
            update: self,
            assignment,
        }));
        let filter = KeyFilter(self);

        fmt!(f, "UPDATE " table " SET " assignments " WHERE " filter);
    }
}

use crate::stmt::{BulkUpdate, Value};

#[derive(Debug, Clone)]
pub enum Operation {
    /// Apply a planned bulk update as one statement. Responds with the
    /// number of affected rows.
    BulkUpdate(BulkUpdate),

    /// Execute a raw SQL statement. Responds with the number of affected
    /// rows.
    ExecSql(Sql),

    /// Run a raw SQL query. Responds with the returned rows.
    QuerySql(Sql),
}

/// Raw SQL text with its bound parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Sql {
    pub sql: String,
    pub params: Vec<Value>,
}

impl Sql {
    pub fn new(sql: impl Into<String>, params: impl IntoIterator<Item = Value>) -> Sql {
        Sql {
            sql: sql.into(),
            params: params.into_iter().collect(),
        }
    }
}

impl From<BulkUpdate> for Operation {
    fn from(value: BulkUpdate) -> Self {
        Operation::BulkUpdate(value)
    }
}

impl Operation {
    pub fn is_bulk_update(&self) -> bool {
        matches!(self, Operation::BulkUpdate(_))
    }
}

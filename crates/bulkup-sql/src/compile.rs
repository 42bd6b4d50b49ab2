use crate::{
    stmt::{BulkUpdate, Plan, UpdateRow, Value},
    Serializer, Statement,
};

use bulkup_core::Result;

/// A bulk update rendered to SQL text with its bound parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Compiled {
    pub sql: String,
    pub params: Vec<Value>,
}

/// Compiles `rows` into one UPDATE of `table` for the serializer's dialect.
///
/// Returns `Ok(None)` when there is nothing to do: an empty batch, or rows
/// that assign no columns. Every error is raised before any SQL text exists.
pub fn compile(
    serializer: &Serializer,
    table: &str,
    rows: impl IntoIterator<Item = UpdateRow>,
) -> Result<Option<Compiled>> {
    let Plan::Update(update) = BulkUpdate::compile(table, rows)? else {
        return Ok(None);
    };

    let stmt = Statement::from(update);
    serializer.check(&stmt)?;

    let mut params = Vec::new();
    let sql = serializer.serialize(&stmt, &mut params);

    Ok(Some(Compiled { sql, params }))
}

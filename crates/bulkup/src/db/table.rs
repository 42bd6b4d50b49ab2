use super::Db;
use crate::{
    stmt::{Name, UpdateRow},
    Result,
};

/// A table of a [`Db`], with its name already validated.
#[derive(Debug, Clone)]
pub struct Table<'a> {
    db: &'a Db,
    name: Name,
}

impl<'a> Table<'a> {
    pub(super) fn new(db: &'a Db, name: Name) -> Table<'a> {
        Table { db, name }
    }

    /// The table name, including any configured prefix.
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// See [`Db::bulk_update`].
    pub async fn bulk_update(&self, rows: impl IntoIterator<Item = UpdateRow>) -> Result<u64> {
        self.db.exec_bulk_update(self.name.clone(), rows).await
    }
}

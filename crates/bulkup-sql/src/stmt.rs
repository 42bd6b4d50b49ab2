pub use bulkup_core::stmt::*;

#[derive(Debug, Clone)]
pub enum Statement {
    BulkUpdate(BulkUpdate),
}

impl Statement {
    pub fn is_bulk_update(&self) -> bool {
        matches!(self, Statement::BulkUpdate(_))
    }
}

impl From<BulkUpdate> for Statement {
    fn from(value: BulkUpdate) -> Self {
        Statement::BulkUpdate(value)
    }
}

use super::{Value, ValueRecord};

/// One requested row change: the key identifying the target row and the
/// columns to assign on it.
///
/// Columns absent from `data` are left untouched. A column present with
/// [`Value::Null`] is set to `NULL`.
///
/// ```
/// use bulkup_core::stmt::UpdateRow;
///
/// let row = UpdateRow::new()
///     .key("orgId", 1)
///     .key("email", "alice@corp.com")
///     .set("status", "ACTIVE")
///     .set_null("deletedAt");
///
/// assert_eq!(row.data.len(), 2);
/// ```
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct UpdateRow {
    /// Key column values. A [`Value::Record`] under a key name wraps the
    /// physical columns of a compound key.
    #[cfg_attr(feature = "serde", serde(rename = "where"))]
    pub key: ValueRecord,

    /// Columns to assign.
    #[cfg_attr(feature = "serde", serde(default))]
    pub data: ValueRecord,
}

impl UpdateRow {
    pub fn new() -> UpdateRow {
        UpdateRow::default()
    }

    /// Adds a key column.
    pub fn key(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.key.insert(column, value);
        self
    }

    /// Adds a compound key expressed as a single named wrapper over several
    /// physical columns, e.g. `orgId_email: { orgId, email }`.
    pub fn key_record(mut self, name: impl Into<String>, record: impl Into<ValueRecord>) -> Self {
        self.key.insert(name, Value::Record(record.into()));
        self
    }

    /// Assigns `value` to `column`.
    pub fn set(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(column, value);
        self
    }

    /// Assigns `NULL` to `column`.
    pub fn set_null(self, column: impl Into<String>) -> Self {
        self.set(column, Value::Null)
    }
}

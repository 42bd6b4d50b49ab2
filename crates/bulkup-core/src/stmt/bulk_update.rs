use super::{Batch, Ident, Name, UpdateRow, Value};
use crate::Result;

/// Outcome of planning a bulk update.
#[derive(Debug, Clone, PartialEq)]
pub enum Plan {
    /// Nothing to do; no statement is sent.
    Skip(Skip),

    /// One UPDATE statement covering every row.
    Update(BulkUpdate),
}

/// Why a batch compiles to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skip {
    /// The batch has no rows.
    EmptyBatch,

    /// The batch has rows, but none of them assigns any column.
    NoApplicableColumns,
}

/// A single UPDATE statement applying a whole batch:
///
/// ```sql
/// UPDATE "table" SET
///   "col" = CASE WHEN ("k1" = .. AND "k2" = ..) THEN .. ... ELSE "col" END,
///   ...
/// WHERE ("k1", "k2") IN ((.., ..), ...)
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BulkUpdate {
    /// Target table
    pub table: Name,

    /// Key columns, shared by every row
    pub key: Vec<Ident>,

    /// One key tuple per input row, in input order, aligned with `key`.
    /// Duplicate keys are kept as duplicate tuples.
    pub rows: Vec<Vec<Value>>,

    /// One assignment per data column, in order of first appearance.
    pub assignments: Vec<Assignment>,
}

/// `column = CASE <cases> ELSE column END`
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub column: Ident,

    /// WHEN branches, in input row order. Only rows whose data contains the
    /// column contribute a branch. When two rows share a key, the first
    /// branch wins.
    pub cases: Vec<When>,
}

/// `WHEN <key of rows[row]> THEN value`
#[derive(Debug, Clone, PartialEq)]
pub struct When {
    /// Index into [`BulkUpdate::rows`]
    pub row: usize,

    pub value: Value,
}

impl BulkUpdate {
    /// Plans a bulk update of `table` from unvalidated rows.
    ///
    /// The table name is validated first, then the rows. Any error is
    /// raised here, before a statement exists.
    pub fn compile(table: &str, rows: impl IntoIterator<Item = UpdateRow>) -> Result<Plan> {
        let table = Name::parse(table)?;
        let batch = Batch::new(rows)?;
        Ok(BulkUpdate::plan(table, batch))
    }

    /// Plans a bulk update of `table` from an already validated batch.
    pub fn plan(table: Name, batch: Batch) -> Plan {
        if batch.is_empty() {
            return Plan::Skip(Skip::EmptyBatch);
        }

        if batch.shape().columns.is_empty() {
            return Plan::Skip(Skip::NoApplicableColumns);
        }

        let (shape, rows) = batch.into_parts();

        let assignments = shape
            .columns
            .into_iter()
            .enumerate()
            .map(|(pos, column)| Assignment {
                column,
                cases: rows
                    .iter()
                    .enumerate()
                    .filter_map(|(row, keyed)| {
                        keyed.data[pos]
                            .as_ref()
                            .map(|value| When {
                                row,
                                value: value.clone(),
                            })
                    })
                    .collect(),
            })
            .collect();

        Plan::Update(BulkUpdate {
            table,
            key: shape.key,
            rows: rows.into_iter().map(|keyed| keyed.key).collect(),
            assignments,
        })
    }

    /// Returns `true` when one of the assigned columns is also a key column.
    pub fn assigns_key_column(&self) -> bool {
        self.assignments
            .iter()
            .any(|assignment| self.key.contains(&assignment.column))
    }

    /// Total number of WHEN branches across all assignments.
    pub fn case_count(&self) -> usize {
        self.assignments.iter().map(|a| a.cases.len()).sum()
    }
}

impl Plan {
    pub fn is_skip(&self) -> bool {
        matches!(self, Plan::Skip(_))
    }

    pub fn into_update(self) -> Option<BulkUpdate> {
        match self {
            Plan::Update(update) => Some(update),
            Plan::Skip(_) => None,
        }
    }
}

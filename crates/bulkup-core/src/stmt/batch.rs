use super::{Ident, UpdateRow, Value, ValueRecord};
use crate::{Error, Result};

use indexmap::IndexSet;

/// Column sets shared by every row of a batch.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Shape {
    /// Physical key columns, in the order of the first row's key with
    /// compound wrappers flattened.
    pub key: Vec<Ident>,

    /// Union of all rows' data columns, in order of first appearance.
    pub columns: Vec<Ident>,
}

/// A row after key flattening and validation.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedRow {
    /// Key values aligned with [`Shape::key`].
    pub key: Vec<Value>,

    /// Data values aligned with [`Shape::columns`]. `None` means the row
    /// does not touch that column, `Some(Value::Null)` sets it to `NULL`.
    pub data: Vec<Option<Value>>,
}

/// A validated batch of update rows.
///
/// Construction flattens compound keys, checks that every row is keyed by
/// the same columns, validates every column name and rejects values that
/// cannot be rendered. A `Batch` that exists is always compilable.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Batch {
    shape: Shape,
    rows: Vec<KeyedRow>,
}

impl Batch {
    pub fn new(rows: impl IntoIterator<Item = UpdateRow>) -> Result<Batch> {
        let rows: Vec<UpdateRow> = rows.into_iter().collect();

        let Some(first) = rows.first() else {
            return Ok(Batch::default());
        };

        let key = flatten_key(0, &first.key)?
            .into_iter()
            .map(|(column, _)| column)
            .collect::<Vec<_>>();

        let mut columns = IndexSet::new();
        let mut keyed = Vec::with_capacity(rows.len());

        for (index, row) in rows.iter().enumerate() {
            let key = align_key(index, &key, flatten_key(index, &row.key)?)?;

            let mut data = Vec::with_capacity(row.data.len());
            for (name, value) in row.data.iter() {
                let column = Ident::new(name)?;
                check_data_value(index, &column, value)?;
                let (pos, _) = columns.insert_full(column);
                data.push((pos, value.clone()));
            }

            keyed.push((key, data));
        }

        let rows = keyed
            .into_iter()
            .map(|(key, data)| {
                let mut aligned = vec![None; columns.len()];
                for (pos, value) in data {
                    aligned[pos] = Some(value);
                }
                KeyedRow { key, data: aligned }
            })
            .collect();

        Ok(Batch {
            shape: Shape {
                key,
                columns: columns.into_iter().collect(),
            },
            rows,
        })
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn rows(&self) -> &[KeyedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub(crate) fn into_parts(self) -> (Shape, Vec<KeyedRow>) {
        (self.shape, self.rows)
    }
}

impl TryFrom<Vec<UpdateRow>> for Batch {
    type Error = Error;

    fn try_from(rows: Vec<UpdateRow>) -> Result<Batch> {
        Batch::new(rows)
    }
}

/// Expands a row key into `(physical column, value)` pairs. A record under
/// a key name contributes its own entries, in the record's order.
fn flatten_key(row: usize, key: &ValueRecord) -> Result<Vec<(Ident, Value)>> {
    if key.is_empty() {
        return Err(Error::inconsistent_key_shape(row, "key is empty"));
    }

    let mut flat = Vec::with_capacity(key.len());

    for (name, value) in key.iter() {
        match value {
            Value::Record(inner) => {
                // The wrapper name is not a column, but it still has to be a
                // sane identifier.
                Ident::new(name)?;

                if inner.is_empty() {
                    return Err(Error::inconsistent_key_shape(
                        row,
                        format!("compound key `{name}` is empty"),
                    ));
                }

                for (name, value) in inner.iter() {
                    let column = Ident::new(name)?;
                    check_key_value(row, &column, value)?;
                    flat.push((column, value.clone()));
                }
            }
            value => {
                let column = Ident::new(name)?;
                check_key_value(row, &column, value)?;
                flat.push((column, value.clone()));
            }
        }
    }

    for (i, (column, _)) in flat.iter().enumerate() {
        if flat[..i].iter().any(|(prev, _)| prev == column) {
            return Err(Error::inconsistent_key_shape(
                row,
                format!("key column `{column}` appears more than once"),
            ));
        }
    }

    Ok(flat)
}

/// Orders a row's flattened key by the batch key columns, failing when the
/// two column sets differ.
fn align_key(row: usize, expect: &[Ident], flat: Vec<(Ident, Value)>) -> Result<Vec<Value>> {
    let mismatch = || {
        Error::inconsistent_key_shape(
            row,
            format!(
                "expected key columns [{}], found [{}]",
                join(expect.iter()),
                join(flat.iter().map(|(column, _)| column)),
            ),
        )
    };

    if flat.len() != expect.len() {
        return Err(mismatch());
    }

    let mut aligned = Vec::with_capacity(expect.len());
    for column in expect {
        let Some(pos) = flat.iter().position(|(c, _)| c == column) else {
            return Err(mismatch());
        };
        aligned.push(pos);
    }

    let mut values: Vec<Option<Value>> = flat.into_iter().map(|(_, value)| Some(value)).collect();
    Ok(aligned
        .into_iter()
        .map(|pos| values[pos].take().unwrap_or_default())
        .collect())
}

fn check_key_value(row: usize, column: &Ident, value: &Value) -> Result<()> {
    if value.is_null() {
        return Err(Error::unsupported_value_type(
            "Null",
            format!("key column `{column}` of row {row}; NULL never matches a key"),
        ));
    }

    if !value.is_scalar() {
        return Err(Error::unsupported_value_type(
            value.type_name(),
            format!("key column `{column}` of row {row}"),
        ));
    }

    Ok(())
}

fn check_data_value(row: usize, column: &Ident, value: &Value) -> Result<()> {
    if !value.is_scalar() {
        return Err(Error::unsupported_value_type(
            value.type_name(),
            format!("data column `{column}` of row {row}"),
        ));
    }

    Ok(())
}

fn join<'a>(columns: impl Iterator<Item = &'a Ident>) -> String {
    columns.map(Ident::as_str).collect::<Vec<_>>().join(", ")
}

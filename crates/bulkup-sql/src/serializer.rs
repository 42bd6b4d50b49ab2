#[macro_use]
mod fmt;
use fmt::ToSql;

mod delim;
use delim::{Comma, Delimited, Period};

mod flavor;
use flavor::Flavor;

mod ident;
use ident::Ident;

mod params;
pub use params::{Params, Placeholder};

// Fragment serializers
mod case;
mod name;
mod predicate;
mod statement;
mod value;

use crate::stmt::{BulkUpdate, Statement};

use bulkup_core::{driver::Capability, err, Error, Result};

/// Serialize a statement to a SQL string
#[derive(Debug, Clone)]
pub struct Serializer {
    /// The database flavor handles the differences between SQL dialects and
    /// supported features.
    flavor: Flavor,

    /// When true, values are written as SQL literals instead of being bound
    /// as parameters. Identifiers are always written inline.
    inline: bool,
}

struct Formatter<'a, T> {
    /// Handle to the serializer
    serializer: &'a Serializer,

    /// Where to write the serialized SQL
    dst: &'a mut String,

    /// Where to store parameters
    params: &'a mut T,

    /// Placeholders already bound for each row's key values, when the
    /// flavor allows referencing a placeholder more than once.
    key_params: Vec<Vec<Option<Placeholder>>>,
}

impl Serializer {
    /// Switches from bound parameters to inlined literals.
    ///
    /// Inlined strings are quoted and escaped, but binding is the default
    /// and should be preferred whenever the executor accepts parameters.
    pub fn inline_values(mut self) -> Serializer {
        self.inline = true;
        self
    }

    /// Limits of the target database.
    pub fn capability(&self) -> &'static Capability {
        self.flavor.capability()
    }

    /// Checks that `stmt` can be serialized for this flavor.
    ///
    /// Drivers call this before [`serialize`](Self::serialize), which
    /// assumes a checked statement.
    pub fn check(&self, stmt: &Statement) -> Result<()> {
        match stmt {
            Statement::BulkUpdate(update) => self.check_bulk_update(update),
        }
    }

    /// Renders `stmt`, pushing every bound value into `params`.
    ///
    /// # Panics
    ///
    /// Panics on values [`check`](Self::check) rejects, such as a `List` or
    /// `Record` in a case branch. Run `check` first on statements that were
    /// not produced by [`BulkUpdate::plan`].
    pub fn serialize(&self, stmt: &Statement, params: &mut impl Params) -> String {
        let mut ret = String::new();

        let key_params = match stmt {
            Statement::BulkUpdate(update) => vec![vec![None; update.key.len()]; update.rows.len()],
        };

        let mut fmt = Formatter {
            serializer: self,
            dst: &mut ret,
            params,
            key_params,
        };

        stmt.to_sql(&mut fmt);

        ret.push(';');
        ret
    }

    /// Number of parameters `update` binds once serialized.
    pub fn param_count(&self, update: &BulkUpdate) -> usize {
        if self.inline {
            return 0;
        }

        let width = update.key.len();
        let keys = update.rows.len() * width;
        let cases = update.case_count();

        if self.capability().numbered_params {
            keys + cases
        } else {
            keys + cases * (width + 1)
        }
    }

    fn check_bulk_update(&self, update: &BulkUpdate) -> Result<()> {
        if update.key.is_empty() {
            return Err(err!("bulk update of `{}` has no key columns", update.table));
        }

        if update.rows.is_empty() {
            return Err(err!("bulk update of `{}` has no rows", update.table));
        }

        for (index, row) in update.rows.iter().enumerate() {
            if row.len() != update.key.len() {
                return Err(Error::inconsistent_key_shape(
                    index,
                    format!(
                        "expected {} key values, found {}",
                        update.key.len(),
                        row.len()
                    ),
                ));
            }

            for (column, value) in update.key.iter().zip(row) {
                if value.is_null() || !value.is_scalar() {
                    return Err(Error::unsupported_value_type(
                        value.type_name(),
                        format!("key column `{column}` of row {index}"),
                    ));
                }
                self.check_literal(value, column, index)?;
            }
        }

        for assignment in &update.assignments {
            if assignment.cases.is_empty() {
                return Err(err!(
                    "assignment to `{}` has no WHEN branches",
                    assignment.column
                ));
            }

            for case in &assignment.cases {
                if case.row >= update.rows.len() {
                    return Err(err!(
                        "assignment to `{}` references row {} of {}",
                        assignment.column,
                        case.row,
                        update.rows.len()
                    ));
                }

                if !case.value.is_scalar() {
                    return Err(Error::unsupported_value_type(
                        case.value.type_name(),
                        format!("data column `{}` of row {}", assignment.column, case.row),
                    ));
                }
                self.check_literal(&case.value, &assignment.column, case.row)?;
            }
        }

        if self.capability().sequential_assignments && update.assigns_key_column() {
            return Err(Error::unsupported_feature(format!(
                "{} applies SET assignments in order, so a bulk update of `{}` cannot assign its own key columns",
                self.flavor.name(),
                update.table
            )));
        }

        let count = self.param_count(update);
        let max = self.capability().max_params;
        if count > max {
            return Err(Error::too_many_parameters(count, max));
        }

        Ok(())
    }

    /// NUL cannot be represented inside a quoted literal.
    fn check_literal(
        &self,
        value: &crate::stmt::Value,
        column: &crate::stmt::Ident,
        row: usize,
    ) -> Result<()> {
        match value.as_str() {
            Some(s) if self.inline && s.contains('\0') => Err(Error::unsupported_value_type(
                "String containing NUL",
                format!("column `{column}` of row {row}"),
            )),
            _ => Ok(()),
        }
    }
}

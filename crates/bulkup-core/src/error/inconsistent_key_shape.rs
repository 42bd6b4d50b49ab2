use super::Error;

/// Error when a row's key does not have the same columns as the first row.
///
/// Every row in a batch must be keyed by the same set of physical columns
/// (order may differ). A row keyed by `{orgId, email}` and another keyed by
/// `{id}` cannot share one compound `IN` predicate.
#[derive(Debug)]
pub(super) struct InconsistentKeyShape {
    row: usize,
    message: Box<str>,
}

impl std::error::Error for InconsistentKeyShape {}

impl core::fmt::Display for InconsistentKeyShape {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "inconsistent key shape in row {}: {}",
            self.row, self.message
        )
    }
}

impl Error {
    /// Creates an inconsistent key shape error for the row at `row`.
    pub fn inconsistent_key_shape(row: usize, message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InconsistentKeyShape(InconsistentKeyShape {
            row,
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an inconsistent key shape error.
    pub fn is_inconsistent_key_shape(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InconsistentKeyShape(_))
    }
}

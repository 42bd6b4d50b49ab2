use super::Error;

/// Error when a table or column name fails identifier validation.
///
/// Identifiers are spliced into the statement text (they cannot be bound as
/// parameters), so only ASCII letters, digits and `_` are accepted.
#[derive(Debug)]
pub(super) struct InvalidIdentifier {
    name: Box<str>,
    reason: Box<str>,
}

impl std::error::Error for InvalidIdentifier {}

impl core::fmt::Display for InvalidIdentifier {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid identifier `{}`: {}", self.name, self.reason)
    }
}

impl Error {
    /// Creates an invalid identifier error.
    pub fn invalid_identifier(name: impl Into<String>, reason: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidIdentifier(InvalidIdentifier {
            name: name.into().into(),
            reason: reason.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid identifier error.
    pub fn is_invalid_identifier(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidIdentifier(_))
    }
}

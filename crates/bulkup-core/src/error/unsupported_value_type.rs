use super::Error;

/// Error when a key or data value is not something the compiler can render.
///
/// Supported are scalars (null, bool, integer, finite float, string) and,
/// directly under a key, a record of scalars wrapping a compound key.
#[derive(Debug)]
pub(super) struct UnsupportedValueType {
    ty: Box<str>,
    location: Box<str>,
}

impl std::error::Error for UnsupportedValueType {}

impl core::fmt::Display for UnsupportedValueType {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "unsupported value type {} in {}",
            self.ty, self.location
        )
    }
}

impl Error {
    /// Creates an unsupported value type error.
    ///
    /// `ty` names the offending value's type, `location` describes where it
    /// was found.
    pub fn unsupported_value_type(ty: impl Into<String>, location: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnsupportedValueType(UnsupportedValueType {
            ty: ty.into().into(),
            location: location.into().into(),
        }))
    }

    /// Returns `true` if this error is an unsupported value type error.
    pub fn is_unsupported_value_type(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnsupportedValueType(_))
    }
}

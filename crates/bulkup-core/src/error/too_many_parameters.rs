use super::Error;

/// Error when a compiled statement would bind more parameters than the
/// database accepts in a single statement.
#[derive(Debug)]
pub(super) struct TooManyParameters {
    count: usize,
    max: usize,
}

impl std::error::Error for TooManyParameters {}

impl core::fmt::Display for TooManyParameters {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "statement binds {} parameters; the database accepts at most {}",
            self.count, self.max
        )
    }
}

impl Error {
    /// Creates a parameter limit error.
    pub fn too_many_parameters(count: usize, max: usize) -> Error {
        Error::from(super::ErrorKind::TooManyParameters(TooManyParameters {
            count,
            max,
        }))
    }

    /// Returns `true` if this error is a parameter limit error.
    pub fn is_too_many_parameters(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::TooManyParameters(_))
    }
}

use super::Error;

/// Error when a referenced entity vanished: a descriptor row deleted between a
/// schedule firing and the runner executing, or a `DROP INDEX` against an
/// index that does not exist.
#[derive(Debug)]
pub(super) struct NotFoundError {
    pub(super) context: Box<str>,
}

impl std::error::Error for NotFoundError {}

impl core::fmt::Display for NotFoundError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "not found: {}", self.context)
    }
}

impl Error {
    /// Creates a not-found error.
    pub fn not_found(context: impl Into<Box<str>>) -> Error {
        Error::from(super::ErrorKind::NotFound(NotFoundError {
            context: context.into(),
        }))
    }

    /// Returns `true` if this error is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::NotFound(_))
    }
}

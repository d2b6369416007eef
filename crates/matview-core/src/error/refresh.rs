use super::Error;

/// Error when a refresh cannot run: the backing table does not exist or the
/// view has no unique index to support a concurrent refresh.
#[derive(Debug)]
pub(super) struct RefreshError {
    pub(super) message: Box<str>,
}

impl std::error::Error for RefreshError {}

impl core::fmt::Display for RefreshError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "cannot refresh materialized view: {}", self.message)
    }
}

impl Error {
    /// Creates a refresh error.
    pub fn refresh(message: impl Into<Box<str>>) -> Error {
        Error::from(super::ErrorKind::Refresh(RefreshError {
            message: message.into(),
        }))
    }

    /// Returns `true` if this error is a refresh error.
    pub fn is_refresh(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Refresh(_))
    }
}

use super::Error;

/// Error for malformed SQL/DDL — an invalid query definition, an unknown
/// column, or an index method that does not apply to the column type.
#[derive(Debug)]
pub(super) struct DefinitionError {
    pub(super) message: Box<str>,
}

impl std::error::Error for DefinitionError {}

impl core::fmt::Display for DefinitionError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid definition: {}", self.message)
    }
}

impl Error {
    /// Creates a definition error from the underlying database's message.
    pub fn definition(message: impl Into<Box<str>>) -> Error {
        Error::from(super::ErrorKind::Definition(DefinitionError {
            message: message.into(),
        }))
    }

    /// Returns `true` if this error is a definition error.
    pub fn is_definition(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Definition(_))
    }
}

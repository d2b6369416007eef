use super::Error;

/// Error from the database driver: transport or connection failure, or any
/// SQL failure the driver does not classify more specifically.
#[derive(Debug)]
pub(super) struct DatabaseError {
    pub(super) inner: Box<dyn std::error::Error + Send + Sync>,
}

impl std::error::Error for DatabaseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.inner.as_ref())
    }
}

impl core::fmt::Display for DatabaseError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        // Display the error and walk its source chain
        core::fmt::Display::fmt(&self.inner, f)?;
        let mut source = self.inner.source();
        while let Some(err) = source {
            write!(f, ": {}", err)?;
            source = err.source();
        }
        Ok(())
    }
}

impl Error {
    /// Creates an error from a database driver error.
    ///
    /// This is the preferred way to convert driver-specific errors
    /// (tokio-postgres errors and the like) into matview errors.
    pub fn database(err: impl std::error::Error + Send + Sync + 'static) -> Error {
        Error::from(super::ErrorKind::Database(DatabaseError {
            inner: Box::new(err),
        }))
    }

    /// Returns `true` if this error is a database error.
    pub fn is_database(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Database(_))
    }
}

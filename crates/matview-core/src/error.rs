mod database;
mod definition;
mod not_found;
mod refresh;

use database::DatabaseError;
use definition::DefinitionError;
use not_found::NotFoundError;
use refresh::RefreshError;
use std::sync::Arc;

/// Helper macro for returning ad-hoc errors.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::from_args(format_args!($($arg)*)))
    };
}

/// Helper macro for creating ad-hoc errors.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// An error that can occur while managing a materialized view.
#[derive(Clone)]
pub struct Error {
    inner: Option<Arc<ErrorInner>>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

#[derive(Debug)]
enum ErrorKind {
    /// Malformed SQL/DDL. Surfaced to the caller verbatim, never retried.
    Definition(DefinitionError),

    /// Refresh preconditions unmet (missing table, no unique index).
    Refresh(RefreshError),

    /// A referenced entity no longer exists.
    NotFound(NotFoundError),

    /// Transport or connection failure reported by the database driver.
    Database(DatabaseError),

    Anyhow(anyhow::Error),
    Unknown,
}

impl Error {
    /// Adds context to this error.
    ///
    /// Context is displayed in reverse order: the most recently added context
    /// is shown first, ending with the root cause.
    #[inline(always)]
    pub fn context(self, consequent: Error) -> Error {
        self.context_impl(consequent)
    }

    #[inline(never)]
    #[cold]
    fn context_impl(self, consequent: Error) -> Error {
        let mut err = consequent;
        if err.inner.is_none() {
            err = Error::from(ErrorKind::Unknown);
        }
        let inner = err.inner.as_mut().unwrap();
        assert!(
            inner.cause.is_none(),
            "consequent error must not already have a cause"
        );
        Arc::get_mut(inner).unwrap().cause = Some(self);
        err
    }

    #[doc(hidden)]
    pub fn from_args(args: core::fmt::Arguments<'_>) -> Error {
        Error::from(ErrorKind::Anyhow(anyhow::Error::msg(std::fmt::format(
            args,
        ))))
    }

    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = self;
        core::iter::once(err).chain(core::iter::from_fn(move || {
            err = err.inner.as_ref().and_then(|inner| inner.cause.as_ref())?;
            Some(err)
        }))
    }

    fn kind(&self) -> &ErrorKind {
        self.inner
            .as_ref()
            .map(|inner| &inner.kind)
            .unwrap_or(&ErrorKind::Unknown)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind() {
            ErrorKind::Database(err) => Some(err),
            ErrorKind::Anyhow(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            let Some(ref inner) = self.inner else {
                return f.debug_struct("Error").field("kind", &"None").finish();
            };
            f.debug_struct("Error")
                .field("kind", &inner.kind)
                .field("cause", &inner.cause)
                .finish()
        }
    }
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match self {
            Definition(err) => core::fmt::Display::fmt(err, f),
            Refresh(err) => core::fmt::Display::fmt(err, f),
            NotFound(err) => core::fmt::Display::fmt(err, f),
            Database(err) => core::fmt::Display::fmt(err, f),
            Anyhow(err) => core::fmt::Display::fmt(err, f),
            Unknown => f.write_str("unknown matview error"),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Some(Arc::new(ErrorInner { kind, cause: None })),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        Error::from(ErrorKind::Anyhow(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Error {
        Error::from(anyhow::Error::from(err))
    }
}

impl From<uuid::Error> for Error {
    fn from(err: uuid::Error) -> Error {
        Error::from(anyhow::Error::from(err))
    }
}

impl From<jiff::Error> for Error {
    fn from(err: jiff::Error) -> Error {
        Error::from(anyhow::Error::from(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_size() {
        // Ensure Error stays at one word (size of pointer/Arc)
        let expected_size = core::mem::size_of::<usize>();
        assert_eq!(expected_size, core::mem::size_of::<Error>());
    }

    #[test]
    fn error_from_args() {
        let err = Error::from_args(format_args!("test error: {}", 42));
        assert_eq!(err.to_string(), "test error: 42");
    }

    #[test]
    fn error_chain_display() {
        let root = Error::not_found("index t1_id does not exist");
        let top = Error::from_args(format_args!("drop index failed"));

        let chained = root.context(top);
        assert_eq!(
            chained.to_string(),
            "drop index failed: not found: index t1_id does not exist"
        );
        assert!(!chained.is_not_found());
    }

    #[test]
    fn definition_error() {
        let err = Error::definition("syntax error at or near \"SELEC\"");
        assert!(err.is_definition());
        assert_eq!(
            err.to_string(),
            "invalid definition: syntax error at or near \"SELEC\""
        );
    }

    #[test]
    fn refresh_error_wrapping_cause() {
        let root = Error::database(std::io::Error::new(
            std::io::ErrorKind::Other,
            "connection reset",
        ));
        let err = root.context(Error::refresh("failed to refresh materialized view `t1`"));

        assert!(err.is_refresh());
        assert_eq!(
            err.to_string(),
            "cannot refresh materialized view: failed to refresh materialized view `t1`: connection reset"
        );
    }

    #[test]
    fn not_found_error() {
        let err = Error::not_found("materialized view id=42");
        assert!(err.is_not_found());
        assert!(!err.is_database());
        assert_eq!(err.to_string(), "not found: materialized view id=42");
    }

    #[test]
    fn database_error_preserves_source() {
        use std::error::Error as _;

        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "broken pipe");
        let err = Error::database(io);
        assert!(err.is_database());
        assert!(err.source().is_some());
        assert_eq!(err.to_string(), "broken pipe");
    }

    #[test]
    fn anyhow_bridge() {
        let anyhow_err = anyhow::anyhow!("something failed");
        let our_err: Error = anyhow_err.into();
        assert_eq!(our_err.to_string(), "something failed");
    }
}

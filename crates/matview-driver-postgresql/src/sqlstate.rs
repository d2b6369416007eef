use matview_core::Error;

use tokio_postgres::error::SqlState;

enum Kind {
    Definition,
    NotFound,
    Refresh,
    Database,
}

/// Converts a tokio-postgres error into a matview error, classifying by
/// SQLSTATE. Anything without a database-reported code (connection drop,
/// protocol failure) is a plain database error.
pub(crate) fn classify(err: tokio_postgres::Error) -> Error {
    let Some(db_err) = err.as_db_error() else {
        return Error::database(err);
    };

    let message = db_err.message().to_string();
    match kind(db_err.code()) {
        Kind::Definition => Error::definition(message),
        Kind::NotFound => Error::not_found(message),
        Kind::Refresh => Error::refresh(message),
        Kind::Database => Error::database(err),
    }
}

fn kind(code: &SqlState) -> Kind {
    if *code == SqlState::SYNTAX_ERROR
        || *code == SqlState::UNDEFINED_COLUMN
        || *code == SqlState::UNDEFINED_FUNCTION
        || *code == SqlState::DATATYPE_MISMATCH
        || *code == SqlState::WRONG_OBJECT_TYPE
    {
        Kind::Definition
    } else if *code == SqlState::UNDEFINED_TABLE || *code == SqlState::UNDEFINED_OBJECT {
        // Missing relation or index: the referenced entity vanished
        Kind::NotFound
    } else if *code == SqlState::FEATURE_NOT_SUPPORTED
        || *code == SqlState::OBJECT_NOT_IN_PREREQUISITE_STATE
    {
        // PostgreSQL rejects `REFRESH ... CONCURRENTLY` without a unique
        // index with feature_not_supported
        Kind::Refresh
    } else {
        Kind::Database
    }
}

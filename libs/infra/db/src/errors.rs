// [libs/infra/db/src/errors.rs]
/*!
 * =================================================================
 * APARATO: DATABASE FAULT TAXONOMY
 * CLASIFICACIÓN: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: TRADUCCIÓN DE ERRORES DE LIBSQL HACIA EL DOMINIO DEL REPOSITORIO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. ATOMIC INTEGRITY: un `UNIQUE constraint failed` nunca se confunde
 *    con un fallo de conexión.
 * =================================================================
 */

use thiserror::Error;

use fednode_core_repository::RepoError;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("database connection failed: {0}")]
    Connection(String),

    #[error("database query failed: {0}")]
    Query(#[from] libsql::Error),

    #[error("row mapping failed: {0}")]
    Mapping(String),

    #[error("record not found")]
    NotFound,

    #[error("unique constraint violated: {0}")]
    Conflict(String),

    #[error("transaction failed: {0}")]
    Transaction(String),
}

/// SQLite reports unique-constraint violations as a string inside
/// `libsql::Error`; there's no typed variant to match on.
pub fn map_libsql_error(err: libsql::Error) -> DbError {
    let message = err.to_string();
    if message.contains("UNIQUE constraint failed") {
        DbError::Conflict(message)
    } else {
        DbError::Query(err)
    }
}

impl From<DbError> for RepoError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound => RepoError::NotFound,
            DbError::Conflict(reason) => RepoError::Conflict(reason),
            other => RepoError::Backend(other.to_string()),
        }
    }
}

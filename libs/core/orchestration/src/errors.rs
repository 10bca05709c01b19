// [libs/core/orchestration/src/errors.rs]
/*!
 * =================================================================
 * APARATO: ORCHESTRATION FAULT TAXONOMY
 * CLASIFICACIÓN: CORE LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: VOCABULARIO DE ERROR DEL NÚCLEO DE PLANIFICACIÓN Y DESPACHO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. HYGIENE TOTAL: todo `RepoError` se eleva a `CoreError` sin perder su
 *    variante original.
 * =================================================================
 */

use thiserror::Error;

use fednode_core_repository::RepoError;

/// One variant per taxonomy entry in spec §7; `coordinator` maps these to
/// HTTP status codes.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("access denied")]
    AccessDenied,

    #[error("invalid artifact: {0}")]
    InvalidArtifact(String),

    #[error("not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<RepoError> for CoreError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => CoreError::NotFound,
            RepoError::Conflict(reason) => CoreError::Conflict(reason),
            RepoError::Backend(reason) => CoreError::Internal(reason),
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;

// [libs/core/repository/src/errors.rs]
/*!
 * =================================================================
 * APARATO: REPOSITORY FAULT TAXONOMY
 * CLASIFICACIÓN: CORE ABSTRACTION (ESTRATO L2)
 * RESPONSABILIDAD: VOCABULARIO DE ERROR COMÚN A TODO BACKEND DE PERSISTENCIA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. NOMINAL PURITY: `NotFound`/`Conflict`/`Backend` son exhaustivos y
 *    mutuamente excluyentes.
 * =================================================================
 */

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepoError {
    #[error("record not found")]
    NotFound,

    #[error("unique constraint violated: {0}")]
    Conflict(String),

    #[error("backend error: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, RepoError>;

// [apps/client-node/src/lib.rs]
/*!
 * =================================================================
 * APARATO: CLIENT NODE MODULE REGISTRY
 * CLASIFICACIÓN: APPLICATION ADAPTER (ESTRATO L4)
 * RESPONSABILIDAD: PUNTO DE ENTRADA PÚBLICO DEL BINARIO CLIENTE DE APRENDIZAJE FEDERADO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. HYGIENE TOTAL: sólo `ClientEngine`, `TaskExecutor` y
 *    `PassThroughExecutor` cruzan hacia `main.rs`.
 * =================================================================
 */

pub mod engine;
pub mod executor;

pub mod prelude {
    pub use crate::engine::ClientEngine;
    pub use crate::executor::{PassThroughExecutor, TaskExecutor};
}

// [libs/core/orchestration/src/lib.rs]
/*!
 * =================================================================
 * APARATO: ORCHESTRATION MODULE REGISTRY
 * CLASIFICACIÓN: CORE LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: PUNTO DE ENTRADA PÚBLICO DEL NÚCLEO DE ORQUESTACIÓN FEDERADA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. HYGIENE TOTAL: sólo `Planner`, `Scheduler`, `UpdateService` y
 *    `ResultStore` cruzan hacia los binarios.
 * =================================================================
 */

pub mod dispatch;
pub mod errors;
pub mod planner;
pub mod result_store;
pub mod scheduler;
pub mod session;

pub use dispatch::UpdateService;
pub use errors::{CoreError, Result};
pub use planner::{Planner, PartialSet};
pub use result_store::{BlobStore, ResultStore};
pub use scheduler::Scheduler;
pub use session::{
    issue_token_value, new_token, public_key_checksum, sign_join_claim, token_expired,
    verify_join_signature, verify_leave_signature,
};

// [apps/coordinator/src/lib.rs]
/*!
 * =================================================================
 * APARATO: COORDINATOR MODULE REGISTRY
 * CLASIFICACIÓN: APPLICATION ADAPTER (ESTRATO L4)
 * RESPONSABILIDAD: CABLEADO DEL SERVIDOR HTTP AXUM SOBRE EL NÚCLEO DE ORQUESTACIÓN FEDERADA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. HYGIENE TOTAL: sólo `AppState`/`run` y los módulos públicos
 *    necesarios cruzan hacia `main.rs`.
 * =================================================================
 */

pub mod blob_store;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod kernel;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;

pub mod prelude {
    pub use crate::config::Config;
    pub use crate::kernel::CoordinatorKernel;
    pub use crate::state::AppState;
}

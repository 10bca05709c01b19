// [libs/infra/client-transport/src/lib.rs]
/*!
 * =================================================================
 * APARATO: CLIENT TRANSPORT MODULE REGISTRY
 * CLASIFICACIÓN: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: PUNTO DE ENTRADA PÚBLICO DEL ADAPTADOR HTTP HACIA EL COORDINADOR
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. HYGIENE TOTAL: sólo `CoordinatorClient`/`Session` cruzan hacia los
 *    binarios cliente.
 * =================================================================
 */

pub mod client;
pub mod errors;

pub use client::{CoordinatorClient, Session};
pub use errors::{ClientError, Result};

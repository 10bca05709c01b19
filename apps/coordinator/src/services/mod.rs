// [apps/coordinator/src/services/mod.rs]
/*!
 * =================================================================
 * APARATO: SERVICES MODULE REGISTRY
 * CLASIFICACIÓN: APPLICATION ADAPTER (ESTRATO L4)
 * RESPONSABILIDAD: PUNTO DE ENTRADA DE LOS DAEMONS DE FONDO DEL COORDINADOR
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. HYGIENE TOTAL: un único módulo por daemon, sin lógica compartida
 *    implícita.
 * =================================================================
 */

pub mod lease_reclaim;

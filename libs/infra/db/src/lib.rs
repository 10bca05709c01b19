// [libs/infra/db/src/lib.rs]
/*!
 * =================================================================
 * APARATO: DATABASE MODULE REGISTRY
 * CLASIFICACIÓN: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: PUNTO DE ENTRADA PÚBLICO DEL BACKEND LIBSQL
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. HYGIENE TOTAL: sólo los tipos que el núcleo de orquestación necesita
 *    cruzan el límite del crate.
 * =================================================================
 */

pub mod client;
pub mod errors;
pub mod repositories;
pub mod schema;

pub use client::LibsqlClient;
pub use errors::{map_libsql_error, DbError};
pub use repositories::{
    LibsqlArtifactRepository, LibsqlComponentRepository, LibsqlDataSourceRepository,
    LibsqlJobRepository, LibsqlKeyValueStore, LibsqlProjectRepository, LibsqlResultRepository,
    LibsqlTokenRepository,
};

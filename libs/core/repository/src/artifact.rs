// [libs/core/repository/src/artifact.rs]
/*!
 * =================================================================
 * APARATO: ARTIFACT REPOSITORY CONTRACT
 * CLASIFICACIÓN: CORE ABSTRACTION (ESTRATO L2)
 * RESPONSABILIDAD: INTERFAZ DE PERSISTENCIA DEL CICLO DE VIDA DE UN ARTEFACTO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. ATOMIC INTEGRITY: `set_status` es la única vía para mover un
 *    artefacto entre estados.
 * =================================================================
 */

use async_trait::async_trait;
use fednode_domain_models::{Artifact, ArtifactStatusKind};
use uuid::Uuid;

use crate::errors::Result;
use crate::transaction_handle::TransactionHandle;

#[async_trait]
pub trait ArtifactRepository: Send + Sync {
    async fn create(&self, transaction_handle: &mut TransactionHandle, artifact: &Artifact) -> Result<()>;
    async fn find_by_id(&self, transaction_handle: &mut TransactionHandle, id: Uuid) -> Result<Artifact>;
    async fn set_status(&self, transaction_handle: &mut TransactionHandle, id: Uuid, status: ArtifactStatusKind) -> Result<()>;
    async fn set_current_iteration(&self, transaction_handle: &mut TransactionHandle, id: Uuid, iteration: u32) -> Result<()>;
}

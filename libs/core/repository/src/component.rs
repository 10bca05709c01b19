// [libs/core/repository/src/component.rs]
/*!
 * =================================================================
 * APARATO: COMPONENT REPOSITORY CONTRACT
 * CLASIFICACIÓN: CORE ABSTRACTION (ESTRATO L2)
 * RESPONSABILIDAD: INTERFAZ DE REGISTRO Y CONSULTA DE COMPONENTES DE LA RED
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. HYGIENE TOTAL: `list_by_type` es la única vía que el planificador
 *    usa para hallar un agregador elegible.
 * =================================================================
 */

use async_trait::async_trait;
use fednode_domain_models::{Component, ComponentType};
use uuid::Uuid;

use crate::errors::Result;
use crate::transaction_handle::TransactionHandle;

#[async_trait]
pub trait ComponentRepository: Send + Sync {
    async fn create(&self, transaction_handle: &mut TransactionHandle, component: &Component) -> Result<()>;
    async fn find_by_id(&self, transaction_handle: &mut TransactionHandle, id: Uuid) -> Result<Component>;
    async fn find_by_public_key(&self, transaction_handle: &mut TransactionHandle, public_key_pem: &str) -> Result<Option<Component>>;

    /// Backs the `(mac, machine_node)` uniqueness check at join time for
    /// CLIENT components (spec §4.2 supplement).
    async fn find_by_machine(
        &self,
        transaction_handle: &mut TransactionHandle,
        mac_address: &str,
        machine_node: &str,
    ) -> Result<Option<Component>>;

    async fn list_by_type(&self, transaction_handle: &mut TransactionHandle, component_type: ComponentType) -> Result<Vec<Component>>;
    async fn set_active(&self, transaction_handle: &mut TransactionHandle, id: Uuid, active: bool) -> Result<()>;
    async fn mark_left(&self, transaction_handle: &mut TransactionHandle, id: Uuid) -> Result<()>;
}

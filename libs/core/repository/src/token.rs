// [libs/core/repository/src/token.rs]
/*!
 * =================================================================
 * APARATO: TOKEN REPOSITORY CONTRACT
 * CLASIFICACIÓN: CORE ABSTRACTION (ESTRATO L2)
 * RESPONSABILIDAD: INTERFAZ DE EMISIÓN Y RESOLUCIÓN DE TOKENS DE SESIÓN
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. HYGIENE TOTAL: la validez del token se resuelve en una única
 *    consulta indexada.
 * =================================================================
 */

use async_trait::async_trait;
use fednode_domain_models::Token;
use uuid::Uuid;

use crate::errors::Result;
use crate::transaction_handle::TransactionHandle;

#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Invalidates every prior token for `token.component_id` and stores
    /// `token` as the sole valid one (spec §4.2).
    async fn issue(&self, transaction_handle: &mut TransactionHandle, token: &Token) -> Result<()>;

    async fn invalidate_all_for_component(&self, transaction_handle: &mut TransactionHandle, component_id: Uuid) -> Result<()>;
    async fn find_valid(&self, transaction_handle: &mut TransactionHandle, token: &str) -> Result<Option<Token>>;
}

// [apps/coordinator/src/services/lease_reclaim.rs]
/*!
 * =================================================================
 * APARATO: LEASE RECLAIM DAEMON
 * CLASIFICACIÓN: APPLICATION ADAPTER (ESTRATO L4)
 * RESPONSABILIDAD: RECLAMO PERIÓDICO DE ARRIENDOS `RUNNING` EXPIRADOS (spec.md §4.5, §5)
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. ATOMIC INTEGRITY: grounded en el daemon de latido del `kernel.rs`
 *    original, ahora reclamando arriendos en lugar de misiones huérfanas.
 * =================================================================
 */

use chrono::Utc;
use tracing::{error, info};

use fednode_core_repository::Database;

use crate::state::AppState;

pub async fn spawn(state: AppState) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(state.config.heartbeat_interval());
        loop {
            ticker.tick().await;
            if let Err(err) = reclaim_once(&state).await {
                error!(error = %err, "💥 [LEASE_RECLAIM_FAILED]: lease reclaim tick failed");
            }
        }
    });
}

async fn reclaim_once(state: &AppState) -> anyhow::Result<()> {
    let mut transaction_handle = state.db.begin().await?;
    let reclaimed = state.scheduler().reclaim_expired_leases(&mut transaction_handle, Utc::now()).await?;
    state.db.commit(transaction_handle).await?;
    if reclaimed > 0 {
        info!(reclaimed, "♻️ [LEASE_RECLAIMED]: reclaimed expired job leases");
    }
    Ok(())
}

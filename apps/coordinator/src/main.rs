// [apps/coordinator/src/main.rs]
/*!
 * =================================================================
 * APARATO: COORDINATOR ENTRYPOINT
 * CLASIFICACIÓN: APPLICATION ENTRYPOINT (ESTRATO L5)
 * RESPONSABILIDAD: ARRANQUE DEL PROCESO COORDINADOR
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. HYGIENE TOTAL: un fallo de arranque se registra y termina el proceso
 *    con código distinto de cero.
 * =================================================================
 */

use coordinator::prelude::*;
use tracing::error;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    fednode_shared_telemetry::init_tracing("coordinator");

    let runtime = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;

    runtime.block_on(async {
        let config = Config::load(&std::path::PathBuf::from("workdir/config.yaml"))?;
        let kernel = CoordinatorKernel::ignite(config).await?;

        if let Err(err) = kernel.launch().await {
            error!(error = %err, "💥 [COORDINATOR_FATAL]: coordinator exited with an error");
            std::process::exit(1);
        }
        Ok(())
    })
}

// [apps/coordinator/src/kernel.rs]
/*!
 * =================================================================
 * APARATO: COORDINATOR SOVEREIGN KERNEL
 * CLASIFICACIÓN: COMPOSITION ROOT (ESTRATO L5)
 * RESPONSABILIDAD: IGNICIÓN DEL ESTADO, EL DAEMON DE RECLAMO Y EL SERVIDOR AXUM
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. HYGIENE TOTAL: grounded en `OrchestratorKernel::ignite` y
 *    `launch_sovereign_operations`, recortado de ocho daemons a uno solo.
 * =================================================================
 */

use std::net::{IpAddr, SocketAddr};

use tracing::{error, info, instrument};

use crate::config::Config;
use crate::routes::build_router;
use crate::services::lease_reclaim;
use crate::state::AppState;

pub struct CoordinatorKernel {
    listen_port: u16,
    state: AppState,
}

impl CoordinatorKernel {
    #[instrument(skip(config))]
    pub async fn ignite(config: Config) -> anyhow::Result<Self> {
        let listen_port = config.listen_port;
        let state = AppState::bootstrap(config).await?;
        Ok(Self { listen_port, state })
    }

    pub async fn launch(self) -> anyhow::Result<()> {
        lease_reclaim::spawn(self.state.clone()).await;

        let router = build_router(self.state);
        let bind_address = SocketAddr::new("0.0.0.0".parse::<IpAddr>().unwrap(), self.listen_port);

        info!(%bind_address, "🚀 [IGNITION]: coordinator listening");
        let listener = tokio::net::TcpListener::bind(bind_address).await?;

        if let Err(err) = axum::serve(listener, router).await {
            error!(error = %err, "💥 [SERVER_DOWN]: server loop terminated");
            return Err(err.into());
        }
        Ok(())
    }
}

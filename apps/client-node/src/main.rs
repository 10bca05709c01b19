// [apps/client-node/src/main.rs]
/*!
 * =================================================================
 * APARATO: CLIENT NODE ENTRYPOINT
 * CLASIFICACIÓN: APPLICATION ENTRYPOINT (ESTRATO L5)
 * RESPONSABILIDAD: ARRANQUE DEL PROCESO CLIENTE Y MANEJO DE CTRL-C
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. HYGIENE TOTAL: la señal de apagado nunca interrumpe una tarea a
 *    mitad de ejecución, sólo detiene el siguiente ciclo de latido.
 * =================================================================
 */

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use client_node_lib::engine::ClientEngine;
use tracing::{info, warn};

/// CLI directives for a federated learning CLIENT node.
#[derive(Parser, Debug)]
#[command(version, about = "Federated learning client heartbeat node")]
struct ClientDirectives {
    /// Base URL of the coordinator this client joins.
    #[arg(long, env = "COORDINATOR_URL")]
    coordinator_url: String,

    /// Local directory holding this client's persisted identity and keys.
    #[arg(long, env = "CLIENT_WORKDIR", default_value = "workdir")]
    workdir: PathBuf,

    /// Optional MAC address used to recognize this machine across restarts.
    #[arg(long, env = "CLIENT_MAC_ADDRESS")]
    mac_address: Option<String>,

    /// Optional machine/node label paired with `mac_address`.
    #[arg(long, env = "CLIENT_MACHINE_NODE")]
    machine_node: Option<String>,

    /// Seconds between heartbeat polls of `/client/update`.
    #[arg(long, env = "CLIENT_HEARTBEAT_SECONDS", default_value_t = 5)]
    heartbeat_seconds: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    fednode_shared_telemetry::init_tracing("client-node");

    let directives = ClientDirectives::parse();

    let running = Arc::new(AtomicBool::new(true));
    let signal_flag = Arc::clone(&running);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("🛑 [SHUTDOWN_REQUESTED]: leaving after the current heartbeat tick");
            signal_flag.store(false, Ordering::SeqCst);
        }
    });

    let engine = ClientEngine::new(
        directives.coordinator_url,
        directives.workdir,
        directives.mac_address,
        directives.machine_node,
        Duration::from_secs(directives.heartbeat_seconds),
        running,
    )?;

    info!("🚀 [STARTUP]: client node starting");
    engine.ignite().await?;
    info!("🏁 [STOPPED]: client node stopped");

    Ok(())
}

// [apps/workbench-cli/src/main.rs]
/*!
 * =================================================================
 * APARATO: WORKBENCH CLI ENTRYPOINT
 * CLASIFICACIÓN: APPLICATION ENTRYPOINT (ESTRATO L5)
 * RESPONSABILIDAD: ENVÍO DE ARTEFACTOS Y CONSULTA DE ESTADO/RESULTADOS COMO COMPONENTE USER
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. HYGIENE TOTAL: grounded en la forma de `census-taker` — un
 *    `clap::Parser` delgado sobre un motor de librería, con subcomandos.
 * =================================================================
 */

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fednode_core_crypto::KeyMaterial;
use fednode_domain_models::{ArtifactSubmission, ComponentType};
use fednode_infra_client_transport::CoordinatorClient;
use tracing::info;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(version, about = "Workbench client for submitting artifacts and retrieving results")]
struct Cli {
    /// Base URL of the coordinator.
    #[arg(long, env = "COORDINATOR_URL")]
    coordinator_url: String,

    /// Local directory holding this user's persisted identity and keys.
    #[arg(long, env = "WORKBENCH_WORKDIR", default_value = "workdir")]
    workdir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit a new artifact, read from a JSON file shaped like `ArtifactSubmission`.
    Submit {
        #[arg(long)]
        artifact: PathBuf,
    },
    /// Poll the status of a previously submitted artifact.
    Status {
        #[arg(long)]
        artifact_id: Uuid,
    },
    /// Download a result blob (partial, aggregated, or error) by id.
    Result {
        #[arg(long)]
        result_id: Uuid,
        #[arg(long)]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    fednode_shared_telemetry::init_tracing("workbench-cli");

    let cli = Cli::parse();
    std::fs::create_dir_all(&cli.workdir)?;

    let keys = KeyMaterial::load_or_generate(&cli.workdir.join("private_key.pem"))?;
    let id = load_or_generate_id(&cli.workdir.join("component_id.txt"))?;

    let client = CoordinatorClient::new(cli.coordinator_url);
    let server_public_key = client.fetch_server_public_key().await?;
    let session = client
        .join(
            &server_public_key,
            &keys,
            id,
            ComponentType::User,
            env!("CARGO_PKG_VERSION"),
            std::env::consts::OS,
            None,
            None,
        )
        .await?;

    match cli.command {
        Command::Submit { artifact } => {
            let raw = std::fs::read_to_string(&artifact)
                .with_context(|| format!("reading artifact submission from {}", artifact.display()))?;
            let submission: ArtifactSubmission = serde_json::from_str(&raw)?;
            let status = client.submit_artifact(&keys, &session, &submission).await?;
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        Command::Status { artifact_id } => {
            let status = client.artifact_status(&keys, &session, artifact_id).await?;
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        Command::Result { result_id, output } => {
            let blob = client.download_workbench_result(&session, result_id).await?;
            std::fs::write(&output, &blob)
                .with_context(|| format!("writing result blob to {}", output.display()))?;
            info!(bytes = blob.len(), path = %output.display(), "✅ [RESULT_WRITTEN]: result written");
        }
    }

    client.leave(&keys, &session).await.ok();
    Ok(())
}

fn load_or_generate_id(path: &std::path::Path) -> Result<Uuid> {
    if path.exists() {
        let raw = std::fs::read_to_string(path)?;
        return Ok(Uuid::parse_str(raw.trim())?);
    }
    let id = Uuid::new_v4();
    std::fs::write(path, id.to_string())?;
    Ok(id)
}

// [apps/client-node/src/engine.rs]
/*!
 * =================================================================
 * APARATO: CLIENT HEARTBEAT ENGINE
 * CLASIFICACIÓN: APPLICATION ADAPTER (ESTRATO L4)
 * RESPONSABILIDAD: BUCLE DE LATIDO QUE CONDUCE UN COMPONENTE CLIENT FRENTE AL COORDINADOR
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. HYGIENE TOTAL: grounded en `MinerEngine::ignite_sovereign_operations
 *    `/`execute_mission_lifecycle` — el canal de hallazgos se convierte
 *    en canal de tareas terminadas.
 * 2. ATOMIC INTEGRITY: un reingreso tras pérdida de sesión jamás
 *    reutiliza un token expirado.
 * =================================================================
 */

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use fednode_core_crypto::{decrypt_bytes, unpack_envelope, KeyMaterial};
use fednode_domain_models::{ComponentType, JobKind, TaskError, UpdateData};
use fednode_infra_client_transport::{CoordinatorClient, Session};
use tokio::sync::mpsc;
use tokio::time::sleep;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::executor::{PassThroughExecutor, TaskExecutor};

struct FinishedTask {
    job_id: Uuid,
    outcome: Result<Vec<u8>, String>,
}

pub struct ClientEngine {
    client: Arc<CoordinatorClient>,
    keys: Arc<KeyMaterial>,
    id: Uuid,
    mac_address: Option<String>,
    machine_node: Option<String>,
    heartbeat_interval: Duration,
    running: Arc<AtomicBool>,
    executor: Arc<dyn TaskExecutor>,
}

impl ClientEngine {
    pub fn new(
        coordinator_url: String,
        workdir: PathBuf,
        mac_address: Option<String>,
        machine_node: Option<String>,
        heartbeat_interval: Duration,
        running: Arc<AtomicBool>,
    ) -> anyhow::Result<Self> {
        std::fs::create_dir_all(&workdir)?;
        let keys = KeyMaterial::load_or_generate(&workdir.join("private_key.pem"))?;
        let id = load_or_generate_id(&workdir.join("component_id.txt"))?;

        Ok(Self {
            client: Arc::new(CoordinatorClient::new(coordinator_url)),
            keys: Arc::new(keys),
            id,
            mac_address,
            machine_node,
            heartbeat_interval,
            running,
            executor: Arc::new(PassThroughExecutor),
        })
    }

    #[instrument(skip(self), fields(component_id = %self.id))]
    pub async fn ignite(&self) -> anyhow::Result<()> {
        while self.running.load(Ordering::SeqCst) {
            let server_public_key = self.client.fetch_server_public_key().await?;
            let session = self
                .client
                .join(
                    &server_public_key,
                    &self.keys,
                    self.id,
                    ComponentType::Client,
                    env!("CARGO_PKG_VERSION"),
                    std::env::consts::OS,
                    self.mac_address.clone(),
                    self.machine_node.clone(),
                )
                .await?;
            info!("🚀 [JOINED]: joined coordinator");

            match self.run_session(session).await {
                Ok(keep_going) => {
                    if !keep_going {
                        return Ok(());
                    }
                    warn!("⚠️ [SESSION_LOST]: rejoining after the next heartbeat interval");
                    sleep(self.heartbeat_interval).await;
                }
                Err(err) => {
                    warn!(error = %err, "⚠️ [HEARTBEAT_ERROR]: rejoining");
                    sleep(self.heartbeat_interval).await;
                }
            }
        }
        Ok(())
    }

    /// Runs the heartbeat loop for one joined session. Returns `Ok(true)`
    /// if the session was lost and a rejoin should be attempted, `Ok(false)`
    /// if the process should shut down entirely.
    async fn run_session(&self, session: Session) -> anyhow::Result<bool> {
        let (finished_tx, mut finished_rx) = mpsc::unbounded_channel::<FinishedTask>();
        let mut current_job_id: Option<Uuid> = None;

        while self.running.load(Ordering::SeqCst) {
            if let Ok(finished) = finished_rx.try_recv() {
                self.report_outcome(&session, finished).await;
                current_job_id = None;
            }

            let action = self.client.update(&self.keys, &session, current_job_id).await?;
            match action {
                UpdateData::Nothing => {}
                UpdateData::ExecuteJob { job_id, kind } => {
                    if current_job_id.is_none() {
                        current_job_id = Some(job_id);
                        self.dispatch_task(session.clone(), job_id, kind, finished_tx.clone());
                    }
                }
                UpdateData::UpdatePublicKey { new_public_key_pem } => {
                    warn!(
                        new_public_key_pem,
                        "🔑 [KEY_ROTATION_UNSUPPORTED]: server asked this node to rotate its identity \
                         key, which it cannot materialize locally; dropping the session \
                         and rejoining fresh"
                    );
                    return Ok(true);
                }
                UpdateData::Exit => {
                    info!("🛑 [LEAVE_REQUESTED]: server requested this node leave");
                    self.client.leave(&self.keys, &session).await?;
                    self.running.store(false, Ordering::SeqCst);
                    return Ok(false);
                }
            }

            sleep(self.heartbeat_interval).await;
        }

        self.client.leave(&self.keys, &session).await.ok();
        Ok(false)
    }

    /// Fetches the encrypted task descriptor, runs it on a blocking thread,
    /// and funnels the outcome back into the heartbeat loop.
    fn dispatch_task(
        &self,
        session: Session,
        job_id: Uuid,
        _kind: JobKind,
        finished_tx: mpsc::UnboundedSender<FinishedTask>,
    ) {
        let client = Arc::clone(&self.client);
        let keys = Arc::clone(&self.keys);
        let executor = Arc::clone(&self.executor);

        tokio::spawn(async move {
            let outcome = async {
                let params = client
                    .fetch_task(&keys, &session, job_id)
                    .await
                    .map_err(|e| e.to_string())?;
                let (header, checksum, frame) =
                    unpack_envelope(&params.encrypted_descriptor).map_err(|e| e.to_string())?;
                let descriptor =
                    decrypt_bytes(&keys.private_key, &header, &frame, checksum).map_err(|e| e.to_string())?;

                let executor = Arc::clone(&executor);
                tokio::task::spawn_blocking(move || executor.execute(&descriptor))
                    .await
                    .map_err(|e| e.to_string())?
            }
            .await;

            let _ = finished_tx.send(FinishedTask { job_id, outcome });
        });
    }

    async fn report_outcome(&self, session: &Session, finished: FinishedTask) {
        match finished.outcome {
            Ok(blob) => {
                if let Err(err) = self.client.upload_result(&self.keys, session, finished.job_id, blob).await {
                    warn!(job_id = %finished.job_id, error = %err, "⚠️ [UPLOAD_RETRY]: result upload failed, will be retried on a later tick");
                }
            }
            Err(reason) => {
                let task_error = TaskError {
                    job_id: finished.job_id,
                    reason,
                    reported_at: Utc::now(),
                };
                if let Err(err) = self.client.report_error(&self.keys, session, &task_error).await {
                    warn!(job_id = %finished.job_id, error = %err, "⚠️ [ERROR_REPORT_RETRY]: error report failed, will be retried on a later tick");
                }
            }
        }
    }
}

fn load_or_generate_id(path: &Path) -> anyhow::Result<Uuid> {
    if path.exists() {
        let raw = std::fs::read_to_string(path)?;
        return Ok(Uuid::parse_str(raw.trim())?);
    }
    let id = Uuid::new_v4();
    std::fs::write(path, id.to_string())?;
    Ok(id)
}

// [libs/domain/models/src/wire.rs]
/*!
 * =================================================================
 * APARATO: WIRE ENVELOPE CONTRACTS
 * CLASIFICACIÓN: DOMAIN MODEL (ESTRATO L1)
 * RESPONSABILIDAD: CUERPOS DE PETICIÓN/RESPUESTA DE LOS DOS FORMATOS DE RUTA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. HYGIENE TOTAL: estos estructuras son texto plano; la capa de sesión
 *    es la única responsable del sobre cifrado.
 * =================================================================
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::component::ComponentType;
use crate::job::JobKind;

/// `GET /node/key` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerPublicKey {
    pub public_key_pem: String,
}

/// `POST /node/join` request body. `signature` covers `id:public_key`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeJoinRequest {
    pub id: Uuid,
    pub component_type: ComponentType,
    pub public_key_pem: String,
    pub version: String,
    /// Client platform string (`sys.platform`/`uname` on the original
    /// implementation), folded into the issued token.
    pub system: String,
    pub signature: String,
    pub checksum: String,
    pub mac_address: Option<String>,
    pub machine_node: Option<String>,
}

/// `POST /node/join` response, hybrid-encrypted to the joining client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinData {
    pub id: Uuid,
    pub token: String,
    pub server_public_key_pem: String,
}

/// `POST /node/leave` request; signed the same way as join.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeLeaveRequest {
    pub id: Uuid,
    pub signature: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Metadata {
    pub fields: std::collections::BTreeMap<String, String>,
}

/// `GET /client/update` request: the client's current action state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientUpdate {
    pub component_id: Uuid,
    pub current_job_id: Option<Uuid>,
}

/// `GET /client/update` response variants (spec.md §4.7).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum UpdateData {
    Nothing,
    ExecuteJob { job_id: Uuid, kind: JobKind },
    UpdatePublicKey { new_public_key_pem: String },
    Exit,
}

/// `GET /worker/task/{job_id}` response: encrypted task parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskParameters {
    pub job_id: Uuid,
    pub artifact_id: Uuid,
    pub iteration: u32,
    pub kind: JobKind,
    pub content_ids: Vec<String>,
    /// Opaque artifact descriptor (query plan + model/estimator payload),
    /// hybrid-encrypted for the receiving worker.
    pub encrypted_descriptor: Vec<u8>,
}

/// `POST /worker/error` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskError {
    pub job_id: Uuid,
    pub reason: String,
    pub reported_at: DateTime<Utc>,
}

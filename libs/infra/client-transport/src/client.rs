// [libs/infra/client-transport/src/client.rs]
/*!
 * =================================================================
 * APARATO: COORDINATOR TRANSPORT ADAPTER
 * CLASIFICACIÓN: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: ENVOLTURA HTTP PARA EL PROTOCOLO DE ENVÍO Y FIRMA FRENTE AL COORDINADOR
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. DUAL FRAMING: `EncodedBody` para el apretón de manos inicial,
 *    `SignedBody` para toda llamada autenticada.
 * 2. NOMINAL PURITY: cada método expone el verbo de dominio
 *    (`fetch_task`, `upload_result`) en lugar de un CRUD genérico.
 * =================================================================
 */

//! HTTP adapter a CLIENT or WORKER component uses to reach the coordinator
//! (spec.md §6). Handles both route framings: `EncodedBody` for the
//! pre-auth join handshake, `SignedBody` (token header + signature over the
//! ciphertext) for everything after.

use std::time::Duration;

use fednode_core_crypto::{open, open_signed, seal, seal_signed, sign_claim, KeyMaterial};
use fednode_core_orchestration::{public_key_checksum, sign_join_claim};
use fednode_domain_models::{
    ArtifactStatus, ArtifactSubmission, ClientUpdate, ComponentType, JoinData, Metadata,
    NodeJoinRequest, NodeLeaveRequest, ServerPublicKey, TaskError, TaskParameters, UpdateData,
};
use reqwest::{Method, StatusCode};
use rsa::RsaPublicKey;
use serde::{de::DeserializeOwned, Serialize};
use sha2::{Digest, Sha256};
use tracing::instrument;
use uuid::Uuid;

use crate::errors::{ClientError, Result};

/// Everything a component learns from a successful `join()`: its assigned
/// id, bearer token, and the coordinator's public key (cached so later
/// calls don't refetch it).
#[derive(Clone)]
pub struct Session {
    pub component_id: Uuid,
    pub token: String,
    pub server_public_key: RsaPublicKey,
}

pub struct CoordinatorClient {
    http: reqwest::Client,
    base_url: String,
}

impl CoordinatorClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(60))
                .build()
                .expect("reqwest client initialization failed"),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    #[instrument(skip(self))]
    pub async fn fetch_server_public_key(&self) -> Result<RsaPublicKey> {
        let response = self.http.get(self.url("/node/key")).send().await?;
        let body: ServerPublicKey = check(response).await?.json().await?;
        let pem = fednode_core_crypto::decode_pem_from_transfer(&body.public_key_pem, "PUBLIC KEY")?;
        Ok(fednode_core_crypto::public_key_from_pem(&pem)?)
    }

    /// Runs the join handshake (spec.md §4.2): signs and checksums the
    /// caller's own public key, encrypts the request to the coordinator,
    /// and decrypts the resulting session material with `keys`.
    #[instrument(skip(self, keys, server_public_key))]
    pub async fn join(
        &self,
        server_public_key: &RsaPublicKey,
        keys: &KeyMaterial,
        id: Uuid,
        component_type: ComponentType,
        version: &str,
        system: &str,
        mac_address: Option<String>,
        machine_node: Option<String>,
    ) -> Result<Session> {
        let public_key_pem = keys.public_key_pem()?;
        let checksum = public_key_checksum(&public_key_pem);
        let signature = sign_join_claim(&keys.private_key, id, &public_key_pem)?;

        let request = NodeJoinRequest {
            id,
            component_type,
            public_key_pem,
            version: version.to_string(),
            system: system.to_string(),
            signature,
            checksum,
            mac_address,
            machine_node,
        };

        let sealed = seal(server_public_key, &request)?;
        let response = self
            .http
            .post(self.url("/node/join"))
            .json(&sealed)
            .send()
            .await?;
        let sealed_reply: fednode_core_crypto::EncodedBody = check(response).await?.json().await?;
        let join_data: JoinData = open(&keys.private_key, &sealed_reply)?;

        Ok(Session {
            component_id: join_data.id,
            token: join_data.token,
            server_public_key: server_public_key.clone(),
        })
    }

    #[instrument(skip(self, keys, session))]
    pub async fn leave(&self, keys: &KeyMaterial, session: &Session) -> Result<()> {
        let public_key_pem = keys.public_key_pem()?;
        let signature = sign_join_claim(&keys.private_key, session.component_id, &public_key_pem)?;
        let request = NodeLeaveRequest {
            id: session.component_id,
            signature,
        };
        self.call_signed::<_, ()>(Method::POST, "/node/leave", keys, session, &request)
            .await
    }

    #[instrument(skip(self, keys, session))]
    pub async fn push_metadata(&self, keys: &KeyMaterial, session: &Session, metadata: &Metadata) -> Result<Metadata> {
        self.call_signed(Method::POST, "/node/metadata", keys, session, metadata).await
    }

    #[instrument(skip(self, keys, session))]
    pub async fn update(&self, keys: &KeyMaterial, session: &Session, current_job_id: Option<Uuid>) -> Result<UpdateData> {
        let request = ClientUpdate {
            component_id: session.component_id,
            current_job_id,
        };
        self.call_signed(Method::GET, "/client/update", keys, session, &request).await
    }

    #[instrument(skip(self, keys, session))]
    pub async fn fetch_task(&self, keys: &KeyMaterial, session: &Session, job_id: Uuid) -> Result<TaskParameters> {
        self.call_signed(Method::GET, &format!("/worker/task/{job_id}"), keys, session, &())
            .await
    }

    #[instrument(skip(self, keys, session, blob))]
    pub async fn upload_result(&self, keys: &KeyMaterial, session: &Session, job_id: Uuid, blob: Vec<u8>) -> Result<()> {
        let signature = self.sign_blob(keys, &blob)?;
        let response = self
            .http
            .post(self.url(&format!("/worker/result/{job_id}")))
            .bearer_auth(&session.token)
            .header("X-Signature", signature)
            .body(blob)
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    #[instrument(skip(self, keys, session))]
    pub async fn report_error(&self, keys: &KeyMaterial, session: &Session, error: &TaskError) -> Result<()> {
        self.call_signed::<_, ()>(Method::POST, "/worker/error", keys, session, error).await
    }

    #[instrument(skip(self, session))]
    pub async fn download_result(&self, session: &Session, result_id: Uuid) -> Result<Vec<u8>> {
        let response = self
            .http
            .get(self.url(&format!("/worker/result/{result_id}")))
            .bearer_auth(&session.token)
            .send()
            .await?;
        Ok(check(response).await?.bytes().await?.to_vec())
    }

    /// Submits a new artifact for planning (spec.md §4.4). USER-role only.
    #[instrument(skip(self, keys, session, submission))]
    pub async fn submit_artifact(
        &self,
        keys: &KeyMaterial,
        session: &Session,
        submission: &ArtifactSubmission,
    ) -> Result<ArtifactStatus> {
        self.call_signed(Method::POST, "/workbench/artifact/submit", keys, session, submission)
            .await
    }

    #[instrument(skip(self, keys, session))]
    pub async fn artifact_status(&self, keys: &KeyMaterial, session: &Session, artifact_id: Uuid) -> Result<ArtifactStatus> {
        self.call_signed(Method::GET, &format!("/workbench/artifact/status/{artifact_id}"), keys, session, &())
            .await
    }

    #[instrument(skip(self, session))]
    pub async fn download_workbench_result(&self, session: &Session, result_id: Uuid) -> Result<Vec<u8>> {
        let response = self
            .http
            .get(self.url(&format!("/workbench/result/{result_id}")))
            .bearer_auth(&session.token)
            .send()
            .await?;
        Ok(check(response).await?.bytes().await?.to_vec())
    }

    fn sign_blob(&self, keys: &KeyMaterial, blob: &[u8]) -> Result<String> {
        let digest = hex::encode(Sha256::digest(blob));
        Ok(hex::encode(sign_claim(&keys.private_key, &digest)?))
    }

    async fn call_signed<Req: Serialize, Resp: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        keys: &KeyMaterial,
        session: &Session,
        request: &Req,
    ) -> Result<Resp> {
        let sealed = seal_signed(&session.server_public_key, &keys.private_key, request)?;
        let response = self
            .http
            .request(method, self.url(path))
            .bearer_auth(&session.token)
            .json(&sealed)
            .send()
            .await?;
        let sealed_reply: fednode_core_crypto::SignedBody = check(response).await?.json().await?;
        Ok(open_signed(&keys.private_key, &session.server_public_key, &sealed_reply)?)
    }
}

async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
    if response.status() == StatusCode::OK {
        Ok(response)
    } else {
        Err(ClientError::ServerRejection(response.status().as_u16()))
    }
}

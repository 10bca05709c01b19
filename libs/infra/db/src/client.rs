// [libs/infra/db/src/client.rs]
/*!
 * =================================================================
 * APARATO: LIBSQL CLIENT KERNEL
 * CLASIFICACIÓN: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: APERTURA, POOLING Y LÍMITE TRANSACCIONAL SOBRE LA BASE DE DATOS LIBSQL
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. HYGIENE TOTAL: el ancla de memoria mantiene viva una base `:memory:`
 *    mientras el proceso viva.
 * 2. NOMINAL PURITY: `connection` en lugar de `conn` en cada variable de
 *    conexión abierta.
 * =================================================================
 */

use std::sync::Arc;

use async_trait::async_trait;
use fednode_core_repository::{Database as DatabaseTrait, RepoError, TransactionHandle};
use libsql::{Builder, Connection, Database, Transaction};
use tracing::{error, info, instrument};

use crate::errors::DbError;
use crate::schema::apply_schema;

/// Opens and pools connections to the coordinator's libSQL database and
/// implements the `Database` transaction boundary the orchestration core
/// composes its repository calls against.
#[derive(Clone)]
pub struct LibsqlClient {
    driver: Arc<Database>,
    /// Keeps an in-memory database alive across connections; SQLite drops
    /// a `:memory:` database as soon as its last connection closes.
    _memory_anchor: Option<Arc<Connection>>,
}

impl LibsqlClient {
    #[instrument(skip(auth_token))]
    pub async fn connect(url: &str, auth_token: Option<String>) -> Result<Self, DbError> {
        if url.is_empty() {
            return Err(DbError::Connection("database url is empty".into()));
        }

        info!(url, "🔌 [DB_CONNECT]: connecting to database");

        let is_remote = url.starts_with("libsql://") || url.starts_with("https://");
        let is_memory = url.contains(":memory:") || url.contains("mode=memory");

        let driver = if is_remote {
            let token = auth_token
                .ok_or_else(|| DbError::Connection("remote url requires an auth token".into()))?;
            Builder::new_remote(url.to_string(), token).build().await
        } else {
            Builder::new_local(url).build().await
        }
        .map_err(|err| DbError::Connection(err.to_string()))?;

        let driver = Arc::new(driver);
        let mut anchor = None;

        if is_memory {
            let anchor_connection = driver
                .connect()
                .map_err(|err| DbError::Connection(err.to_string()))?;
            apply_schema(&anchor_connection)
                .await
                .map_err(|err| DbError::Connection(err.to_string()))?;
            anchor = Some(Arc::new(anchor_connection));
        } else {
            let bootstrap_connection = driver
                .connect()
                .map_err(|err| DbError::Connection(err.to_string()))?;
            apply_schema(&bootstrap_connection)
                .await
                .map_err(|err| DbError::Connection(err.to_string()))?;
        }

        Ok(Self {
            driver,
            _memory_anchor: anchor,
        })
    }

    pub fn connection(&self) -> Result<Connection, DbError> {
        self.driver.connect().map_err(|err| {
            error!(%err, "💥 [DB_CONNECTION_FAILED]: failed to allocate connection");
            DbError::Connection(err.to_string())
        })
    }
}

#[async_trait]
impl DatabaseTrait for LibsqlClient {
    async fn begin(&self) -> Result<TransactionHandle, RepoError> {
        let connection = self.connection().map_err(RepoError::from)?;
        let transaction: Transaction = connection
            .transaction()
            .await
            .map_err(|err| DbError::Transaction(err.to_string()))
            .map_err(RepoError::from)?;
        Ok(TransactionHandle::new(transaction))
    }

    async fn commit(&self, transaction_handle: TransactionHandle) -> Result<(), RepoError> {
        let transaction = transaction_handle
            .into_inner::<Transaction>()
            .ok_or_else(|| RepoError::Backend("transaction_handle does not hold a libsql transaction".into()))?;
        transaction
            .commit()
            .await
            .map_err(|err| DbError::Transaction(err.to_string()))
            .map_err(RepoError::from)
    }

    async fn rollback(&self, transaction_handle: TransactionHandle) -> Result<(), RepoError> {
        let transaction = transaction_handle
            .into_inner::<Transaction>()
            .ok_or_else(|| RepoError::Backend("transaction_handle does not hold a libsql transaction".into()))?;
        transaction
            .rollback()
            .await
            .map_err(|err| DbError::Transaction(err.to_string()))
            .map_err(RepoError::from)
    }
}

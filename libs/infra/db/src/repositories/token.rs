// [libs/infra/db/src/repositories/token.rs]
/*!
 * =================================================================
 * APARATO: TOKEN LEDGER REPOSITORY
 * CLASIFICACIÓN: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: EMISIÓN, RESOLUCIÓN Y REVOCACIÓN DE TOKENS DE SESIÓN
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. HYGIENE TOTAL: un token revocado nunca resuelve a un `AuthContext`
 *    válido.
 * =================================================================
 */

use async_trait::async_trait;
use fednode_core_repository::{Result, TokenRepository, TransactionHandle};
use fednode_domain_models::Token;
use libsql::{params, Row};
use uuid::Uuid;

use super::transaction;
use super::util::{parse_dt, parse_uuid, qerr};

const COLUMNS: &str = "token, component_id, expiration, valid, issued_at";

pub struct LibsqlTokenRepository;

impl LibsqlTokenRepository {
    pub fn new() -> Self {
        Self
    }

    fn map_row(row: &Row) -> Result<Token> {
        let token: String = row.get(0).map_err(qerr)?;
        let component_id: String = row.get(1).map_err(qerr)?;
        let expiration: String = row.get(2).map_err(qerr)?;
        let valid: i64 = row.get(3).map_err(qerr)?;
        let issued_at: String = row.get(4).map_err(qerr)?;

        Ok(Token {
            token,
            component_id: parse_uuid(&component_id)?,
            expiration: parse_dt(&expiration)?,
            valid: valid != 0,
            issued_at: parse_dt(&issued_at)?,
        })
    }
}

#[async_trait]
impl TokenRepository for LibsqlTokenRepository {
    async fn issue(&self, transaction_handle: &mut TransactionHandle, token: &Token) -> Result<()> {
        {
            let t = transaction(transaction_handle)?;
            t.execute(
                "UPDATE tokens SET valid = 0 WHERE component_id = ?1",
                params![token.component_id.to_string()],
            )
            .await
            .map_err(qerr)?;
        }
        let t = transaction(transaction_handle)?;
        t.execute(
            &format!("INSERT INTO tokens ({COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5)"),
            params![
                token.token.clone(),
                token.component_id.to_string(),
                token.expiration.to_rfc3339(),
                token.valid as i64,
                token.issued_at.to_rfc3339(),
            ],
        )
        .await
        .map_err(qerr)?;
        Ok(())
    }

    async fn invalidate_all_for_component(&self, transaction_handle: &mut TransactionHandle, component_id: Uuid) -> Result<()> {
        let t = transaction(transaction_handle)?;
        t.execute(
            "UPDATE tokens SET valid = 0 WHERE component_id = ?1",
            params![component_id.to_string()],
        )
        .await
        .map_err(qerr)?;
        Ok(())
    }

    async fn find_valid(&self, transaction_handle: &mut TransactionHandle, token: &str) -> Result<Option<Token>> {
        let t = transaction(transaction_handle)?;
        let mut rows = t
            .query(
                &format!("SELECT {COLUMNS} FROM tokens WHERE token = ?1 AND valid = 1"),
                params![token.to_string()],
            )
            .await
            .map_err(qerr)?;
        match rows.next().await.map_err(qerr)? {
            Some(row) => Ok(Some(Self::map_row(&row)?)),
            None => Ok(None),
        }
    }
}

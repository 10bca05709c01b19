// [libs/infra/db/src/repositories/component.rs]
/*!
 * =================================================================
 * APARATO: COMPONENT LEDGER REPOSITORY
 * CLASIFICACIÓN: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: REGISTRO Y RESOLUCIÓN DE COMPONENTES DE LA RED FEDERADA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. ATOMIC INTEGRITY: el par (mac_address, machine_node) es único a
 *    nivel de esquema.
 * =================================================================
 */

use async_trait::async_trait;
use fednode_core_repository::{ComponentRepository, RepoError, Result, TransactionHandle};
use fednode_domain_models::{Component, ComponentType, NetworkCoordinates};
use libsql::{params, Row};
use uuid::Uuid;

use super::transaction;
use super::util::{de_enum, parse_dt, parse_uuid, qerr, ser_enum};

const COLUMNS: &str = "id, component_type, public_key_pem, ip_address, port, mac_address, \
    machine_node, active, left_network, created_at";

pub struct LibsqlComponentRepository;

impl LibsqlComponentRepository {
    pub fn new() -> Self {
        Self
    }

    fn map_row(row: &Row) -> Result<Component> {
        let id: String = row.get(0).map_err(qerr)?;
        let component_type: String = row.get(1).map_err(qerr)?;
        let public_key_pem: String = row.get(2).map_err(qerr)?;
        let ip_address: String = row.get(3).map_err(qerr)?;
        let port: Option<i64> = row.get(4).map_err(qerr)?;
        let mac_address: Option<String> = row.get(5).map_err(qerr)?;
        let machine_node: Option<String> = row.get(6).map_err(qerr)?;
        let active: i64 = row.get(7).map_err(qerr)?;
        let left_network: i64 = row.get(8).map_err(qerr)?;
        let created_at: String = row.get(9).map_err(qerr)?;

        Ok(Component {
            id: parse_uuid(&id)?,
            component_type: de_enum::<ComponentType>(&component_type)?,
            public_key_pem,
            network: NetworkCoordinates {
                ip_address,
                port: port.map(|p| p as u16),
            },
            mac_address,
            machine_node,
            active: active != 0,
            left: left_network != 0,
            created_at: parse_dt(&created_at)?,
        })
    }
}

#[async_trait]
impl ComponentRepository for LibsqlComponentRepository {
    async fn create(&self, transaction_handle: &mut TransactionHandle, component: &Component) -> Result<()> {
        let component_type = ser_enum(&component.component_type)?;
        let t = transaction(transaction_handle)?;
        t.execute(
            &format!("INSERT INTO components ({COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"),
            params![
                component.id.to_string(),
                component_type,
                component.public_key_pem.clone(),
                component.network.ip_address.clone(),
                component.network.port.map(|p| p as i64),
                component.mac_address.clone(),
                component.machine_node.clone(),
                component.active as i64,
                component.left as i64,
                component.created_at.to_rfc3339(),
            ],
        )
        .await
        .map_err(qerr)?;
        Ok(())
    }

    async fn find_by_id(&self, transaction_handle: &mut TransactionHandle, id: Uuid) -> Result<Component> {
        let t = transaction(transaction_handle)?;
        let mut rows = t
            .query(
                &format!("SELECT {COLUMNS} FROM components WHERE id = ?1"),
                params![id.to_string()],
            )
            .await
            .map_err(qerr)?;
        let row = rows.next().await.map_err(qerr)?.ok_or(RepoError::NotFound)?;
        Self::map_row(&row)
    }

    async fn find_by_public_key(&self, transaction_handle: &mut TransactionHandle, public_key_pem: &str) -> Result<Option<Component>> {
        let t = transaction(transaction_handle)?;
        let mut rows = t
            .query(
                &format!("SELECT {COLUMNS} FROM components WHERE public_key_pem = ?1"),
                params![public_key_pem.to_string()],
            )
            .await
            .map_err(qerr)?;
        match rows.next().await.map_err(qerr)? {
            Some(row) => Ok(Some(Self::map_row(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_machine(
        &self,
        transaction_handle: &mut TransactionHandle,
        mac_address: &str,
        machine_node: &str,
    ) -> Result<Option<Component>> {
        let t = transaction(transaction_handle)?;
        let mut rows = t
            .query(
                &format!("SELECT {COLUMNS} FROM components WHERE mac_address = ?1 AND machine_node = ?2"),
                params![mac_address.to_string(), machine_node.to_string()],
            )
            .await
            .map_err(qerr)?;
        match rows.next().await.map_err(qerr)? {
            Some(row) => Ok(Some(Self::map_row(&row)?)),
            None => Ok(None),
        }
    }

    async fn list_by_type(&self, transaction_handle: &mut TransactionHandle, component_type: ComponentType) -> Result<Vec<Component>> {
        let encoded = ser_enum(&component_type)?;
        let t = transaction(transaction_handle)?;
        let mut rows = t
            .query(
                &format!("SELECT {COLUMNS} FROM components WHERE component_type = ?1"),
                params![encoded],
            )
            .await
            .map_err(qerr)?;
        let mut out = Vec::new();
        while let Some(row) = rows.next().await.map_err(qerr)? {
            out.push(Self::map_row(&row)?);
        }
        Ok(out)
    }

    async fn set_active(&self, transaction_handle: &mut TransactionHandle, id: Uuid, active: bool) -> Result<()> {
        let t = transaction(transaction_handle)?;
        t.execute(
            "UPDATE components SET active = ?1 WHERE id = ?2",
            params![active as i64, id.to_string()],
        )
        .await
        .map_err(qerr)?;
        Ok(())
    }

    async fn mark_left(&self, transaction_handle: &mut TransactionHandle, id: Uuid) -> Result<()> {
        let t = transaction(transaction_handle)?;
        t.execute(
            "UPDATE components SET left_network = 1, active = 0 WHERE id = ?1",
            params![id.to_string()],
        )
        .await
        .map_err(qerr)?;
        Ok(())
    }
}

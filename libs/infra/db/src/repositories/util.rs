// [libs/infra/db/src/repositories/util.rs]
/*!
 * =================================================================
 * APARATO: SERIALIZACIÓN DE FILAS COMPARTIDA
 * CLASIFICACIÓN: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: DECODIFICACIÓN JSON COMÚN A TODO REPOSITORIO CONCRETO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. HYGIENE TOTAL: un único punto de fallo de deserialización en lugar
 *    de uno por repositorio.
 * =================================================================
 */

use chrono::{DateTime, Utc};
use fednode_core_repository::RepoError;
use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

use crate::errors::{map_libsql_error, DbError};

/// Maps a raw `libsql` error straight to the repository boundary's error
/// type; used at `row.get(...)`/`query`/`execute` call sites.
pub fn qerr(err: libsql::Error) -> RepoError {
    map_libsql_error(err).into()
}

/// Enums land in TEXT columns as their `serde(rename_all = ...)` spelling,
/// quoted JSON string form (`"NODE"`, `"SCHEDULED"`, ...).
pub fn ser_enum<T: Serialize>(value: &T) -> Result<String, DbError> {
    serde_json::to_string(value).map_err(|err| DbError::Mapping(err.to_string()))
}

pub fn de_enum<T: DeserializeOwned>(raw: &str) -> Result<T, DbError> {
    serde_json::from_str(raw).map_err(|err| DbError::Mapping(format!("{raw}: {err}")))
}

pub fn ser_json<T: Serialize>(value: &T) -> Result<String, DbError> {
    serde_json::to_string(value).map_err(|err| DbError::Mapping(err.to_string()))
}

pub fn de_json<T: DeserializeOwned>(raw: &str) -> Result<T, DbError> {
    serde_json::from_str(raw).map_err(|err| DbError::Mapping(err.to_string()))
}

pub fn parse_uuid(raw: &str) -> Result<Uuid, DbError> {
    Uuid::parse_str(raw).map_err(|err| DbError::Mapping(format!("{raw}: {err}")))
}

pub fn parse_dt(raw: &str) -> Result<DateTime<Utc>, DbError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| DbError::Mapping(format!("{raw}: {err}")))
}

pub fn parse_dt_opt(raw: Option<String>) -> Result<Option<DateTime<Utc>>, DbError> {
    raw.map(|raw| parse_dt(&raw)).transpose()
}

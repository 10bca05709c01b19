// [libs/domain/models/src/component.rs]
/*!
 * =================================================================
 * APARATO: COMPONENT DOMAIN MODEL
 * CLASIFICACIÓN: DOMAIN MODEL (ESTRATO L1)
 * RESPONSABILIDAD: IDENTIDAD, TIPO Y COORDENADAS DE RED DE UN PARTICIPANTE DE LA FEDERACIÓN
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. HYGIENE TOTAL: un `ComponentType` inválido para una ruta se rechaza
 *    en el handler, nunca aquí.
 * =================================================================
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of participant identified by a `Component` row.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ComponentType {
    Client,
    Node,
    Worker,
    User,
}

impl ComponentType {
    /// Route guards check membership against slices of this; keep it small and explicit
    /// rather than a bitflag, matching the taxonomy in spec.md §3.
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentType::Client => "CLIENT",
            ComponentType::Node => "NODE",
            ComponentType::Worker => "WORKER",
            ComponentType::User => "USER",
        }
    }
}

/// Network coordinates advertised by a component at join time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkCoordinates {
    pub ip_address: String,
    pub port: Option<u16>,
}

/// Identity of a participant. Never physically deleted; `left=true` on leave.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
    pub id: Uuid,
    pub component_type: ComponentType,
    pub public_key_pem: String,
    pub network: NetworkCoordinates,
    /// Present only for CLIENT components; combined with `machine_node` the
    /// pair must be unique (spec.md §3).
    pub mac_address: Option<String>,
    pub machine_node: Option<String>,
    pub active: bool,
    pub left: bool,
    pub created_at: DateTime<Utc>,
}

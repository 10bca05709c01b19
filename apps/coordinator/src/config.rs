// [apps/coordinator/src/config.rs]
/*!
 * =================================================================
 * APARATO: CONFIGURATION LOADER
 * CLASIFICACIÓN: APPLICATION ADAPTER (ESTRATO L4)
 * RESPONSABILIDAD: CONFIGURACIÓN EN DOS ETAPAS: INVENTARIO YAML Y SECRETOS DE ENTORNO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. HYGIENE TOTAL: un secreto jamás vive en `config.yaml`; sólo en
 *    `.env`/entorno.
 * =================================================================
 */

use std::path::{Path, PathBuf};

use serde::Deserialize;

fn default_listen_port() -> u16 {
    3000
}

fn default_heartbeat_seconds() -> i64 {
    30
}

fn default_lease_multiplier() -> i64 {
    2
}

fn default_token_ttl_seconds() -> i64 {
    24 * 60 * 60
}

fn default_workdir() -> PathBuf {
    PathBuf::from("workdir")
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,
    #[serde(default = "default_heartbeat_seconds")]
    pub heartbeat_seconds: i64,
    #[serde(default = "default_lease_multiplier")]
    pub lease_multiplier: i64,
    #[serde(default = "default_token_ttl_seconds")]
    pub token_ttl_seconds: i64,
    #[serde(default = "default_workdir")]
    pub workdir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_port: default_listen_port(),
            heartbeat_seconds: default_heartbeat_seconds(),
            lease_multiplier: default_lease_multiplier(),
            token_ttl_seconds: default_token_ttl_seconds(),
            workdir: default_workdir(),
        }
    }
}

impl Config {
    /// Loads `workdir/config.yaml` if present, then overlays `PORT` from
    /// the environment the same way the teacher's `main.rs` does for its
    /// listen port.
    pub fn load(config_path: &Path) -> anyhow::Result<Self> {
        let mut config = if config_path.exists() {
            let raw = std::fs::read_to_string(config_path)?;
            serde_yaml::from_str(&raw)?
        } else {
            Config::default()
        };

        if let Ok(port) = std::env::var("PORT") {
            config.listen_port = port.parse().unwrap_or(config.listen_port);
        }

        Ok(config)
    }

    pub fn lease_duration(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.heartbeat_seconds * self.lease_multiplier)
    }

    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.token_ttl_seconds)
    }

    pub fn heartbeat_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.heartbeat_seconds.max(1) as u64)
    }

    pub fn private_key_path(&self) -> PathBuf {
        self.workdir.join("private_key.pem")
    }

    pub fn artifacts_dir(&self) -> PathBuf {
        self.workdir.join("artifacts")
    }
}

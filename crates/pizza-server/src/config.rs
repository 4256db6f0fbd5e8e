use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

/// Server settings.
///
/// Precedence, lowest first: [`Default`], a TOML file
/// ([`ServerConfig::from_toml_file`]), the `PORT` environment variable
/// ([`ServerConfig::apply_env`]), then whatever the caller sets last.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// JSON file holding the pizza collection.
    pub data_file: PathBuf,
    /// Hold a lock across each load-modify-save cycle.
    pub serialize_writes: bool,
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            data_file: PathBuf::from("pizzas.json"),
            serialize_writes: false,
            enable_cors: false,
        }
    }
}

impl ServerConfig {
    pub fn from_toml_str(text: &str) -> ServerResult<Self> {
        toml::from_str(text).map_err(|e| ServerError::Config(e.to_string()))
    }

    pub fn from_toml_file(path: &Path) -> ServerResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ServerError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> ServerResult<String> {
        toml::to_string_pretty(self).map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Apply `PORT` from the process environment.
    pub fn apply_env(&mut self) -> ServerResult<()> {
        self.apply_port(std::env::var("PORT").ok().as_deref())
    }

    /// Override the listen port, keeping the host.
    pub fn apply_port(&mut self, port: Option<&str>) -> ServerResult<()> {
        if let Some(raw) = port {
            let port: u16 = raw
                .trim()
                .parse()
                .map_err(|_| ServerError::Config(format!("invalid PORT value: {raw:?}")))?;
            self.bind_addr.set_port(port);
        }
        Ok(())
    }
}

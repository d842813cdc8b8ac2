use serde::Deserialize;
use std::path::Path;

/// Top-level config loaded from `telemetry_store.toml`. Retention caps are
/// invariants of the store, not settings, and are never represented here.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct StoreConfig {
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port() }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl StoreConfig {
    /// Load config from a TOML file. Returns defaults if the file doesn't exist.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!("config file not found at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        let config: StoreConfig = toml::from_str(&contents)?;
        tracing::info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Environment variables take precedence over the TOML file and its
    /// defaults.
    pub fn apply_env(mut self) -> Self {
        if let Ok(host) = std::env::var("TELEMETRY_STORE_BIND_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("TELEMETRY_STORE_BIND_PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        self
    }
}

//! Server configuration.
//!
//! Every field has a default, so the server runs without a config file. The
//! binary layers CLI flags and environment variables on top.

use crate::error::ConfigError;
use crate::relay::{DEFAULT_DEDUP_CAPACITY, DEFAULT_DEDUP_EVICT_BATCH};
use crate::signaling::HeartbeatSettings;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
    /// Default `tracing` filter when `RUST_LOG` is unset.
    pub log_level: String,
    /// Seconds between WebSocket pings.
    pub heartbeat_interval_secs: u64,
    /// Seconds of silence after which a socket is treated as disconnected.
    pub heartbeat_timeout_secs: u64,
    pub hub: HubConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".into(),
            port: 9000,
            log_level: "info".into(),
            heartbeat_interval_secs: 25,
            heartbeat_timeout_secs: 20,
            hub: HubConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HubConfig {
    /// Queue depth between socket tasks and the hub.
    pub command_capacity: usize,
    /// Answer ids remembered before eviction starts.
    pub dedup_capacity: usize,
    /// Oldest ids dropped per eviction pass.
    pub dedup_evict_batch: usize,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            command_capacity: 1024,
            dedup_capacity: DEFAULT_DEDUP_CAPACITY,
            dedup_evict_batch: DEFAULT_DEDUP_EVICT_BATCH,
        }
    }
}

impl ServerConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.socket_addr()?;

        if self.heartbeat_interval_secs == 0 || self.heartbeat_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "heartbeat_interval_secs and heartbeat_timeout_secs must be at least 1".into(),
            ));
        }

        if self.hub.command_capacity == 0 {
            return Err(ConfigError::Invalid(
                "hub.command_capacity must be at least 1".into(),
            ));
        }
        if self.hub.dedup_capacity == 0 {
            return Err(ConfigError::Invalid(
                "hub.dedup_capacity must be at least 1".into(),
            ));
        }
        if self.hub.dedup_evict_batch == 0 || self.hub.dedup_evict_batch > self.hub.dedup_capacity {
            return Err(ConfigError::Invalid(format!(
                "hub.dedup_evict_batch must be between 1 and {}",
                self.hub.dedup_capacity
            )));
        }
        Ok(())
    }

    pub fn heartbeat(&self) -> HeartbeatSettings {
        HeartbeatSettings {
            interval: Duration::from_secs(self.heartbeat_interval_secs),
            timeout: Duration::from_secs(self.heartbeat_timeout_secs),
        }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self
            .bind_address
            .parse()
            .map_err(|_| ConfigError::InvalidAddress(self.bind_address.clone()))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

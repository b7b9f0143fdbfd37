use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::time::Duration;

use super::errors::ConfigError;

pub const DEFAULT_DNS_PORT: u16 = 53;
pub const DEFAULT_RESOLV_CONF: &str = "/etc/resolv.conf";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// Explicit nameservers. When empty, `resolv_conf_path` is read instead.
    #[serde(default)]
    pub nameservers: Vec<String>,

    #[serde(default = "default_resolv_conf_path")]
    pub resolv_conf_path: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Deadline for a single lookup. Absent or 0 waits indefinitely.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

impl ResolverConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }

    pub fn parsed_nameservers(&self) -> Result<Vec<IpAddr>, ConfigError> {
        self.nameservers
            .iter()
            .map(|server| {
                server.parse::<IpAddr>().map_err(|e| {
                    ConfigError::Validation(format!("Invalid nameserver '{}': {}", server, e))
                })
            })
            .collect()
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            nameservers: Vec::new(),
            resolv_conf_path: default_resolv_conf_path(),
            port: default_port(),
            timeout_ms: None,
        }
    }
}

fn default_resolv_conf_path() -> String {
    DEFAULT_RESOLV_CONF.to_string()
}

fn default_port() -> u16 {
    DEFAULT_DNS_PORT
}

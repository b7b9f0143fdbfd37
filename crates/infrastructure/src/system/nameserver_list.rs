use super::resolv_conf::ResolvConf;
use dnslookup_application::ports::NameserverProvider;
use dnslookup_domain::config::{ConfigError, ResolverConfig};
use std::net::IpAddr;
use tracing::{info, warn};

/// Nameserver addresses loaded once at startup and never refreshed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameserverList {
    servers: Vec<IpAddr>,
}

impl NameserverList {
    pub fn new(servers: Vec<IpAddr>) -> Self {
        Self { servers }
    }

    /// Explicit `nameservers` from config, otherwise the entries of
    /// `resolv_conf_path`. An unreadable resolv.conf yields an empty list so
    /// that lookups fail with `NoNameservers` instead of at startup.
    pub async fn from_config(config: &ResolverConfig) -> Result<Self, ConfigError> {
        let explicit = config.parsed_nameservers()?;
        if !explicit.is_empty() {
            info!(count = explicit.len(), "Using configured nameservers");
            return Ok(Self::new(explicit));
        }

        let resolv_conf = ResolvConf::new(config.resolv_conf_path.as_str());
        let servers = match resolv_conf.read_nameservers().await {
            Ok(servers) => servers,
            Err(e) => {
                warn!(path = %resolv_conf.path(), error = %e, "Nameserver list unavailable");
                Vec::new()
            }
        };

        info!(
            count = servers.len(),
            path = %resolv_conf.path(),
            "Loaded nameservers from resolv.conf"
        );
        Ok(Self::new(servers))
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }
}

impl NameserverProvider for NameserverList {
    fn nameservers(&self) -> &[IpAddr] {
        &self.servers
    }
}

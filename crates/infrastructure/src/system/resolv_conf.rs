use dnslookup_domain::DomainError;
use std::net::IpAddr;
use std::str::FromStr;
use tokio::fs;
use tracing::{debug, warn};

/// Reader for the `nameserver` entries of a resolv.conf file.
pub struct ResolvConf {
    path: String,
}

impl ResolvConf {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub async fn read_nameservers(&self) -> Result<Vec<IpAddr>, DomainError> {
        let content = fs::read_to_string(&self.path).await.map_err(|e| {
            DomainError::Io(format!("Failed to read {}: {}", self.path, e))
        })?;

        let nameservers = Self::parse(&content);
        debug!(path = %self.path, entries = nameservers.len(), "resolv.conf parsed");
        Ok(nameservers)
    }

    /// Addresses from `nameserver <ip>` lines, in file order.
    pub fn parse(content: &str) -> Vec<IpAddr> {
        let mut nameservers = Vec::new();

        for line in content.lines() {
            let line = line.trim();
            if line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            let mut fields = line.split_whitespace();
            if fields.next() != Some("nameserver") {
                continue;
            }
            let Some(address) = fields.next() else {
                continue;
            };

            // Scoped IPv6 entries look like fe80::1%eth0.
            let address = address.split('%').next().unwrap_or(address);

            match IpAddr::from_str(address) {
                Ok(ip) => nameservers.push(ip),
                Err(e) => {
                    warn!(error = %e, address, "Invalid nameserver in resolv.conf");
                }
            }
        }

        nameservers
    }
}

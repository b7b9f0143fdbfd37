use crate::ports::LookupOptions;
use dnslookup_domain::config::resolver::DEFAULT_DNS_PORT;
use std::net::IpAddr;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub name: String,
    pub server: Option<IpAddr>,
    pub port: u16,
    pub timeout: Option<Duration>,
}

impl LookupRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            server: None,
            port: DEFAULT_DNS_PORT,
            timeout: None,
        }
    }

    pub fn from_options(name: impl Into<String>, options: LookupOptions) -> Self {
        Self {
            server: options.server,
            timeout: options.timeout,
            ..Self::new(name)
        }
    }

    pub fn with_server(mut self, server: IpAddr) -> Self {
        self.server = Some(server);
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

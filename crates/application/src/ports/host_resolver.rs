use async_trait::async_trait;
use dnslookup_domain::{DomainError, ResolvedAnswers};
use std::net::IpAddr;
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupOptions {
    /// Give up after this long. `None` waits for a response indefinitely.
    pub timeout: Option<Duration>,
    /// Query this server instead of the first configured nameserver.
    pub server: Option<IpAddr>,
}

impl LookupOptions {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_server(mut self, server: IpAddr) -> Self {
        self.server = Some(server);
        self
    }
}

#[async_trait]
pub trait HostResolver: Send + Sync {
    async fn lookup(
        &self,
        name: &str,
        options: LookupOptions,
    ) -> Result<ResolvedAnswers, DomainError>;
}

use dnslookup_application::ports::HostResolver;
use dnslookup_domain::Config;
use dnslookup_infrastructure::dns::UdpLookupResolver;
use dnslookup_infrastructure::system::NameserverList;
use std::sync::Arc;
use tracing::{info, warn};

pub struct LookupServices {
    pub resolver: Arc<dyn HostResolver>,
}

impl LookupServices {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let nameservers = NameserverList::from_config(&config.resolver).await?;
        if nameservers.is_empty() {
            warn!("No nameservers configured or found in resolv.conf");
        }

        let resolver = UdpLookupResolver::new(Arc::new(nameservers))
            .with_port(config.resolver.port)
            .with_default_timeout(config.resolver.timeout());

        info!(
            port = config.resolver.port,
            timeout_ms = ?config.resolver.timeout_ms,
            "Lookup resolver ready"
        );

        Ok(Self {
            resolver: Arc::new(resolver),
        })
    }
}

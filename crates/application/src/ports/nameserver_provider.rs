use std::net::IpAddr;

/// Ordered, read-only list of nameservers. Lookups use the first entry.
pub trait NameserverProvider: Send + Sync {
    fn nameservers(&self) -> &[IpAddr];
}

//! dnslookup infrastructure: UDP transport, tokio reactor and system adapters.
pub mod dns;
pub mod system;

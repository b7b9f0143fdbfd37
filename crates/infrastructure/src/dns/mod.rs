pub mod lookup_resolver;
pub mod reactor;
pub mod transport;

pub use lookup_resolver::UdpLookupResolver;
pub use reactor::TokioReactor;
pub use transport::UdpDatagramSocket;

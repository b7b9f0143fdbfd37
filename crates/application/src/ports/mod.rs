mod datagram_socket;
mod host_resolver;
mod nameserver_provider;
mod reactor;

pub use datagram_socket::DatagramSocket;
pub use host_resolver::{HostResolver, LookupOptions};
pub use nameserver_provider::NameserverProvider;
pub use reactor::{Interest, Reactor, ReactorEvent, SocketToken, TimerHandle};

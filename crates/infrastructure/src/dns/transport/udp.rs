//! UDP transport for DNS queries (RFC 1035 §4.2.1)
//!
//! Messages are sent as-is, one datagram per query and one per response.
//! The socket is non-blocking; readiness comes from [`TokioReactor`].
//!
//! [`TokioReactor`]: crate::dns::TokioReactor

use dnslookup_application::ports::{DatagramSocket, SocketToken};
use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::Arc;
use tokio::net::UdpSocket;
use tracing::debug;

/// One lookup's datagram socket, bound to an ephemeral port.
#[derive(Debug, Clone)]
pub struct UdpDatagramSocket {
    socket: Arc<UdpSocket>,
    token: SocketToken,
}

impl UdpDatagramSocket {
    /// Bind a non-blocking socket of the same family as `server`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn open(server: SocketAddr, token: SocketToken) -> io::Result<Self> {
        let (domain, bind_ip) = if server.is_ipv4() {
            (Domain::IPV4, IpAddr::V4(Ipv4Addr::UNSPECIFIED))
        } else {
            (Domain::IPV6, IpAddr::V6(Ipv6Addr::UNSPECIFIED))
        };

        let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
        socket.bind(&SocketAddr::new(bind_ip, 0).into())?;
        socket.set_nonblocking(true)?;

        let std_socket: std::net::UdpSocket = socket.into();
        let socket = UdpSocket::from_std(std_socket)?;

        debug!(server = %server, local = ?socket.local_addr().ok(), "Opened UDP socket");

        Ok(Self {
            socket: Arc::new(socket),
            token,
        })
    }

    /// Shared handle used by the reactor to wait for readiness.
    pub fn handle(&self) -> Arc<UdpSocket> {
        Arc::clone(&self.socket)
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }
}

impl DatagramSocket for UdpDatagramSocket {
    fn token(&self) -> SocketToken {
        self.token
    }

    fn send_to(&self, buf: &[u8], target: SocketAddr) -> io::Result<usize> {
        self.socket.try_send_to(buf, target)
    }

    fn recv_from(&self, buf: &mut [u8]) -> io::Result<(usize, SocketAddr)> {
        self.socket.try_recv_from(buf)
    }
}

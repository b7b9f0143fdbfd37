use super::SocketToken;
use std::io;
use std::net::SocketAddr;

/// Non-blocking datagram socket. Both calls return
/// `io::ErrorKind::WouldBlock` instead of waiting.
pub trait DatagramSocket {
    fn token(&self) -> SocketToken;

    fn send_to(&self, buf: &[u8], target: SocketAddr) -> io::Result<usize>;

    fn recv_from(&self, buf: &mut [u8]) -> io::Result<(usize, SocketAddr)>;
}

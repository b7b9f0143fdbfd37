pub mod udp;

pub use udp::UdpDatagramSocket;

#![allow(dead_code)]
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

/// How the mock answers each query it receives.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// One A record for the queried name.
    Answer(Ipv4Addr),
    /// `CNAME` from the queried name to `target`, then `A` for `target`.
    Cname { target: String, address: Ipv4Addr },
    /// A reply with a different id first, then the real answer.
    WrongIdThenAnswer(Ipv4Addr),
    /// Header claiming one answer that is not there.
    Truncated,
    /// Never reply.
    Silent,
}

pub struct MockDnsServer {
    addr: SocketAddr,
    queries: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    /// Bind on an ephemeral loopback port.
    pub async fn start(behavior: MockBehavior) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind("127.0.0.1:0").await?;
        let addr = socket.local_addr()?;
        let queries = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&queries);

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            counter.fetch_add(1, Ordering::SeqCst);
                            for response in Self::build_responses(&behavior, &buf[..len]) {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            queries,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    pub fn queries_received(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    fn build_responses(behavior: &MockBehavior, query: &[u8]) -> Vec<Vec<u8>> {
        if query.len() < 12 {
            return vec![];
        }

        match behavior {
            MockBehavior::Answer(address) => {
                vec![Self::answer(query, &[Self::a_record_at_question(*address)], 1)]
            }
            MockBehavior::Cname { target, address } => {
                // Header and question as echoed, then the CNAME's fixed fields.
                let target_offset = query.len() + 12;
                let mut cname = vec![0xc0, 0x0c, 0x00, 0x05, 0x00, 0x01, 0x00, 0x00, 0x00, 0x3c];
                let encoded = Self::encode_name(target);
                cname.extend_from_slice(&(encoded.len() as u16).to_be_bytes());
                cname.extend_from_slice(&encoded);

                let mut a = vec![
                    0xc0 | (target_offset >> 8) as u8,
                    (target_offset & 0xff) as u8,
                ];
                a.extend_from_slice(&[0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x00, 0x3c, 0x00, 0x04]);
                a.extend_from_slice(&address.octets());

                vec![Self::answer(query, &[cname, a], 2)]
            }
            MockBehavior::WrongIdThenAnswer(address) => {
                let real = Self::answer(query, &[Self::a_record_at_question(*address)], 1);
                let mut wrong = real.clone();
                wrong[1] = wrong[1].wrapping_add(1);
                vec![wrong, real]
            }
            MockBehavior::Truncated => vec![Self::answer(query, &[], 1)],
            MockBehavior::Silent => vec![],
        }
    }

    fn answer(query: &[u8], records: &[Vec<u8>], ancount: u16) -> Vec<u8> {
        let mut response = Vec::with_capacity(512);

        response.extend_from_slice(&query[0..2]);

        response.push(0x81);
        response.push(0x80);

        response.extend_from_slice(&query[4..6]);

        response.extend_from_slice(&ancount.to_be_bytes());

        response.extend_from_slice(&[0x00, 0x00]);

        response.extend_from_slice(&[0x00, 0x00]);

        response.extend_from_slice(&query[12..]);

        for record in records {
            response.extend_from_slice(record);
        }

        response
    }

    fn a_record_at_question(address: Ipv4Addr) -> Vec<u8> {
        let mut record = vec![
            0xc0, 0x0c,
            0x00, 0x01,
            0x00, 0x01,
            0x00, 0x00, 0x00, 0x3c,
            0x00, 0x04,
        ];
        record.extend_from_slice(&address.octets());
        record
    }

    fn encode_name(name: &str) -> Vec<u8> {
        let mut encoded = Vec::new();
        for label in name.split('.').filter(|l| !l.is_empty()) {
            encoded.push(label.len() as u8);
            encoded.extend_from_slice(label.as_bytes());
        }
        encoded.push(0);
        encoded
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

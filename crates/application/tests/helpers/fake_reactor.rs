#![allow(dead_code)]

use dnslookup_application::ports::{
    DatagramSocket, Interest, NameserverProvider, Reactor, SocketToken, TimerHandle,
};
use std::collections::{HashMap, VecDeque};
use std::io;
use std::net::{IpAddr, SocketAddr};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Records every call the state machine makes; delivers nothing on its own.
#[derive(Default)]
pub struct FakeReactor {
    pub registrations: Vec<(SocketToken, Interest)>,
    pub interests: HashMap<SocketToken, Interest>,
    pub deregistered: Vec<SocketToken>,
    pub scheduled: Vec<(TimerHandle, Duration)>,
    pub cancelled: Vec<TimerHandle>,
    next_timer: u64,
}

impl FakeReactor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn interest(&self, token: SocketToken) -> Option<Interest> {
        self.interests.get(&token).copied()
    }

    pub fn last_timer(&self) -> Option<TimerHandle> {
        self.scheduled.last().map(|(handle, _)| *handle)
    }
}

impl Reactor for FakeReactor {
    fn register(&mut self, token: SocketToken, interest: Interest) {
        self.registrations.push((token, interest));
        self.interests.insert(token, interest);
    }

    fn deregister(&mut self, token: SocketToken) {
        self.deregistered.push(token);
        self.interests.remove(&token);
    }

    fn schedule_after(&mut self, delay: Duration) -> TimerHandle {
        self.next_timer += 1;
        let handle = TimerHandle(self.next_timer);
        self.scheduled.push((handle, delay));
        handle
    }

    fn cancel(&mut self, timer: TimerHandle) {
        self.cancelled.push(timer);
    }
}

#[derive(Default)]
struct SocketState {
    sent: Vec<(Vec<u8>, SocketAddr)>,
    inbound: VecDeque<io::Result<(Vec<u8>, SocketAddr)>>,
    send_error: Option<io::ErrorKind>,
}

/// Socket whose traffic is scripted by the test. Clones share state, so the
/// test keeps a handle after the state machine takes ownership.
#[derive(Clone)]
pub struct FakeSocket {
    token: SocketToken,
    state: Arc<Mutex<SocketState>>,
}

impl FakeSocket {
    pub fn new(token: u64) -> Self {
        Self {
            token: SocketToken(token),
            state: Arc::new(Mutex::new(SocketState::default())),
        }
    }

    pub fn push_datagram(&self, bytes: Vec<u8>, from: SocketAddr) {
        self.state.lock().unwrap().inbound.push_back(Ok((bytes, from)));
    }

    pub fn push_error(&self, kind: io::ErrorKind) {
        self.state
            .lock()
            .unwrap()
            .inbound
            .push_back(Err(io::Error::from(kind)));
    }

    pub fn fail_sends_with(&self, kind: io::ErrorKind) {
        self.state.lock().unwrap().send_error = Some(kind);
    }

    pub fn sent(&self) -> Vec<(Vec<u8>, SocketAddr)> {
        self.state.lock().unwrap().sent.clone()
    }
}

impl DatagramSocket for FakeSocket {
    fn token(&self) -> SocketToken {
        self.token
    }

    fn send_to(&self, buf: &[u8], target: SocketAddr) -> io::Result<usize> {
        let mut state = self.state.lock().unwrap();
        if let Some(kind) = state.send_error {
            return Err(io::Error::from(kind));
        }
        state.sent.push((buf.to_vec(), target));
        Ok(buf.len())
    }

    fn recv_from(&self, buf: &mut [u8]) -> io::Result<(usize, SocketAddr)> {
        let next = self
            .state
            .lock()
            .unwrap()
            .inbound
            .pop_front()
            .unwrap_or_else(|| Err(io::Error::from(io::ErrorKind::WouldBlock)));
        let (bytes, from) = next?;
        buf[..bytes.len()].copy_from_slice(&bytes);
        Ok((bytes.len(), from))
    }
}

pub struct StaticNameservers(pub Vec<IpAddr>);

impl NameserverProvider for StaticNameservers {
    fn nameservers(&self) -> &[IpAddr] {
        &self.0
    }
}

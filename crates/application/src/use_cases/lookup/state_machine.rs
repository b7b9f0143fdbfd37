use super::completion::{Completion, LookupOutcome};
use super::request::LookupRequest;
use crate::ports::{
    DatagramSocket, Interest, NameserverProvider, Reactor, ReactorEvent, SocketToken, TimerHandle,
};
use dnslookup_domain::{next_query_id, DomainError, Message, MAX_DATAGRAM_SIZE};
use std::io;
use std::net::SocketAddr;
use tracing::{debug, trace, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupState {
    Init,
    AwaitingWritable,
    AwaitingResponse,
    Completed,
    TimedOut,
    Failed,
}

impl LookupState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            LookupState::Completed | LookupState::TimedOut | LookupState::Failed
        )
    }
}

/// One query/response exchange over a single non-blocking datagram socket.
///
/// The machine never blocks: it registers interest with the reactor and
/// waits to be handed the matching [`ReactorEvent`]. Every path into a
/// terminal state deregisters the socket, cancels the timer and completes
/// the outcome exactly once.
pub struct LookupStateMachine<S> {
    request: LookupRequest,
    state: LookupState,
    server: Option<SocketAddr>,
    socket: Option<S>,
    query_id: u16,
    query: Vec<u8>,
    timer: Option<TimerHandle>,
    completion: Completion,
}

impl<S: DatagramSocket> LookupStateMachine<S> {
    pub fn new(request: LookupRequest, completion: Completion) -> Self {
        Self {
            request,
            state: LookupState::Init,
            server: None,
            socket: None,
            query_id: 0,
            query: Vec::new(),
            timer: None,
            completion,
        }
    }

    pub fn state(&self) -> LookupState {
        self.state
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// Destination chosen by [`LookupStateMachine::start`].
    pub fn server(&self) -> Option<SocketAddr> {
        self.server
    }

    pub fn query_id(&self) -> u16 {
        self.query_id
    }

    pub fn socket(&self) -> Option<&S> {
        self.socket.as_ref()
    }

    /// Leave `Init`: choose the server, encode the query, open the socket,
    /// ask for write readiness and arm the timeout.
    ///
    /// With no explicit server and an empty nameserver list the lookup fails
    /// with `NoNameservers` before any socket is opened.
    pub fn start<R, F>(&mut self, nameservers: &dyn NameserverProvider, open_socket: F, reactor: &mut R)
    where
        R: Reactor + ?Sized,
        F: FnOnce(SocketAddr) -> io::Result<S>,
    {
        if self.state != LookupState::Init {
            return;
        }

        let server_ip = match self
            .request
            .server
            .or_else(|| nameservers.nameservers().first().copied())
        {
            Some(ip) => ip,
            None => {
                self.finish(LookupState::Failed, Err(DomainError::NoNameservers), reactor);
                return;
            }
        };
        let server = SocketAddr::new(server_ip, self.request.port);
        self.server = Some(server);

        self.query_id = next_query_id();
        self.query = match Message::a_query(&self.request.name, self.query_id).to_wire() {
            Ok(bytes) => bytes,
            Err(e) => {
                self.finish(LookupState::Failed, Err(e), reactor);
                return;
            }
        };

        let socket = match open_socket(server) {
            Ok(socket) => socket,
            Err(e) => {
                self.finish(LookupState::Failed, Err(e.into()), reactor);
                return;
            }
        };

        reactor.register(socket.token(), Interest::Writable);
        self.socket = Some(socket);
        self.state = LookupState::AwaitingWritable;

        // A zero timeout means no deadline.
        if let Some(timeout) = self.request.timeout.filter(|t| !t.is_zero()) {
            self.timer = Some(reactor.schedule_after(timeout));
        }

        debug!(
            name = %self.request.name,
            server = %server,
            query_id = self.query_id,
            timeout_ms = ?self.request.timeout.map(|t| t.as_millis()),
            "DNS lookup started"
        );
    }

    pub fn handle_event<R>(&mut self, event: ReactorEvent, reactor: &mut R)
    where
        R: Reactor + ?Sized,
    {
        match (self.state, event) {
            (
                LookupState::AwaitingWritable,
                ReactorEvent::Ready {
                    token,
                    interest: Interest::Writable,
                },
            ) if self.owns(token) => self.on_writable(token, reactor),
            (
                LookupState::AwaitingResponse,
                ReactorEvent::Ready {
                    token,
                    interest: Interest::Readable,
                },
            ) if self.owns(token) => self.on_readable(token, reactor),
            (
                LookupState::AwaitingWritable | LookupState::AwaitingResponse,
                ReactorEvent::TimerFired(handle),
            ) if self.timer == Some(handle) => self.on_timeout(reactor),
            (state, event) => trace!(?state, ?event, "Ignoring reactor event"),
        }
    }

    fn on_writable<R>(&mut self, token: SocketToken, reactor: &mut R)
    where
        R: Reactor + ?Sized,
    {
        let (Some(socket), Some(server)) = (&self.socket, self.server) else {
            return;
        };

        match socket.send_to(&self.query, server) {
            Ok(bytes_sent) => {
                debug!(server = %server, bytes_sent, "UDP query sent");
                reactor.register(token, Interest::Readable);
                self.state = LookupState::AwaitingResponse;
            }
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => {
                reactor.register(token, Interest::Writable);
            }
            Err(e) => {
                warn!(server = %server, error = %e, "Failed to send UDP query");
                self.finish(LookupState::Failed, Err(e.into()), reactor);
            }
        }
    }

    fn on_readable<R>(&mut self, token: SocketToken, reactor: &mut R)
    where
        R: Reactor + ?Sized,
    {
        let (Some(socket), Some(server)) = (&self.socket, self.server) else {
            return;
        };

        let mut buf = vec![0u8; MAX_DATAGRAM_SIZE];
        let (bytes_received, from) = match socket.recv_from(&mut buf) {
            Ok(received) => received,
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => {
                trace!(server = %server, "Spurious read readiness, re-arming");
                reactor.register(token, Interest::Readable);
                return;
            }
            Err(e) => {
                warn!(server = %server, error = %e, "Failed to receive UDP response");
                self.finish(LookupState::Failed, Err(e.into()), reactor);
                return;
            }
        };
        buf.truncate(bytes_received);

        debug!(server = %server, from = %from, bytes_received, "UDP response received");

        if from.ip() != server.ip() {
            warn!(
                expected = %server,
                received_from = %from,
                "UDP response from unexpected source"
            );
        }

        if bytes_received >= 2 && u16::from_be_bytes([buf[0], buf[1]]) != self.query_id {
            warn!(
                expected = self.query_id,
                received = u16::from_be_bytes([buf[0], buf[1]]),
                "Discarding response with mismatched id"
            );
            reactor.register(token, Interest::Readable);
            return;
        }

        let outcome: LookupOutcome = Message::from_wire(&buf).map(|message| message.answer_names());
        match outcome {
            Ok(answers) => {
                debug!(
                    name = %self.request.name,
                    names = answers.len(),
                    "DNS lookup completed"
                );
                self.finish(LookupState::Completed, Ok(answers), reactor);
            }
            Err(e) => {
                warn!(server = %server, error = %e, "Malformed DNS response");
                self.finish(LookupState::Failed, Err(e), reactor);
            }
        }
    }

    fn on_timeout<R>(&mut self, reactor: &mut R)
    where
        R: Reactor + ?Sized,
    {
        // The timer has fired, so there is nothing left to cancel.
        self.timer = None;
        debug!(name = %self.request.name, server = ?self.server, "DNS lookup timed out");
        self.finish(LookupState::TimedOut, Err(DomainError::QueryTimeout), reactor);
    }

    fn finish<R>(&mut self, state: LookupState, outcome: LookupOutcome, reactor: &mut R)
    where
        R: Reactor + ?Sized,
    {
        if let Some(socket) = self.socket.take() {
            reactor.deregister(socket.token());
        }
        if let Some(timer) = self.timer.take() {
            reactor.cancel(timer);
        }
        self.state = state;
        self.completion.complete(outcome);
    }

    fn owns(&self, token: SocketToken) -> bool {
        self.socket.as_ref().map(|s| s.token()) == Some(token)
    }
}

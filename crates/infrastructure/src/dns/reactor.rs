//! Tokio-backed [`Reactor`] for driving lookup state machines.
//!
//! Registrations and timers are only recorded by the [`Reactor`] calls;
//! [`TokioReactor::next_event`] is the single suspension point that waits for
//! whichever armed readiness or deadline comes first.

use dnslookup_application::ports::{Interest, Reactor, ReactorEvent, SocketToken, TimerHandle};
use std::collections::HashMap;
use std::future;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::time::{sleep_until, Instant};
use tracing::{trace, warn};

#[derive(Default)]
pub struct TokioReactor {
    sockets: HashMap<SocketToken, Arc<UdpSocket>>,
    interests: HashMap<SocketToken, Interest>,
    timers: HashMap<TimerHandle, Instant>,
    next_token: u64,
    next_timer: u64,
}

impl TokioReactor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh token for a socket about to be opened.
    pub fn allocate_token(&mut self) -> SocketToken {
        self.next_token += 1;
        SocketToken(self.next_token)
    }

    /// Make a socket's readiness observable under `token`.
    pub fn attach(&mut self, token: SocketToken, socket: Arc<UdpSocket>) {
        self.sockets.insert(token, socket);
    }

    /// Wait for the next readiness or timer event.
    ///
    /// Returns `None` when nothing is armed. Registrations and timers are
    /// one-shot: the delivered one is disarmed before returning.
    pub async fn next_event(&mut self) -> Option<ReactorEvent> {
        let armed = self.interests.iter().find_map(|(token, interest)| {
            self.sockets
                .get(token)
                .map(|socket| (*token, *interest, Arc::clone(socket)))
        });
        let deadline = self
            .timers
            .iter()
            .min_by_key(|(_, at)| **at)
            .map(|(handle, at)| (*handle, *at));

        if armed.is_none() && deadline.is_none() {
            return None;
        }

        let armed_event = armed.as_ref().map(|(token, interest, _)| (*token, *interest));
        let readiness = async move {
            match armed {
                Some((_, Interest::Writable, socket)) => socket.writable().await,
                Some((_, Interest::Readable, socket)) => socket.readable().await,
                None => future::pending::<io::Result<()>>().await,
            }
        };
        let timer = async move {
            match deadline {
                Some((_, at)) => sleep_until(at).await,
                None => future::pending::<()>().await,
            }
        };

        tokio::select! {
            result = readiness => {
                let (token, interest) = armed_event?;
                if let Err(e) = result {
                    // Surfaced again by the next send or receive attempt.
                    warn!(token = token.0, error = %e, "Socket readiness wait failed");
                }
                self.interests.remove(&token);
                trace!(token = token.0, ?interest, "Socket ready");
                Some(ReactorEvent::Ready { token, interest })
            }
            _ = timer => {
                let (handle, _) = deadline?;
                self.timers.remove(&handle);
                trace!(timer = handle.0, "Timer fired");
                Some(ReactorEvent::TimerFired(handle))
            }
        }
    }
}

impl Reactor for TokioReactor {
    fn register(&mut self, token: SocketToken, interest: Interest) {
        self.interests.insert(token, interest);
    }

    fn deregister(&mut self, token: SocketToken) {
        self.interests.remove(&token);
        self.sockets.remove(&token);
    }

    fn schedule_after(&mut self, delay: Duration) -> TimerHandle {
        self.next_timer += 1;
        let handle = TimerHandle(self.next_timer);
        self.timers.insert(handle, Instant::now() + delay);
        handle
    }

    fn cancel(&mut self, timer: TimerHandle) {
        self.timers.remove(&timer);
    }
}

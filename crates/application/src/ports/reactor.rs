use std::time::Duration;

/// Identifies one registered socket to the reactor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SocketToken(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interest {
    Readable,
    Writable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub u64);

/// What the reactor hands back to whoever it is driving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactorEvent {
    Ready {
        token: SocketToken,
        interest: Interest,
    },
    TimerFired(TimerHandle),
}

/// Readiness and timer capability.
///
/// A registration is one-shot and replaces any earlier registration for the
/// same token. Events for deregistered tokens or cancelled timers must not be
/// delivered.
pub trait Reactor {
    fn register(&mut self, token: SocketToken, interest: Interest);

    fn deregister(&mut self, token: SocketToken);

    fn schedule_after(&mut self, delay: Duration) -> TimerHandle;

    fn cancel(&mut self, timer: TimerHandle);
}

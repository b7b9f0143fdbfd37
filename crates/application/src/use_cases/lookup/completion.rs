use dnslookup_domain::{DomainError, ResolvedAnswers};
use tokio::sync::oneshot;
use tracing::warn;

pub type LookupOutcome = Result<ResolvedAnswers, DomainError>;

/// Sending half of a lookup's single result.
///
/// Only the first call to [`Completion::complete`] delivers anything; later
/// calls are refused and reported.
#[derive(Debug)]
pub struct Completion {
    sender: Option<oneshot::Sender<LookupOutcome>>,
}

impl Completion {
    pub fn channel() -> (Self, oneshot::Receiver<LookupOutcome>) {
        let (sender, receiver) = oneshot::channel();
        (
            Self {
                sender: Some(sender),
            },
            receiver,
        )
    }

    /// Deliver `outcome`. Returns `false` if an outcome was already delivered.
    pub fn complete(&mut self, outcome: LookupOutcome) -> bool {
        match self.sender.take() {
            Some(sender) => {
                // The caller may have stopped waiting; that is not our failure.
                let _ = sender.send(outcome);
                true
            }
            None => {
                warn!("Lookup outcome delivered more than once, dropping the extra result");
                false
            }
        }
    }

    pub fn is_completed(&self) -> bool {
        self.sender.is_none()
    }
}

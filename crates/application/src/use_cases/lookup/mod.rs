mod completion;
mod request;
mod state_machine;

pub use completion::{Completion, LookupOutcome};
pub use request::LookupRequest;
pub use state_machine::{LookupState, LookupStateMachine};

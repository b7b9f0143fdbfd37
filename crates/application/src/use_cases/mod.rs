pub mod lookup;

pub use lookup::{
    Completion, LookupOutcome, LookupRequest, LookupState, LookupStateMachine,
};

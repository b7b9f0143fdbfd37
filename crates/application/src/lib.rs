//! dnslookup application layer: collaborator ports and the lookup use case.
pub mod ports;
pub mod use_cases;

mod builders;

pub use builders::RawMessage;

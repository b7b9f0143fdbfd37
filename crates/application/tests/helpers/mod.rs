mod fake_reactor;

pub use fake_reactor::{FakeReactor, FakeSocket, StaticNameservers};

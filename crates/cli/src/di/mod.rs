mod resolver;

pub use resolver::LookupServices;

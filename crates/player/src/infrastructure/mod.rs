//! Infrastructure adapters implementing the outbound ports.

pub mod http;
pub mod memory;

pub use http::DocumentApiAdapter;
pub use memory::InMemoryStepRepository;

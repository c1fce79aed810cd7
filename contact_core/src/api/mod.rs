//! Outbound HTTP: the contact endpoint and the client it is called with

pub mod http_client;
pub mod transport;

pub use transport::{ContactTransport, HttpTransport};

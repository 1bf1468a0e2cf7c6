// junctionrelay-api: Async Rust client for the JunctionRelay REST API

pub mod client;
pub mod error;
pub mod junctions;
pub mod models;
pub mod transport;

pub use client::{ApiPaths, JunctionClient, DEFAULT_API_PREFIX, DEFAULT_PROBE_PATH};
pub use error::Error;
pub use models::{Junction, JunctionId, JunctionStatus, RejectedEntry, Summary};
pub use transport::{TlsMode, TransportConfig, DEFAULT_TIMEOUT};

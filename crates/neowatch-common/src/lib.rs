//! neowatch-common — Shared error types and the sandboxed HTTP client used across all NeoWatch crates.

pub mod error;
pub mod sandbox;

pub use error::{ApiError, NeoWatchError};
pub use sandbox::SandboxClient;

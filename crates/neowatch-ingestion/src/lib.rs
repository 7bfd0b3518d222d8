//! neowatch-ingestion — Upstream NEO feed access.
//! Raw record models as served by NASA NeoWs, plus the client that fetches them.

pub mod models;
pub mod sources;

pub use models::{NeoFeed, NeoLookup, RawNeoRecord};
pub use sources::NeoSource;

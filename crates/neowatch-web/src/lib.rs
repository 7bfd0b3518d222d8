//! neowatch-web — HTTP API for the NeoWatch dashboard.
//! Provides:
//!   - Date-ranged NEO feed with risk scores
//!   - Risk summary for a date range
//!   - Single-object lookup with the raw upstream record
//!   - Health probe and authenticated identity echo

pub mod auth;
pub mod config;
pub mod extract;
pub mod handlers;
pub mod router;
pub mod service;
pub mod state;
pub mod validate;

//! HTTP handlers for all routes.

pub mod neo;
pub mod system;

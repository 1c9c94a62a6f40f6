//! REST endpoints: ingest, analyze, health and metrics

pub mod handlers;
pub mod router;
pub mod state;

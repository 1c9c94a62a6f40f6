//! API request handlers

mod analyze;
mod health;
mod ingest;

pub use analyze::*;
pub use health::*;
pub use ingest::*;

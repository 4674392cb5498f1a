//! Shared types for the Ardoise till core
//!
//! Passive data models used across the workspace: catalog entities,
//! cart lines, order aggregates, the daily ledger and its report payload.
//! No engine logic lives here; validation and arithmetic belong to
//! `ardoise-core`.

pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};

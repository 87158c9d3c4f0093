// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod api;
pub mod assemble;
pub mod classify;
pub mod config;
pub mod metrics;
pub mod normalize;
pub mod query;
pub mod render;
pub mod search;
pub mod service;

mod devlog;

// ---- Re-exports for stable public API ----
pub use crate::api::{create_router, router, AppState};
pub use crate::assemble::{NormalizedEvent, SortMode};
pub use crate::config::FilterConfig;
pub use crate::service::{EventPage, EventService, SearchParams};

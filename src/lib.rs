// Whiskers - file-backed JSON catalog store and admin API for a pet shop

pub mod activity;
pub mod api;
pub mod blog;
pub mod config;
pub mod error;
pub mod models;
pub mod records;
pub mod seed;
pub mod store;

// Re-export main types for convenience
pub use api::{AppState, router};
pub use config::Config;
pub use error::Error;
pub use records::{Record, now_iso};
pub use store::Store;

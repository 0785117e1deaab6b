pub mod config;
pub mod error;

// Recipe index and query engine
pub mod indexer;

// Outer surfaces
pub mod api;
pub mod cli;

// Utilities
pub mod utils;

// Re-exports
pub use config::Settings;
pub use error::{Error, Result};

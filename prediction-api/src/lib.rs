pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod loader;
pub mod mapping;
pub mod model;
pub mod pages;
pub mod server;
pub mod state;
pub mod store;

// Re-exports for convenience
pub use config::Config;
pub use error::{ApiError, ApiResult, InferenceError, LoadError, StoreError};
pub use state::{AppState, ModelSlot};

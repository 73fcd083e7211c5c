// Module declarations for HTTP handlers
pub mod health;
pub mod index;
pub mod predict;
pub mod ready;

// Re-exports
pub use health::health_handler;
pub use index::index_handler;
pub use predict::{predict_binary_handler, predict_handler};
pub use ready::ready_handler;

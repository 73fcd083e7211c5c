// Module declarations for artifact store abstractions
pub mod client;
pub mod mock;
pub mod traits;

// Re-exports for convenience
pub use client::DatabricksClient;
pub use mock::MockArtifactStore;
pub use traits::ArtifactStore;

// Re-export commonly used items
pub mod error;
pub mod lenient;
pub mod row;
pub mod types;

// Convenience re-exports
pub use error::CommonError;
pub use row::{FeatureRecord, FeatureRow, FeatureValue};
pub use types::{
    ErrorBody, HealthResponse, IncendioInput, IncendioInputWithClass, Label, ModelStatus,
    PredictResponse,
};

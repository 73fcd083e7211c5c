use crate::error::InferenceError;
use common::{FeatureRow, Label};

/// A loaded classification model
///
/// Implementations are immutable once constructed and shared across
/// concurrent requests.
pub trait Predictor: Send + Sync {
    /// Classify a single feature row
    fn predict(&self, row: &FeatureRow) -> Result<Label, InferenceError>;
}

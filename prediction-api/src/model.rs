// Module declarations for the model runtime
pub mod boosted;
pub mod predictor;

pub use boosted::{BoostedModel, ColumnSpec};
pub use predictor::Predictor;

use crate::error::{InferenceError, LoadError};
use crate::model::predictor::Predictor;
use common::{FeatureRow, FeatureValue, Label};
use gbdt::decision_tree::{Data, DataVec};
use gbdt::gradient_boost::GBDT;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Feature value for a category the model never saw during training
pub const UNKNOWN_CATEGORY: f32 = -1.0;

/// One input column of the model, in training-frame order
///
/// Columns with `categories` are label-encoded: the value's position in the
/// list becomes the feature value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
}

/// On-the-wire layout of the model artifact
#[derive(Deserialize)]
struct Artifact {
    #[serde(default)]
    name: Option<String>,
    columns: Vec<ColumnSpec>,
    #[serde(default)]
    labels: Vec<Label>,
    model: GBDT,
}

/// Gradient-boosted classifier loaded from the model artifact
///
/// The ensemble scores a row; the score rounded to the nearest integer is
/// the class index, renamed through `labels` when the artifact carries them.
pub struct BoostedModel {
    name: Option<String>,
    columns: Vec<ColumnSpec>,
    labels: Vec<Label>,
    model: GBDT,
}

impl BoostedModel {
    /// Deserialize the artifact and check the model can score a row
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LoadError> {
        let artifact: Artifact = serde_json::from_slice(bytes)?;

        let model = Self {
            name: artifact.name,
            columns: artifact.columns,
            labels: artifact.labels,
            model: artifact.model,
        };
        model.validate()?;

        Ok(model)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    fn validate(&self) -> Result<(), LoadError> {
        if self.columns.is_empty() {
            return Err(LoadError::InvalidModel("artifact declares no columns".to_string()));
        }

        let mut seen = HashSet::new();
        for column in &self.columns {
            if column.name.is_empty() {
                return Err(LoadError::InvalidModel("empty column name".to_string()));
            }
            if !seen.insert(column.name.as_str()) {
                return Err(LoadError::InvalidModel(format!(
                    "duplicate column '{}'",
                    column.name
                )));
            }
        }

        // A model trained on more features than declared panics on lookup.
        self.score(vec![0.0; self.columns.len()]).map_err(|e| {
            LoadError::InvalidModel(format!(
                "cannot score a row of {} columns: {}",
                self.columns.len(),
                e
            ))
        })?;

        Ok(())
    }

    /// Lay the row out as the model's feature vector
    fn encode(&self, row: &FeatureRow) -> Result<Vec<f32>, InferenceError> {
        self.columns
            .iter()
            .map(|column| {
                let value = row
                    .get(&column.name)
                    .ok_or_else(|| InferenceError::MissingColumn(column.name.clone()))?;
                encode_value(column, value)
            })
            .collect()
    }

    fn score(&self, features: Vec<f32>) -> Result<f32, InferenceError> {
        let data: DataVec = vec![Data::new_test_data(features, None)];

        let scores = catch_unwind(AssertUnwindSafe(|| self.model.predict(&data)))
            .map_err(|_| InferenceError::Malformed("model panicked while scoring".to_string()))?;

        match scores.first() {
            Some(score) if score.is_finite() => Ok(*score),
            Some(score) => Err(InferenceError::Malformed(format!(
                "non-finite score {}",
                score
            ))),
            None => Err(InferenceError::Malformed("model returned no score".to_string())),
        }
    }

    fn decode(&self, score: f32) -> Label {
        let index = score.round() as i64;
        usize::try_from(index)
            .ok()
            .and_then(|i| self.labels.get(i))
            .cloned()
            .unwrap_or(Label::Integer(index))
    }
}

fn encode_value(column: &ColumnSpec, value: &FeatureValue) -> Result<f32, InferenceError> {
    if column.categories.is_empty() {
        return value
            .as_f64()
            .map(|v| v as f32)
            .ok_or_else(|| InferenceError::TypeMismatch {
                column: column.name.clone(),
                expected: "numeric",
            });
    }

    let key = value.as_category();
    Ok(column
        .categories
        .iter()
        .position(|category| *category == key)
        .map_or(UNKNOWN_CATEGORY, |i| i as f32))
}

impl Predictor for BoostedModel {
    fn predict(&self, row: &FeatureRow) -> Result<Label, InferenceError> {
        let features = self.encode(row)?;
        let score = self.score(features)?;
        tracing::trace!("Model score: {}", score);
        Ok(self.decode(score))
    }
}

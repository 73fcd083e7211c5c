use crate::model::Predictor;
use common::ModelStatus;
use std::sync::{Arc, OnceLock};

/// Result of the startup load, published exactly once
#[derive(Clone)]
pub enum LoadOutcome {
    Ready(Arc<dyn Predictor>),
    Failed(String),
}

/// Write-once holder of the model and its status
///
/// Status reads `loading` until the loader publishes an outcome.
#[derive(Default)]
pub struct ModelSlot {
    outcome: OnceLock<LoadOutcome>,
}

impl ModelSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot that already holds a ready model
    pub fn ready(model: Arc<dyn Predictor>) -> Self {
        let slot = Self::new();
        slot.publish(LoadOutcome::Ready(model));
        slot
    }

    /// Slot whose load already failed
    pub fn failed(reason: impl Into<String>) -> Self {
        let slot = Self::new();
        slot.publish(LoadOutcome::Failed(reason.into()));
        slot
    }

    /// Record the load outcome; returns false if one was already recorded
    pub fn publish(&self, outcome: LoadOutcome) -> bool {
        let accepted = self.outcome.set(outcome).is_ok();
        if !accepted {
            tracing::warn!("Model outcome already published, ignoring update");
        }
        accepted
    }

    pub fn status(&self) -> ModelStatus {
        match self.outcome.get() {
            None => ModelStatus::Loading,
            Some(LoadOutcome::Ready(_)) => ModelStatus::Ok,
            Some(LoadOutcome::Failed(_)) => ModelStatus::Failed,
        }
    }

    /// The model, only when status is `ok`
    pub fn model(&self) -> Option<Arc<dyn Predictor>> {
        match self.outcome.get() {
            Some(LoadOutcome::Ready(model)) => Some(Arc::clone(model)),
            _ => None,
        }
    }

    pub fn failure_reason(&self) -> Option<&str> {
        match self.outcome.get() {
            Some(LoadOutcome::Failed(reason)) => Some(reason),
            _ => None,
        }
    }
}

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub slot: Arc<ModelSlot>,
}

impl AppState {
    pub fn new(slot: Arc<ModelSlot>) -> Self {
        Self { slot }
    }
}

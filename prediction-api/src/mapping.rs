use crate::error::InferenceError;
use common::{Label, PredictResponse};

/// Category names keyed by raw model output
pub const CATEGORY_LABELS: [(&str, &str); 3] = [("0", "Conato"), ("1", "Incendio"), ("2", "GIF")];

pub const CATEGORY_MESSAGE: &str = "Predicción procesada correctamente";
pub const DANGEROUS_MESSAGE: &str = "Incendio Peligroso";
pub const CONTROLLABLE_MESSAGE: &str = "Incendio Controlable";

/// How a raw model label becomes a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputPolicy {
    /// Integer label, `1` means dangerous
    Binary,
    /// Label renamed through [`CATEGORY_LABELS`], raw value when unmapped
    Category,
}

impl OutputPolicy {
    pub fn apply(self, label: Label) -> Result<PredictResponse, InferenceError> {
        match self {
            OutputPolicy::Binary => {
                let value = label
                    .as_integer()
                    .map_err(|e| InferenceError::Label(e.to_string()))?;
                let mensaje = if value == 1 {
                    DANGEROUS_MESSAGE
                } else {
                    CONTROLLABLE_MESSAGE
                };
                Ok(PredictResponse {
                    prediccion: Label::Integer(value),
                    mensaje: mensaje.to_string(),
                })
            }
            OutputPolicy::Category => {
                let raw = label.to_string();
                let name = CATEGORY_LABELS
                    .iter()
                    .find(|(key, _)| *key == raw)
                    .map(|(_, name)| name.to_string())
                    .unwrap_or(raw);
                Ok(PredictResponse {
                    prediccion: Label::Text(name),
                    mensaje: CATEGORY_MESSAGE.to_string(),
                })
            }
        }
    }
}

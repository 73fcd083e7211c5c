use crate::error::CommonError;
use crate::lenient;
use crate::row::{FeatureRecord, FeatureRow};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Readiness of the predictive model, published once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelStatus {
    Loading,
    Ok,
    Failed,
}

impl ModelStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelStatus::Loading => "loading",
            ModelStatus::Ok => "ok",
            ModelStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for ModelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wildfire incident features accepted by `/predict`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncendioInput {
    #[serde(deserialize_with = "lenient::integer")]
    pub numeromediospersonal: i64,
    #[serde(deserialize_with = "lenient::float")]
    pub latitud: f64,
    #[serde(deserialize_with = "lenient::float")]
    pub longitud: f64,
    #[serde(deserialize_with = "lenient::float")]
    pub altitud: f64,
    #[serde(deserialize_with = "lenient::integer")]
    pub anio: i64,
    #[serde(deserialize_with = "lenient::float")]
    pub velocidadviento: f64,
    #[serde(deserialize_with = "lenient::integer")]
    pub numeromediospesados: i64,
    #[serde(deserialize_with = "lenient::float")]
    pub humrelativa: f64,
    #[serde(deserialize_with = "lenient::float")]
    pub tempmaxima: f64,
    #[serde(deserialize_with = "lenient::float")]
    pub diasultimalluvia: f64,
    #[serde(deserialize_with = "lenient::integer")]
    pub idprovincia: i64,
    #[serde(deserialize_with = "lenient::float")]
    pub probabilidadignicion: f64,
    #[serde(deserialize_with = "lenient::integer")]
    pub idcomunidad: i64,
    #[serde(deserialize_with = "lenient::integer")]
    pub numeromediosaereos: i64,
    pub iddetectadopor: String,
    #[serde(deserialize_with = "lenient::float")]
    pub idpeligro: f64,
    pub tipodeataque: String,
    pub combustible: String,
    pub horadeteccion: String,
}

/// Incident features including the fire class, accepted by `/v1/predict`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncendioInputWithClass {
    pub claseincendio: String,
    #[serde(deserialize_with = "lenient::integer")]
    pub numeromediospersonal: i64,
    #[serde(deserialize_with = "lenient::float")]
    pub latitud: f64,
    #[serde(deserialize_with = "lenient::float")]
    pub longitud: f64,
    #[serde(deserialize_with = "lenient::float")]
    pub altitud: f64,
    #[serde(deserialize_with = "lenient::integer")]
    pub anio: i64,
    #[serde(deserialize_with = "lenient::float")]
    pub velocidadviento: f64,
    #[serde(deserialize_with = "lenient::integer")]
    pub numeromediospesados: i64,
    #[serde(deserialize_with = "lenient::float")]
    pub humrelativa: f64,
    #[serde(deserialize_with = "lenient::float")]
    pub tempmaxima: f64,
    #[serde(deserialize_with = "lenient::float")]
    pub diasultimalluvia: f64,
    #[serde(deserialize_with = "lenient::integer")]
    pub idprovincia: i64,
    #[serde(deserialize_with = "lenient::float")]
    pub probabilidadignicion: f64,
    #[serde(deserialize_with = "lenient::integer")]
    pub idcomunidad: i64,
    #[serde(deserialize_with = "lenient::integer")]
    pub numeromediosaereos: i64,
    pub iddetectadopor: String,
    #[serde(deserialize_with = "lenient::float")]
    pub idpeligro: f64,
    pub tipodeataque: String,
    pub combustible: String,
    pub horadeteccion: String,
}

// Columns are emitted in field declaration order.
macro_rules! impl_feature_record {
    ($ty:ty { $($field:ident),+ $(,)? }) => {
        impl FeatureRecord for $ty {
            fn to_row(&self) -> Result<FeatureRow, CommonError> {
                let mut row = FeatureRow::with_capacity([$(stringify!($field)),+].len());
                $( row.push(stringify!($field), self.$field.clone())?; )+
                Ok(row)
            }
        }
    };
}

impl_feature_record!(IncendioInput {
    numeromediospersonal,
    latitud,
    longitud,
    altitud,
    anio,
    velocidadviento,
    numeromediospesados,
    humrelativa,
    tempmaxima,
    diasultimalluvia,
    idprovincia,
    probabilidadignicion,
    idcomunidad,
    numeromediosaereos,
    iddetectadopor,
    idpeligro,
    tipodeataque,
    combustible,
    horadeteccion,
});

impl_feature_record!(IncendioInputWithClass {
    claseincendio,
    numeromediospersonal,
    latitud,
    longitud,
    altitud,
    anio,
    velocidadviento,
    numeromediospesados,
    humrelativa,
    tempmaxima,
    diasultimalluvia,
    idprovincia,
    probabilidadignicion,
    idcomunidad,
    numeromediosaereos,
    iddetectadopor,
    idpeligro,
    tipodeataque,
    combustible,
    horadeteccion,
});

/// Class label produced by the model
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    Integer(i64),
    Text(String),
}

impl Label {
    /// Integer reading of the label; numeric strings are accepted
    pub fn as_integer(&self) -> Result<i64, CommonError> {
        match self {
            Label::Integer(v) => Ok(*v),
            Label::Text(s) => s.trim().parse().map_err(|_| {
                CommonError::InvalidData(format!("label '{}' is not an integer", s))
            }),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Integer(v) => write!(f, "{}", v),
            Label::Text(s) => f.write_str(s),
        }
    }
}

/// Successful prediction response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    pub prediccion: Label,
    pub mensaje: String,
}

/// Body of `/health`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: ModelStatus,
}

/// Error body shared by every failing route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

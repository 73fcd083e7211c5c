use crate::error::{ApiError, ApiResult, InferenceError};
use crate::extract::ValidatedJson;
use crate::mapping::OutputPolicy;
use crate::model::Predictor;
use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use common::{FeatureRecord, IncendioInput, IncendioInputWithClass, PredictResponse};

/// Predict handler - category variant
///
/// Process:
/// 1. Refuse with 500 unless the model is loaded, before looking at the body
/// 2. Validate the body against the input schema (400 on failure)
/// 3. Lay the record out as a single feature row and run the model
/// 4. Rename the label through the category table
#[axum::debug_handler]
pub async fn predict_handler(
    State(state): State<AppState>,
    payload: Result<ValidatedJson<IncendioInput>, ApiError>,
) -> ApiResult<Json<PredictResponse>> {
    run_prediction(&state, payload, OutputPolicy::Category)
}

/// Predict handler - binary variant, input includes `claseincendio`
#[axum::debug_handler]
pub async fn predict_binary_handler(
    State(state): State<AppState>,
    payload: Result<ValidatedJson<IncendioInputWithClass>, ApiError>,
) -> ApiResult<Json<PredictResponse>> {
    run_prediction(&state, payload, OutputPolicy::Binary)
}

fn run_prediction<R: FeatureRecord>(
    state: &AppState,
    payload: Result<ValidatedJson<R>, ApiError>,
    policy: OutputPolicy,
) -> ApiResult<Json<PredictResponse>> {
    let model = state.slot.model().ok_or(ApiError::ModelUnavailable)?;
    let ValidatedJson(record) = payload?;

    let response = predict_record(model.as_ref(), &record, policy)?;
    tracing::debug!("Prediction: {:?}", response.prediccion);

    Ok(Json(response))
}

/// Row construction, inference and output mapping for one record
pub fn predict_record<R: FeatureRecord>(
    model: &dyn Predictor,
    record: &R,
    policy: OutputPolicy,
) -> Result<PredictResponse, InferenceError> {
    let row = record.to_row()?;
    let label = model.predict(&row)?;
    policy.apply(label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ModelSlot;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use common::{FeatureRow, Label};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Returns a fixed label and counts calls
    struct FakeModel {
        label: Label,
        calls: AtomicUsize,
    }

    impl FakeModel {
        fn new(label: Label) -> Arc<Self> {
            Arc::new(Self {
                label,
                calls: AtomicUsize::new(0),
            })
        }
    }

    impl Predictor for FakeModel {
        fn predict(&self, row: &FeatureRow) -> Result<Label, InferenceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if row.get("tempmaxima").is_none() {
                return Err(InferenceError::MissingColumn("tempmaxima".to_string()));
            }
            Ok(self.label.clone())
        }
    }

    fn input() -> IncendioInput {
        IncendioInput {
            numeromediospersonal: 12,
            latitud: 40.41,
            longitud: -3.70,
            altitud: 650.0,
            anio: 2015,
            velocidadviento: 18.5,
            numeromediospesados: 2,
            humrelativa: 15.0,
            tempmaxima: 35.2,
            diasultimalluvia: 21.0,
            idprovincia: 28,
            probabilidadignicion: 70.0,
            idcomunidad: 13,
            numeromediosaereos: 1,
            iddetectadopor: "particular".to_string(),
            idpeligro: 3.0,
            tipodeataque: "directo".to_string(),
            combustible: "pasto".to_string(),
            horadeteccion: "14:30".to_string(),
        }
    }

    fn input_with_class() -> IncendioInputWithClass {
        let i = input();
        IncendioInputWithClass {
            claseincendio: "forestal".to_string(),
            numeromediospersonal: i.numeromediospersonal,
            latitud: i.latitud,
            longitud: i.longitud,
            altitud: i.altitud,
            anio: i.anio,
            velocidadviento: i.velocidadviento,
            numeromediospesados: i.numeromediospesados,
            humrelativa: i.humrelativa,
            tempmaxima: i.tempmaxima,
            diasultimalluvia: i.diasultimalluvia,
            idprovincia: i.idprovincia,
            probabilidadignicion: i.probabilidadignicion,
            idcomunidad: i.idcomunidad,
            numeromediosaereos: i.numeromediosaereos,
            iddetectadopor: i.iddetectadopor,
            idpeligro: i.idpeligro,
            tipodeataque: i.tipodeataque,
            combustible: i.combustible,
            horadeteccion: i.horadeteccion,
        }
    }

    #[tokio::test]
    async fn test_predict_handler_maps_category() {
        let model = FakeModel::new(Label::Integer(1));
        let state = AppState::new(Arc::new(ModelSlot::ready(model.clone())));

        let result = predict_handler(State(state), Ok(ValidatedJson(input()))).await;

        let response = result.unwrap();
        assert_eq!(response.prediccion, Label::Text("Incendio".to_string()));
        assert_eq!(response.mensaje, "Predicción procesada correctamente");
        assert_eq!(model.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_predict_handler_unmapped_label_passes_through() {
        let model = FakeModel::new(Label::Text("GIF".to_string()));
        let state = AppState::new(Arc::new(ModelSlot::ready(model)));

        let response = predict_handler(State(state), Ok(ValidatedJson(input())))
            .await
            .unwrap();

        assert_eq!(response.prediccion, Label::Text("GIF".to_string()));
    }

    #[tokio::test]
    async fn test_predict_binary_handler() {
        let model = FakeModel::new(Label::Integer(1));
        let state = AppState::new(Arc::new(ModelSlot::ready(model)));

        let response = predict_binary_handler(State(state), Ok(ValidatedJson(input_with_class())))
            .await
            .unwrap();

        assert_eq!(response.prediccion, Label::Integer(1));
        assert_eq!(response.mensaje, "Incendio Peligroso");
    }

    #[tokio::test]
    async fn test_predict_handler_model_loading() {
        let state = AppState::new(Arc::new(ModelSlot::new()));

        let result = predict_handler(State(state), Ok(ValidatedJson(input()))).await;

        match result {
            Err(ApiError::ModelUnavailable) => {}
            other => panic!("Expected ModelUnavailable, got {:?}", other.map(|r| r.0)),
        }
    }

    #[tokio::test]
    async fn test_predict_handler_unavailable_wins_over_invalid_body() {
        let state = AppState::new(Arc::new(ModelSlot::failed("no credentials")));
        let payload = Err(ApiError::Validation("missing field `latitud`".to_string()));

        let err = predict_handler(State(state), payload).await.unwrap_err();

        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_predict_handler_invalid_body_skips_model() {
        let model = FakeModel::new(Label::Integer(0));
        let state = AppState::new(Arc::new(ModelSlot::ready(model.clone())));
        let payload = Err(ApiError::Validation("missing field `latitud`".to_string()));

        let err = predict_handler(State(state), payload).await.unwrap_err();

        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_predict_record_inference_error() {
        struct EmptyRecord;
        impl FeatureRecord for EmptyRecord {
            fn to_row(&self) -> Result<FeatureRow, common::CommonError> {
                Ok(FeatureRow::new())
            }
        }

        let model = FakeModel::new(Label::Integer(1));
        let err = predict_record(model.as_ref(), &EmptyRecord, OutputPolicy::Category).unwrap_err();

        assert_eq!(err, InferenceError::MissingColumn("tempmaxima".to_string()));
        assert!(err.is_client_error());
    }
}

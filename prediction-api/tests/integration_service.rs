/// End-to-end tests: startup load from a fake artifact store, then requests
/// over a real socket
use common::{ErrorBody, HealthResponse, ModelStatus, PredictResponse};
use prediction_api::{loader, server, AppState, Config, ModelSlot};
use serde_json::{json, Value};
use std::sync::Arc;
use test_utils::{
    model_artifact, incendio_payload, incendio_payload_with_class, local_listener, FakeFilesApi,
    MODEL_PATH, TEST_TOKEN,
};

/// Run the loader to completion, then serve; returns the service base URL
async fn start_service(config: Config) -> String {
    let slot = Arc::new(ModelSlot::new());
    loader::initialize(&config, &slot).await;

    let (listener, url) = local_listener().await.unwrap();
    let app = server::build_router(AppState::new(slot));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    url
}

fn config(host: Option<&str>) -> Config {
    Config {
        port: 0,
        databricks_host: host.map(str::to_string),
        databricks_token: Some(TEST_TOKEN.to_string()),
        model_path: MODEL_PATH.to_string(),
        download_timeout_secs: 5,
        log_level: "info".to_string(),
    }
}

#[tokio::test]
async fn test_predict_after_successful_load() {
    let api = FakeFilesApi::with_file(MODEL_PATH, model_artifact())
        .await
        .unwrap();
    let url = start_service(config(Some(api.base_url()))).await;
    let client = reqwest::Client::new();

    let health: HealthResponse = client
        .get(format!("{}/health", url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health.status, ModelStatus::Ok);

    let response = client
        .post(format!("{}/predict", url))
        .json(&incendio_payload())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({"prediccion": "Incendio", "mensaje": "Predicción procesada correctamente"})
    );
}

#[tokio::test]
async fn test_predict_is_idempotent() {
    let api = FakeFilesApi::with_file(MODEL_PATH, model_artifact())
        .await
        .unwrap();
    let url = start_service(config(Some(api.base_url()))).await;
    let client = reqwest::Client::new();

    let mut payload = incendio_payload();
    payload["tempmaxima"] = json!(22.0);
    payload["iddetectadopor"] = json!("agente");

    let mut predictions = Vec::new();
    for _ in 0..2 {
        let body: PredictResponse = client
            .post(format!("{}/predict", url))
            .json(&payload)
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        predictions.push(body.prediccion);
    }

    assert_eq!(predictions[0], predictions[1]);
}

#[tokio::test]
async fn test_binary_variant_after_successful_load() {
    let api = FakeFilesApi::with_file(MODEL_PATH, model_artifact())
        .await
        .unwrap();
    let url = start_service(config(Some(api.base_url()))).await;

    let body: Value = reqwest::Client::new()
        .post(format!("{}/v1/predict", url))
        .json(&incendio_payload_with_class())
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["prediccion"], 1);
    assert_eq!(body["mensaje"], "Incendio Peligroso");
}

#[tokio::test]
async fn test_missing_credentials_keeps_serving() {
    let url = start_service(config(None)).await;
    let client = reqwest::Client::new();

    let response = client.get(format!("{}/health", url)).send().await.unwrap();
    assert_eq!(response.status(), 200);
    let health: HealthResponse = response.json().await.unwrap();
    assert_eq!(health.status, ModelStatus::Failed);

    let response = client
        .get(format!("{}/ready", url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 503);

    let response = client
        .post(format!("{}/predict", url))
        .json(&incendio_payload())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 500);
    let body: ErrorBody = response.json().await.unwrap();
    assert_eq!(
        body.detail,
        "El modelo no se ha cargado correctamente desde Databricks."
    );
}

#[tokio::test]
async fn test_invalid_payload_is_client_error() {
    let api = FakeFilesApi::with_file(MODEL_PATH, model_artifact())
        .await
        .unwrap();
    let url = start_service(config(Some(api.base_url()))).await;

    let mut payload = incendio_payload();
    payload["idprovincia"] = json!("Madrid");

    let response = reqwest::Client::new()
        .post(format!("{}/predict", url))
        .json(&payload)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: ErrorBody = response.json().await.unwrap();
    assert!(!body.detail.is_empty());
}

//! Test utilities for integration tests
//! Serves a fake artifact store and provides request fixtures

use anyhow::{Context, Result};
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use gbdt::config::Config;
use gbdt::decision_tree::{Data, DataVec};
use gbdt::gradient_boost::GBDT;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub const TEST_TOKEN: &str = "dapi-test-token";
pub const MODEL_PATH: &str = "/Volumes/workspace/default/prediccion_incendios/modelo.json";

/// In-process stand-in for the Databricks Files API
///
/// Answers `GET /api/2.0/fs/files/{path}` with the registered bytes when the
/// bearer token matches, 401 otherwise, 404 for unknown paths.
pub struct FakeFilesApi {
    base_url: String,
    handle: JoinHandle<()>,
}

#[derive(Clone)]
struct FakeState {
    token: String,
    files: Arc<HashMap<String, Vec<u8>>>,
}

impl FakeFilesApi {
    /// Start the server on an ephemeral local port
    pub async fn start(token: &str, files: HashMap<String, Vec<u8>>) -> Result<Self> {
        let state = FakeState {
            token: token.to_string(),
            files: Arc::new(files),
        };

        let app = Router::new()
            .route("/api/2.0/fs/files/*path", get(serve_file))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .context("Failed to bind fake Files API")?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            base_url: format!("http://{}", addr),
            handle,
        })
    }

    /// Start the server with a single file at `path`
    pub async fn with_file(path: &str, bytes: Vec<u8>) -> Result<Self> {
        let mut files = HashMap::new();
        files.insert(path.to_string(), bytes);
        Self::start(TEST_TOKEN, files).await
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Drop for FakeFilesApi {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn serve_file(
    State(state): State<FakeState>,
    Path(path): Path<String>,
    headers: HeaderMap,
) -> Response {
    let expected = format!("Bearer {}", state.token);
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == expected);

    if !authorized {
        return (StatusCode::UNAUTHORIZED, "invalid token").into_response();
    }

    match state.files.get(&format!("/{}", path)) {
        Some(bytes) => (StatusCode::OK, bytes.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, "file not found").into_response(),
    }
}

/// Detector categories, label-encoded in this order
pub const DETECTORS: [&str; 3] = ["particular", "agente", "vigilante"];

/// Small regression ensemble over `[tempmaxima, iddetectadopor, humrelativa]`
///
/// Trained on points where the class is `1` above 30 degrees and `0` below,
/// so [`incendio_payload`] scores as `1`.
pub fn trained_model() -> GBDT {
    let mut cfg = Config::new();
    cfg.set_feature_size(3);
    cfg.set_max_depth(3);
    cfg.set_iterations(40);
    cfg.set_shrinkage(0.3);
    cfg.set_loss("SquaredError");
    cfg.set_debug(false);
    cfg.set_training_optimization_level(2);

    let samples: [(f32, f32, f32, f32); 12] = [
        (10.0, 0.0, 60.0, 0.0),
        (15.0, 1.0, 55.0, 0.0),
        (18.0, 2.0, 45.0, 0.0),
        (22.0, 0.0, 40.0, 0.0),
        (25.0, 1.0, 35.0, 0.0),
        (28.0, 2.0, 30.0, 0.0),
        (32.0, 0.0, 25.0, 1.0),
        (34.0, 1.0, 20.0, 1.0),
        (36.0, 2.0, 15.0, 1.0),
        (38.0, 0.0, 12.0, 1.0),
        (40.0, 1.0, 10.0, 1.0),
        (42.0, 2.0, 8.0, 1.0),
    ];

    let mut data: DataVec = samples
        .iter()
        .map(|&(temp, detector, humidity, label)| {
            Data::new_training_data(vec![temp, detector, humidity], 1.0, label, None)
        })
        .collect();

    let mut model = GBDT::new(&cfg);
    model.fit(&mut data);
    model
}

/// Serialized model artifact wrapping [`trained_model`]
pub fn model_artifact() -> Vec<u8> {
    let model = serde_json::to_value(trained_model()).expect("Failed to serialize model");

    json!({
        "name": "modelo_incendios_gbdt",
        "columns": [
            {"name": "tempmaxima"},
            {"name": "iddetectadopor", "categories": DETECTORS},
            {"name": "humrelativa"}
        ],
        "model": model
    })
    .to_string()
    .into_bytes()
}

/// Valid body for `/predict`
pub fn incendio_payload() -> Value {
    json!({
        "numeromediospersonal": 12,
        "latitud": 40.41,
        "longitud": -3.70,
        "altitud": 650.0,
        "anio": 2015,
        "velocidadviento": 18.5,
        "numeromediospesados": 2,
        "humrelativa": 15.0,
        "tempmaxima": 35.2,
        "diasultimalluvia": 21.0,
        "idprovincia": 28,
        "probabilidadignicion": 70.0,
        "idcomunidad": 13,
        "numeromediosaereos": 1,
        "iddetectadopor": "particular",
        "idpeligro": 3.0,
        "tipodeataque": "directo",
        "combustible": "pasto",
        "horadeteccion": "14:30"
    })
}

/// Valid body for `/v1/predict`
pub fn incendio_payload_with_class() -> Value {
    let mut payload = incendio_payload();
    payload["claseincendio"] = json!("forestal");
    payload
}

/// Bind an ephemeral local port and return the listener with its base URL
pub async fn local_listener() -> Result<(TcpListener, String)> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .context("Failed to bind local listener")?;
    let url = format!("http://{}", listener.local_addr()?);
    Ok((listener, url))
}

use crate::config::Config;
use crate::error::LoadError;
use crate::model::BoostedModel;
use crate::state::{LoadOutcome, ModelSlot};
use crate::store::{ArtifactStore, DatabricksClient};
use common::ModelStatus;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Startup loader
///
/// Runs once. Every failure is recorded in the slot as `failed` and never
/// propagated: the process keeps serving and reports the status through
/// `/health`. There are no retries.
pub async fn initialize(config: &Config, slot: &ModelSlot) -> ModelStatus {
    let store = match connect(config) {
        Ok(store) => store,
        Err(e) => return record_failure(slot, e),
    };

    load_into(&store, &config.model_path, slot).await
}

/// Start [`initialize`] in the background
pub fn spawn(config: Config, slot: Arc<ModelSlot>) -> JoinHandle<ModelStatus> {
    let load_slot = Arc::clone(&slot);
    supervise(slot, async move { initialize(&config, &load_slot).await })
}

/// Run `load` on its own task; if it panics or is cancelled, mark the slot
/// failed so the status cannot stay at `loading`
pub fn supervise<F>(slot: Arc<ModelSlot>, load: F) -> JoinHandle<ModelStatus>
where
    F: Future<Output = ModelStatus> + Send + 'static,
{
    tokio::spawn(async move {
        let status = match tokio::spawn(load).await {
            Ok(status) => status,
            Err(e) => {
                tracing::error!("Model loader task failed: {}", e);
                slot.publish(LoadOutcome::Failed(format!("loader task failed: {}", e)));
                slot.status()
            }
        };
        tracing::info!("Model status: {}", status);
        status
    })
}

/// Download and deserialize the model from `store`, publishing the outcome
pub async fn load_into(store: &dyn ArtifactStore, path: &str, slot: &ModelSlot) -> ModelStatus {
    match load_model(store, path).await {
        Ok(model) => {
            tracing::info!(
                "Model {} loaded successfully ({} columns)",
                model.name().unwrap_or("<unnamed>"),
                model.columns().len()
            );
            slot.publish(LoadOutcome::Ready(Arc::new(model)));
            slot.status()
        }
        Err(e) => record_failure(slot, e),
    }
}

/// Fetch the artifact at `path` and turn it into a model
pub async fn load_model(store: &dyn ArtifactStore, path: &str) -> Result<BoostedModel, LoadError> {
    tracing::info!("Downloading model from {}", path);
    let bytes = store.download(path).await?;

    if bytes.is_empty() {
        return Err(LoadError::EmptyArtifact(path.to_string()));
    }

    tracing::info!("Downloaded {} bytes, deserializing model", bytes.len());
    BoostedModel::from_bytes(&bytes)
}

/// Build the artifact store client from configured credentials
fn connect(config: &Config) -> Result<DatabricksClient, LoadError> {
    let (host, token) = match (&config.databricks_host, &config.databricks_token) {
        (Some(host), Some(token)) => (host, token),
        (host, token) => {
            let missing: Vec<&str> = [
                host.is_none().then_some("DATABRICKS_HOST"),
                token.is_none().then_some("DATABRICKS_TOKEN"),
            ]
            .into_iter()
            .flatten()
            .collect();
            return Err(LoadError::MissingCredentials(missing.join(", ")));
        }
    };

    let client = DatabricksClient::new(
        host,
        token,
        Duration::from_secs(config.download_timeout_secs),
    )?;
    tracing::info!("Connecting to artifact store at {}", client.host());

    Ok(client)
}

fn record_failure(slot: &ModelSlot, err: LoadError) -> ModelStatus {
    tracing::error!("Error loading model: {}", err);
    slot.publish(LoadOutcome::Failed(err.to_string()));
    slot.status()
}

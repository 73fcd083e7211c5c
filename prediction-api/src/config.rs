use std::env;

pub const DEFAULT_MODEL_PATH: &str =
    "/Volumes/workspace/default/prediccion_incendios/modelo_incendios_rf.pkl";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub databricks_host: Option<String>,
    pub databricks_token: Option<String>,
    pub model_path: String,
    pub download_timeout_secs: u64,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            databricks_host: non_empty_var("DATABRICKS_HOST"),
            databricks_token: non_empty_var("DATABRICKS_TOKEN"),
            model_path: env::var("MODEL_PATH").unwrap_or_else(|_| DEFAULT_MODEL_PATH.to_string()),
            download_timeout_secs: env::var("DOWNLOAD_TIMEOUT_SECS")
                .unwrap_or_else(|_| "60".to_string())
                .parse()?,
            log_level: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

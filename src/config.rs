use anyhow::{Context, Result};
use compute::{CurrentConditions, DemandPredictor, LogisticModel};
use ::config::{Config, Environment, File};
use moka::future::Cache;
use sea_orm::Database;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::schemas::AppState;

/// Service settings, layered from defaults, an optional TOML file and
/// `NYANYA__*` environment variables (e.g. `NYANYA__CACHE_TTL_SECS=60`).
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database_url: String,
    pub bind_address: String,
    /// Model file (JSON or YAML); the bundled model is used when unset
    pub model_path: Option<PathBuf>,
    pub cache_ttl_secs: u64,
    pub cache_capacity: u64,
    pub request_timeout_secs: u64,
    /// Assumed conditions for the current-week forecast
    #[serde(default)]
    pub current_conditions: CurrentConditions,
}

impl Settings {
    /// Loads settings; `config_path` defaults to an optional `nyanya.toml`
    /// in the working directory.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let file = match config_path {
            Some(path) => File::from(path).required(true),
            None => File::with_name("nyanya").required(false),
        };

        let settings = Config::builder()
            .set_default("database_url", "sqlite://nyanya.db?mode=rwc")?
            .set_default("bind_address", "0.0.0.0:8000")?
            .set_default("cache_ttl_secs", 300)?
            .set_default("cache_capacity", 1000)?
            .set_default("request_timeout_secs", 30)?
            .add_source(file)
            .add_source(Environment::with_prefix("NYANYA").separator("__"))
            .build()
            .context("Failed to read configuration")?
            .try_deserialize::<Settings>()
            .context("Invalid configuration")?;

        debug!(?settings, "Loaded settings");
        Ok(settings)
    }

    /// Applies command-line overrides.
    pub fn with_overrides(mut self, database_url: Option<String>, bind_address: Option<String>) -> Self {
        if let Some(url) = database_url {
            self.database_url = url;
        }
        if let Some(addr) = bind_address {
            self.bind_address = addr;
        }
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Loads the configured model, or the bundled one.
pub fn load_predictor(settings: &Settings) -> Result<Arc<dyn DemandPredictor>> {
    let model = match &settings.model_path {
        Some(path) => LogisticModel::load(path)?,
        None => {
            info!("No model path configured, using bundled model");
            LogisticModel::bundled()?
        }
    };
    Ok(Arc::new(model))
}

/// Initialize application state from settings
pub async fn initialize_app_state(settings: &Settings) -> Result<AppState> {
    info!("Connecting to database: {}", settings.database_url);
    let db = Database::connect(&settings.database_url).await?;

    let predictor = load_predictor(settings)?;
    info!("Using demand model {}", predictor.name());

    let cache = Cache::builder()
        .max_capacity(settings.cache_capacity)
        .time_to_live(Duration::from_secs(settings.cache_ttl_secs))
        .build();

    Ok(AppState {
        db,
        cache,
        predictor,
        conditions: Arc::new(settings.current_conditions.clone()),
    })
}

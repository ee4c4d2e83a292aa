use anyhow::Result;
use std::path::Path;
use tracing::{info, trace};

use super::initdb::init_database;
use super::serve::run_server;
use crate::config::Settings;

pub async fn migrate_and_serve(
    config_path: Option<&Path>,
    database_url: Option<String>,
    bind_address: Option<String>,
) -> Result<()> {
    trace!("Entering migrate_and_serve function");
    info!("Applying database migrations and starting server");

    let settings = Settings::load(config_path)?.with_overrides(database_url, bind_address);
    init_database(&settings.database_url).await?;
    run_server(&settings).await
}

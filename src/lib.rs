pub mod app;
pub mod config;
pub mod core;
pub mod currencies;
pub mod log;
pub mod providers;
pub mod terminal;
pub mod tui;
pub mod ui;

use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

pub async fn run(config_path: Option<&str>) -> Result<()> {
    info!("Currency converter starting...");

    let config = match config_path {
        Some(path) => config::AppConfig::load_from_path(path)?,
        None => config::AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let service: Arc<dyn core::RateService> = Arc::new(
        providers::ExchangeApiClient::new(&config.service.base_url)?,
    );

    terminal::install_panic_hook();
    let mut term = terminal::setup_terminal()?;
    let result = tui::run_loop(&mut term, service).await;
    terminal::restore_terminal(term)?;
    result
}

pub mod charts;
pub mod cli;
pub mod core;
pub mod providers;

use crate::charts::SvgChartBackend;
use crate::cli::TerminalView;
use crate::core::ConversionService;
use crate::core::config::AppConfig;
use crate::providers::MindicadorProvider;
use anyhow::Result;
use tracing::{debug, info};

pub enum AppCommand {
    Convert { amount: String, currency: String },
    Interactive,
    Currencies,
}

/// Converter wired to the indicator API, the terminal and an SVG chart file.
pub type TerminalConverter = ConversionService<MindicadorProvider, TerminalView, SvgChartBackend>;

pub fn build_service(config: &AppConfig) -> Result<TerminalConverter> {
    let provider = MindicadorProvider::new(&config.mindicador())?;
    let chart_path = config.chart_output_path()?;
    let backend = SvgChartBackend::new(&chart_path, config.chart.width, config.chart.height);
    let view = TerminalView::new(Some(backend.path().to_path_buf()));
    Ok(ConversionService::new(provider, view, backend))
}

fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");
    Ok(config)
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("cambio starting...");

    match command {
        AppCommand::Currencies => {
            cli::currencies::run();
            Ok(())
        }
        AppCommand::Convert { amount, currency } => {
            let service = build_service(&load_config(config_path)?)?;
            cli::convert::run(&service, &amount, &currency).await
        }
        AppCommand::Interactive => {
            let service = build_service(&load_config(config_path)?)?;
            cli::interactive::run(&service).await
        }
    }
}

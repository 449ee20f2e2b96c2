mod background;
mod data_loaders;
mod desktop;
mod download;
mod error;
mod logging;
mod metadata;
mod paths;
mod platform;
mod resolution;
mod service;
mod storage;
#[cfg(windows)]
mod utility;

use std::process::ExitCode;

use crate::{
    background::Environment,
    data_loaders::config::AppConfig,
    error::Result,
    paths::{config_candidates, pictures_dir},
    platform::desktop_integration,
    service::BingClient,
    storage::SystemClock,
};

pub const APP_NAME: &str = "daily-background";

fn run(config: &AppConfig) -> Result<()> {
    let mut desktop = desktop_integration()?;
    let service = BingClient::new(&config.market)?;
    let pictures = pictures_dir();

    let path = background::run(
        config,
        Environment {
            service: &service,
            display: desktop.display.as_ref(),
            clock: &SystemClock,
            pictures_dir: &pictures,
            store: desktop.store.as_mut(),
            notifier: desktop.notifier.as_ref(),
        },
    )?;

    info!("Background applied from {}", path.display());
    Ok(())
}

fn main() -> ExitCode {
    logging::init();
    logging::install_panic_hook();

    let (config, source) = AppConfig::load_first(&config_candidates());
    logging::set_level(&config.log_level);
    logging::set_debug(config.debug);

    info!("!---------- Starting {} ----------!", APP_NAME);
    match &source {
        Some(path) => info!("Config loaded from {}", path.display()),
        None => info!("No config.yaml found, using built-in defaults"),
    }
    info!(
        "Market {}, fallback {}, position {:?}",
        config.market, config.fallback_resolution, config.position
    );

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

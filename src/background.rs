use std::path::{Path, PathBuf};

use crate::{
    data_loaders::config::AppConfig,
    desktop::{apply_background, SettingsStore, WallpaperNotifier},
    download::download_background,
    error::Result,
    info,
    logging::step,
    metadata::{parse_metadata, SERVICE_HOST},
    resolution::{resolve_image_url, DisplayBounds},
    service::ImageService,
    storage::{background_path, save_background, Clock},
};

/// Everything the pipeline reads from or writes to outside the process.
pub struct Environment<'a> {
    pub service: &'a dyn ImageService,
    pub display: &'a dyn DisplayBounds,
    pub clock: &'a dyn Clock,
    pub pictures_dir: &'a Path,
    pub store: &'a mut dyn SettingsStore,
    pub notifier: &'a dyn WallpaperNotifier,
}

/// Fetches today's image, saves it and sets it as the wallpaper.
/// Returns the path of the saved bitmap.
pub fn run(config: &AppConfig, env: Environment<'_>) -> Result<PathBuf> {
    step("Downloading JSON...");
    let json = env.service.fetch_metadata_json()?;
    let metadata = parse_metadata(&json, SERVICE_HOST)?;
    info!("Today's background: {}", metadata.title());

    let url = resolve_image_url(
        &metadata.base_url,
        env.display,
        config.fallback_resolution,
        env.service,
    );

    step("Downloading background...");
    let image = download_background(env.service, &url)?;

    step("Saving background...");
    let path = background_path(env.pictures_dir, &config.folder_name, env.clock.today());
    save_background(&image, &path)?;

    step("Setting desktop background...");
    apply_background(env.store, env.notifier, &path, config.position)?;

    Ok(path)
}

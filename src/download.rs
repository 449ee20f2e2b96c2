use image::DynamicImage;

use crate::{
    error::{AppError, Result},
    info,
    service::ImageService,
};

pub fn download_background(service: &dyn ImageService, url: &str) -> Result<DynamicImage> {
    let bytes = service.download(url)?;
    let image = image::load_from_memory(&bytes).map_err(|e| AppError::Decode(e.to_string()))?;
    info!("Decoded {}x{} background", image.width(), image.height());
    Ok(image)
}

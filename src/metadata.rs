use serde::Deserialize;

use crate::error::{AppError, Result};

pub const SERVICE_HOST: &str = "https://www.bing.com";

pub fn metadata_endpoint(market: &str) -> String {
    format!("{SERVICE_HOST}/HPImageArchive.aspx?format=js&idx=0&n=1&mkt={market}")
}

#[derive(Debug, Deserialize)]
struct HpImageArchive {
    images: Vec<ArchiveImage>,
}

#[derive(Debug, Deserialize)]
struct ArchiveImage {
    urlbase: String,
    copyright: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageMetadata {
    pub base_url: String,
    pub copyright: String,
}

impl ImageMetadata {
    /// The copyright text up to the photographer credit, e.g. `"Tatra lake"`
    /// for `"Tatra lake (© Someone/Getty Images)"`.
    pub fn title(&self) -> &str {
        match self.copyright.find(" (") {
            Some(idx) => &self.copyright[..idx],
            None => &self.copyright,
        }
    }
}

/// Parses the archive payload and anchors the first image's relative path on `host`.
pub fn parse_metadata(json: &str, host: &str) -> Result<ImageMetadata> {
    let archive: HpImageArchive =
        serde_json::from_str(json).map_err(|e| AppError::Parse(e.to_string()))?;

    let image = archive
        .images
        .into_iter()
        .next()
        .ok_or_else(|| AppError::Parse("response contains no images".to_string()))?;

    Ok(ImageMetadata {
        base_url: format!("{host}{}", image.urlbase),
        copyright: image.copyright,
    })
}

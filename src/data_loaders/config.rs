use std::path::{Path, PathBuf};

use serde_yaml::Value;

use super::yaml::{bool_at, load_yaml, str_any, str_at};
use crate::{desktop::ImagePosition, resolution::Resolution, warn};

pub const DEFAULT_MARKET: &str = "pl-PL";
pub const DEFAULT_FALLBACK: Resolution = Resolution {
    width: 1920,
    height: 1080,
};
pub const DEFAULT_FOLDER: &str = "Bing Backgrounds";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub debug: bool,
    pub log_level: String,
    pub market: String,
    pub fallback_resolution: Resolution,
    pub position: ImagePosition,
    pub folder_name: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            debug: false,
            log_level: "info".to_string(),
            market: DEFAULT_MARKET.to_string(),
            fallback_resolution: DEFAULT_FALLBACK,
            position: ImagePosition::Fill,
            folder_name: DEFAULT_FOLDER.to_string(),
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Option<Self> {
        let value = load_yaml(path)?;
        Self::from_yaml(&value)
    }

    /// Loads the first readable config among `candidates` and reports which one
    /// it was; falls back to the defaults when none can be read.
    pub fn load_first(candidates: &[impl AsRef<Path>]) -> (Self, Option<PathBuf>) {
        candidates
            .iter()
            .find_map(|p| Self::load(p.as_ref()).map(|c| (c, Some(p.as_ref().to_path_buf()))))
            .unwrap_or_default()
    }

    pub fn from_yaml(root: &Value) -> Option<Self> {
        let map = root.as_mapping()?;
        let mut config = Self::default();

        config.debug = bool_at(map, "debug").unwrap_or(config.debug);
        if let Some(level) = str_at(map, "log_level") {
            config.log_level = level.trim().to_lowercase();
        }

        if let Some(market) = str_any(map, &["market", "mkt"]) {
            let market = market.trim();
            if is_valid_market(market) {
                config.market = market.to_string();
            } else {
                warn!("Ignoring market '{}', keeping {}", market, config.market);
            }
        }

        if let Some(raw) = str_at(map, "fallback_resolution") {
            match raw.parse::<Resolution>() {
                Ok(res) => config.fallback_resolution = res,
                Err(e) => warn!("Ignoring fallback_resolution '{}': {}", raw, e),
            }
        }

        if let Some(raw) = str_any(map, &["position", "mode"]) {
            match ImagePosition::parse(raw) {
                Some(position) => config.position = position,
                None => warn!("Ignoring unknown position '{}'", raw),
            }
        }

        if let Some(folder) = str_at(map, "folder_name") {
            if !folder.trim().is_empty() {
                config.folder_name = folder.trim().to_string();
            }
        }

        Some(config)
    }
}

/// Market codes look like `pl-PL`; anything else would leak into the query string.
fn is_valid_market(market: &str) -> bool {
    !market.is_empty() && market.chars().all(|c| c.is_ascii_alphabetic() || c == '-')
}

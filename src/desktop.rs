use std::path::Path;

use crate::{error::Result, info};

pub const STYLE_VALUE: &str = "WallpaperStyle";
pub const TILE_VALUE: &str = "TileWallpaper";

/// How the wallpaper is laid out on the desktop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImagePosition {
    Tile,
    Center,
    Stretch,
    Fit,
    Fill,
}

impl ImagePosition {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "tile" | "tiled" => Some(Self::Tile),
            "center" | "centre" | "centered" => Some(Self::Center),
            "stretch" | "stretched" => Some(Self::Stretch),
            "fit" => Some(Self::Fit),
            "fill" => Some(Self::Fill),
            _ => None,
        }
    }

    pub fn style_code(self) -> u32 {
        match self {
            Self::Tile | Self::Center => 0,
            Self::Stretch => 2,
            Self::Fit => 6,
            Self::Fill => 10,
        }
    }

    pub fn tile_code(self) -> u32 {
        match self {
            Self::Tile => 1,
            _ => 0,
        }
    }

    pub fn setting_values(self) -> [(&'static str, String); 2] {
        [
            (STYLE_VALUE, self.style_code().to_string()),
            (TILE_VALUE, self.tile_code().to_string()),
        ]
    }
}

/// Per-user desktop appearance settings.
pub trait SettingsStore {
    /// Fails with `AppError::Permission` when the store cannot be written.
    fn write_values(&mut self, values: &[(&str, String)]) -> Result<()>;
}

/// Tells the shell to reload the wallpaper right away.
pub trait WallpaperNotifier {
    /// Fails with `AppError::Notify`.
    fn notify(&self, path: &Path) -> Result<()>;
}

pub fn apply_background(
    store: &mut dyn SettingsStore,
    notifier: &dyn WallpaperNotifier,
    path: &Path,
    position: ImagePosition,
) -> Result<()> {
    store.write_values(&position.setting_values())?;
    info!(
        "Desktop style set to {:?} (style={}, tile={})",
        position,
        position.style_code(),
        position.tile_code()
    );

    notifier.notify(path)?;
    info!("Wallpaper reload requested for {}", path.display());
    Ok(())
}

#[cfg(test)]
pub(crate) mod fakes {
    use std::{cell::RefCell, collections::HashMap, path::PathBuf};

    use super::*;
    use crate::error::AppError;

    #[derive(Default)]
    pub struct MemoryStore {
        pub values: HashMap<String, String>,
        pub read_only: bool,
    }

    impl SettingsStore for MemoryStore {
        fn write_values(&mut self, values: &[(&str, String)]) -> Result<()> {
            if self.read_only {
                return Err(AppError::Permission("store is read-only".to_string()));
            }
            for (name, value) in values {
                self.values.insert(name.to_string(), value.clone());
            }
            Ok(())
        }
    }

    #[derive(Default)]
    pub struct RecordingNotifier {
        pub notified: RefCell<Vec<PathBuf>>,
        pub fail: bool,
    }

    impl WallpaperNotifier for RecordingNotifier {
        fn notify(&self, path: &Path) -> Result<()> {
            if self.fail {
                return Err(AppError::Notify("shell refused".to_string()));
            }
            self.notified.borrow_mut().push(path.to_path_buf());
            Ok(())
        }
    }
}

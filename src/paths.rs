use std::path::PathBuf;

use crate::{debug, warn, APP_NAME};

pub fn user_home_dir() -> Option<PathBuf> {
    if let Some(home) = dirs::home_dir() {
        return Some(home);
    }

    // Fallback (older / edge cases)
    if let Ok(profile) = std::env::var("USERPROFILE") {
        debug!("Resolved home directory from USERPROFILE: {}", profile);
        return Some(PathBuf::from(profile));
    }

    let drive = std::env::var("HOMEDRIVE").ok();
    let path = std::env::var("HOMEPATH").ok();

    match (drive, path) {
        (Some(d), Some(p)) => {
            let full = PathBuf::from(format!("{}{}", d, p));
            debug!("Resolved home directory from HOMEDRIVE/HOMEPATH: {}", full.display());
            Some(full)
        }
        _ => {
            warn!("Could not resolve home directory");
            None
        }
    }
}

/// The user's Pictures folder, where the per-year background folders live.
pub fn pictures_dir() -> PathBuf {
    if let Some(dir) = dirs::picture_dir() {
        debug!("Pictures directory: {}", dir.display());
        return dir;
    }

    if let Some(home) = user_home_dir() {
        let dir = home.join("Pictures");
        warn!("No known Pictures folder, using {}", dir.display());
        return dir;
    }

    warn!("Could not resolve Pictures folder, falling back to working directory");
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Per-user directory for the log file.
pub fn app_data_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|p| p.join(APP_NAME))
}

/// Candidate locations of `config.yaml`, most specific first.
pub fn config_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.to_path_buf()))
    {
        candidates.push(exe_dir.join("config.yaml"));
    }

    if let Some(config_dir) = dirs::config_dir() {
        candidates.push(config_dir.join(APP_NAME).join("config.yaml"));
    }

    candidates
}

use std::{fmt, str::FromStr};

use crate::{logging::step, service::ImageService};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// The `_WIDTHxHEIGHT.jpg` token appended to an image base URL.
    pub fn suffix(&self) -> String {
        format!("_{}.jpg", self)
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for Resolution {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
        let width = w.trim().parse::<u32>().map_err(|e| format!("bad width: {e}"))?;
        let height = h.trim().parse::<u32>().map_err(|e| format!("bad height: {e}"))?;
        if width == 0 || height == 0 {
            return Err(format!("resolution must be non-zero, got '{s}'"));
        }
        Ok(Self { width, height })
    }
}

/// Source of the primary display's size in pixels.
pub trait DisplayBounds {
    fn primary_resolution(&self) -> Resolution;
}

/// Picks the image variant matching the primary display, or the fallback
/// variant when the service has no exact match. The fallback is not probed.
pub fn resolve_image_url(
    base_url: &str,
    display: &dyn DisplayBounds,
    fallback: Resolution,
    service: &dyn ImageService,
) -> String {
    let wanted = display.primary_resolution();
    let candidate = format!("{base_url}{}", wanted.suffix());

    if service.probe(&candidate) {
        step(&format!("Background for {wanted} found!"));
        return candidate;
    }

    step(&format!(
        "No background for {wanted} was found! Using {fallback} instead."
    ));
    format!("{base_url}{}", fallback.suffix())
}

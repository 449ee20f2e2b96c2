use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{Datelike, NaiveDate};
use image::{ColorType, DynamicImage, ImageError, ImageFormat};

use crate::{
    error::{AppError, Result},
    info,
};

pub const BACKGROUND_EXTENSION: &str = "bmp";

pub trait Clock {
    fn today(&self) -> NaiveDate;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// `<pictures>/<folder>/<YYYY>/<M>-<D>-<YYYY>.bmp`
pub fn background_path(pictures: &Path, folder: &str, date: NaiveDate) -> PathBuf {
    pictures
        .join(folder)
        .join(date.year().to_string())
        .join(format!(
            "{}-{}-{}.{}",
            date.month(),
            date.day(),
            date.year(),
            BACKGROUND_EXTENSION
        ))
}

/// Writes `image` as a bitmap at `path`, replacing any file already there.
pub fn save_background(image: &DynamicImage, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|e| AppError::io(dir, e))?;
    }

    let result = match image.color() {
        ColorType::Rgb8 | ColorType::Rgba8 | ColorType::L8 => {
            image.save_with_format(path, ImageFormat::Bmp)
        }
        _ => DynamicImage::ImageRgb8(image.to_rgb8()).save_with_format(path, ImageFormat::Bmp),
    };

    result.map_err(|e| match e {
        ImageError::IoError(source) => AppError::io(path, source),
        other => AppError::io(path, std::io::Error::other(other)),
    })?;

    info!("Saved background to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};

    use super::*;

    fn solid(color: [u8; 3]) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 3, Rgb(color)))
    }

    #[test]
    fn path_uses_unpadded_month_day_year() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        let path = background_path(Path::new("/pics"), "Bing Backgrounds", date);
        assert_eq!(
            path,
            Path::new("/pics").join("Bing Backgrounds").join("2024").join("3-7-2024.bmp")
        );
    }

    #[test]
    fn path_is_stable_for_the_same_day() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert_eq!(
            background_path(Path::new("p"), "f", date),
            background_path(Path::new("p"), "f", date)
        );
    }

    #[test]
    fn save_creates_year_folder() {
        let dir = tempfile::tempdir().unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        let path = background_path(dir.path(), "Bing Backgrounds", date);

        save_background(&solid([1, 2, 3]), &path).unwrap();

        assert!(path.is_file());
        let reloaded = image::open(&path).unwrap();
        assert_eq!((reloaded.width(), reloaded.height()), (4, 3));
    }

    #[test]
    fn saving_twice_overwrites_same_file() {
        let dir = tempfile::tempdir().unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let path = background_path(dir.path(), "Bing Backgrounds", date);

        save_background(&solid([255, 0, 0]), &path).unwrap();
        save_background(&solid([0, 0, 255]), &path).unwrap();

        let pixel = image::open(&path).unwrap().to_rgb8().get_pixel(0, 0).0;
        assert_eq!(pixel, [0, 0, 255]);
        let year_dir = path.parent().unwrap();
        assert_eq!(fs::read_dir(year_dir).unwrap().count(), 1);
    }

    #[test]
    fn blocked_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("Bing Backgrounds");
        fs::write(&blocker, b"not a directory").unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let path = background_path(dir.path(), "Bing Backgrounds", date);

        let err = save_background(&solid([0, 0, 0]), &path).unwrap_err();
        assert!(matches!(err, AppError::Io { .. }));
    }
}

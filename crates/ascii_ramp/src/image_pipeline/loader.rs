use std::path::Path;

use image::io::Reader;
use image::{DynamicImage, GenericImageView, Pixel};
use log::debug;

use super::brightness::hsb_brightness;
use crate::AsciiError;

/// Read access to a decoded image.
pub trait PixelSource {
    fn size(&self) -> (u32, u32);
    fn brightness_at(&self, x: u32, y: u32) -> f32;
}

impl<I> PixelSource for I
where
    I: GenericImageView,
    I::Pixel: Pixel<Subpixel = u8>,
{
    fn size(&self) -> (u32, u32) {
        self.dimensions()
    }

    fn brightness_at(&self, x: u32, y: u32) -> f32 {
        hsb_brightness(self.get_pixel(x, y).to_rgb())
    }
}

/// Decodes the image at `path`. The file handle is closed before returning.
pub fn open_image(path: &Path) -> Result<DynamicImage, AsciiError> {
    if !path.is_file() {
        return Err(AsciiError::ImageNotFound { path: path.to_path_buf() });
    }

    let reader = Reader::open(path)
        .map_err(|_| AsciiError::ImageNotFound { path: path.to_path_buf() })?
        .with_guessed_format()
        .map_err(|err| AsciiError::ImageDecode {
            path: path.to_path_buf(),
            source: image::ImageError::IoError(err),
        })?;

    let image = reader
        .decode()
        .map_err(|source| AsciiError::ImageDecode { path: path.to_path_buf(), source })?;

    let (w, h) = image.dimensions();
    debug!("loaded image {}x{} from {}", w, h, path.display());
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = open_image(&dir.path().join("nope.png")).unwrap_err();
        assert!(matches!(err, AsciiError::ImageNotFound { .. }));
    }

    #[test]
    fn directory_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = open_image(dir.path()).unwrap_err();
        assert!(matches!(err, AsciiError::ImageNotFound { .. }));
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"definitely not an image").unwrap();
        let err = open_image(&path).unwrap_err();
        assert!(matches!(err, AsciiError::ImageDecode { .. }));
    }

    #[test]
    fn buffers_expose_brightness() {
        let mut img = RgbImage::new(2, 1);
        img.put_pixel(1, 0, Rgb([0, 255, 0]));
        assert_eq!(PixelSource::size(&img), (2, 1));
        assert_eq!(img.brightness_at(0, 0), 0.0);
        assert_eq!(img.brightness_at(1, 0), 1.0);
    }
}

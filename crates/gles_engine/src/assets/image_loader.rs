//! Image loading utilities for texture data
//!
//! The pixel-source collaborator: anything that turns a path into RGBA8 pixels
//! implements [`PixelSource`]. [`ImageFileSource`] decodes PNG and BMP files
//! with the `image` crate.

use std::path::Path;
use thiserror::Error;

/// Failure to produce pixels for a path
#[derive(Error, Debug)]
#[error("Failed to decode image {path}: {reason}")]
pub struct DecodeError {
    /// Path that was requested
    pub path: String,
    /// Decoder message
    pub reason: String,
}

/// Loaded image data ready for GPU upload
#[derive(Debug, Clone)]
pub struct ImageData {
    /// Raw RGBA pixel data, rows bottom-up as GL expects
    pub data: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl ImageData {
    /// Image filled with one RGBA colour
    pub fn solid_color(width: u32, height: u32, color: [u8; 4]) -> Self {
        Self {
            data: color.repeat(width as usize * height as usize),
            width,
            height,
        }
    }

    /// Size of the pixel buffer in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Whether the buffer holds exactly `width * height` RGBA pixels
    pub fn is_consistent(&self) -> bool {
        let expected = (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|pixels| pixels.checked_mul(4));
        self.width > 0 && self.height > 0 && expected == Some(self.data.len())
    }
}

/// Source of decoded pixels
pub trait PixelSource {
    /// Decode the image at `path` into RGBA8
    fn load(&self, path: &str) -> Result<ImageData, DecodeError>;
}

/// [`PixelSource`] backed by files on disk
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageFileSource;

impl PixelSource for ImageFileSource {
    fn load(&self, path: &str) -> Result<ImageData, DecodeError> {
        log::debug!("Loading image from: {:?}", path);

        let img = image::open(Path::new(path)).map_err(|e| DecodeError {
            path: path.to_string(),
            reason: e.to_string(),
        })?;

        // GL samples row 0 at v = 0, so flip to bottom-up
        let rgba_img = img.flipv().to_rgba8();
        let (width, height) = rgba_img.dimensions();

        log::info!("Loaded image {}x{} from {:?}", width, height, path);

        Ok(ImageData {
            data: rgba_img.into_raw(),
            width,
            height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_color_fills_every_pixel() {
        let img = ImageData::solid_color(3, 2, [10, 20, 30, 40]);
        assert_eq!(img.size_bytes(), 3 * 2 * 4);
        assert!(img.is_consistent());
        assert!(img.data.chunks(4).all(|px| px == [10, 20, 30, 40]));

        let truncated = ImageData { data: vec![0; 5], width: 1, height: 1 };
        assert!(!truncated.is_consistent());
    }

    #[test]
    fn test_huge_dimensions_do_not_overflow() {
        let img = ImageData { data: vec![0; 16], width: 65536, height: 65536 };
        assert!(!img.is_consistent());

        let img = ImageData { data: vec![0; 16], width: u32::MAX, height: u32::MAX };
        assert!(!img.is_consistent());
    }

    #[test]
    fn test_missing_file_is_decode_error() {
        let err = ImageFileSource
            .load("definitely/not/here.bmp")
            .expect_err("missing file must not decode");
        assert_eq!(err.path, "definitely/not/here.bmp");
        assert!(!err.reason.is_empty());
    }

    #[test]
    fn test_png_round_trip_through_file_source() {
        let path = std::env::temp_dir().join("gles_engine_pixel_source.png");
        let mut img = image::RgbaImage::new(2, 1);
        img.put_pixel(0, 0, image::Rgba([1, 2, 3, 255]));
        img.put_pixel(1, 0, image::Rgba([4, 5, 6, 255]));
        img.save(&path).expect("png should encode");

        let loaded = ImageFileSource
            .load(&path.to_string_lossy())
            .expect("png should decode");
        let _ = std::fs::remove_file(&path);

        assert_eq!((loaded.width, loaded.height), (2, 1));
        assert_eq!(&loaded.data[..8], &[1, 2, 3, 255, 4, 5, 6, 255]);
    }
}

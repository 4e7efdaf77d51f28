//! Decoded raster images ready to embed as PDF image XObjects.

use super::PdfError;
use image::DynamicImage;

/// 8-bit RGB samples in row-major order, plus a separate alpha plane when the
/// source image carried one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
    pub alpha: Option<Vec<u8>>,
}

impl RasterImage {
    /// Decodes any format the `image` crate recognises. Grayscale and palette images
    /// are expanded to RGB; deeper samples are reduced to 8 bits.
    pub fn decode(bytes: &[u8]) -> Result<Self, PdfError> {
        let decoded = image::load_from_memory(bytes)?;
        Ok(Self::from_dynamic(&decoded))
    }

    pub fn from_dynamic(image: &DynamicImage) -> Self {
        if image.color().has_alpha() {
            let rgba = image.to_rgba8();
            let (width, height) = rgba.dimensions();
            let pixels = (width * height) as usize;
            let mut rgb = Vec::with_capacity(pixels * 3);
            let mut alpha = Vec::with_capacity(pixels);
            for pixel in rgba.pixels() {
                rgb.extend_from_slice(&pixel.0[..3]);
                alpha.push(pixel.0[3]);
            }
            Self {
                width,
                height,
                rgb,
                alpha: Some(alpha),
            }
        } else {
            let rgb = image.to_rgb8();
            let (width, height) = rgb.dimensions();
            Self {
                width,
                height,
                rgb: rgb.into_raw(),
                alpha: None,
            }
        }
    }

    /// RGBA value at (`x`, `y`); opaque when there is no alpha plane.
    /// `None` outside the image.
    pub fn rgba_at(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = y as usize * self.width as usize + x as usize;
        let rgb = self.rgb.get(index * 3..index * 3 + 3)?;
        let alpha = match &self.alpha {
            Some(plane) => *plane.get(index)?,
            None => u8::MAX,
        };
        Some([rgb[0], rgb[1], rgb[2], alpha])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, ImageOutputFormat, Luma, Rgba};
    use std::io::Cursor;

    fn encode_png(image: DynamicImage) -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        image
            .write_to(&mut buffer, ImageOutputFormat::Png)
            .unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_rgba_png_splits_alpha_plane() {
        let image = ImageBuffer::from_fn(3, 2, |x, y| Rgba([x as u8 * 10, y as u8 * 20, 7, 128 + x as u8]));
        let raster = RasterImage::decode(&encode_png(DynamicImage::ImageRgba8(image))).unwrap();

        assert_eq!((raster.width, raster.height), (3, 2));
        assert_eq!(raster.rgb.len(), 3 * 2 * 3);
        assert_eq!(raster.rgba_at(2, 1), Some([20, 20, 7, 130]));
    }

    #[test]
    fn test_grayscale_png_expands_to_rgb() {
        let image = ImageBuffer::from_fn(2, 2, |x, y| Luma([(x + y * 2) as u8 * 50]));
        let raster = RasterImage::decode(&encode_png(DynamicImage::ImageLuma8(image))).unwrap();

        assert!(raster.alpha.is_none());
        assert_eq!(raster.rgba_at(1, 1), Some([150, 150, 150, 255]));
    }

    #[test]
    fn test_rgba_at_outside_image_is_none() {
        let image = ImageBuffer::from_fn(2, 2, |_, _| Luma([0u8]));
        let raster = RasterImage::decode(&encode_png(DynamicImage::ImageLuma8(image))).unwrap();

        assert_eq!(raster.rgba_at(2, 0), None);
        assert_eq!(raster.rgba_at(0, 2), None);
        assert_eq!(raster.rgba_at(1, 1), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_garbage_is_rejected() {
        let err = RasterImage::decode(b"definitely not a png").unwrap_err();
        assert!(matches!(err, PdfError::Image(_)));
    }
}

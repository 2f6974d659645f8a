use image::imageops::FilterType;
use image::{Rgb, RgbImage};

use crate::error::ClassifierError;

/// Side length of the square grid every image is resized to before analysis.
pub const TARGET_SIZE: u32 = 224;

/// A 224×224 RGB pixel grid.
///
/// The only constructors resize unconditionally, so a `DecodedImage` never
/// holds any other dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pixels: RgbImage,
}

impl DecodedImage {
    /// Wraps already-decoded RGB pixels, resizing them to `TARGET_SIZE` with
    /// bicubic (Catmull-Rom) interpolation. Images already at the target size
    /// are kept pixel for pixel.
    pub fn from_rgb(rgb: RgbImage) -> Self {
        let pixels = if rgb.dimensions() == (TARGET_SIZE, TARGET_SIZE) {
            rgb
        } else {
            image::imageops::resize(&rgb, TARGET_SIZE, TARGET_SIZE, FilterType::CatmullRom)
        };
        DecodedImage { pixels }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> impl Iterator<Item = &Rgb<u8>> {
        self.pixels.pixels()
    }

    pub fn as_rgb(&self) -> &RgbImage {
        &self.pixels
    }
}

/// Decodes JPEG/PNG bytes into a `DecodedImage`.
///
/// The format is guessed from the content, not from any filename. Alpha is
/// dropped and grayscale is expanded to three channels before resizing.
pub fn decode(bytes: &[u8]) -> Result<DecodedImage, ClassifierError> {
    let img = image::load_from_memory(bytes)?;
    Ok(DecodedImage::from_rgb(img.to_rgb8()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageBuffer, ImageOutputFormat, Rgba};
    use std::io::Cursor;

    fn encode(img: DynamicImage, format: ImageOutputFormat) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, format).unwrap();
        buf.into_inner()
    }

    #[test]
    fn non_square_png_is_resized_to_target() {
        let img = ImageBuffer::from_pixel(300, 120, Rgb([10u8, 200, 30]));
        let bytes = encode(DynamicImage::ImageRgb8(img), ImageOutputFormat::Png);

        let decoded = decode(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (TARGET_SIZE, TARGET_SIZE));
        assert_eq!(decoded.pixels().count(), (TARGET_SIZE * TARGET_SIZE) as usize);
    }

    #[test]
    fn small_jpeg_is_upscaled_to_target() {
        let img = ImageBuffer::from_pixel(10, 10, Rgb([128u8, 128, 128]));
        let bytes = encode(DynamicImage::ImageRgb8(img), ImageOutputFormat::Jpeg(90));

        let decoded = decode(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (TARGET_SIZE, TARGET_SIZE));
    }

    #[test]
    fn rgba_input_drops_alpha() {
        let img = ImageBuffer::from_pixel(50, 80, Rgba([200u8, 0, 0, 0]));
        let bytes = encode(DynamicImage::ImageRgba8(img), ImageOutputFormat::Png);

        let decoded = decode(&bytes).unwrap();
        assert_eq!(*decoded.as_rgb().get_pixel(100, 100), Rgb([200, 0, 0]));
    }

    #[test]
    fn target_sized_input_keeps_its_pixels() {
        let mut buf = ImageBuffer::new(TARGET_SIZE, TARGET_SIZE);
        for (x, y, px) in buf.enumerate_pixels_mut() {
            *px = Rgb([(x % 256) as u8, (y % 256) as u8, ((x * y) % 256) as u8]);
        }
        let decoded = DecodedImage::from_rgb(buf.clone());
        assert_eq!(decoded.as_rgb(), &buf);
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let err = decode(b"definitely not an image").unwrap_err();
        assert!(matches!(err, ClassifierError::Decode(_)));
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn truncated_png_fails_to_decode() {
        let img = ImageBuffer::from_pixel(64, 64, Rgb([1u8, 2, 3]));
        let bytes = encode(DynamicImage::ImageRgb8(img), ImageOutputFormat::Png);

        assert!(decode(&bytes[..bytes.len() / 2]).is_err());
    }

    #[test]
    fn empty_input_fails_to_decode() {
        assert!(decode(&[]).is_err());
    }
}

//! # Codec Module
//!
//! The decode/resize/encode collaborator. The fingerprinting and grouping
//! core only depends on the shape of [`DecodedImage`] and on failures being
//! reported distinctly from success; nothing else in the crate touches pixel
//! formats.
//!
//! Decoding goes through the `image` crate and is normalized to 8-bit channel
//! data. Thumbnail resizing uses `fast_image_resize` for SIMD-accelerated
//! bilinear resampling. Thumbnails are encoded as JPEG at quality 85.

use crate::error::CodecError;
use fast_image_resize::{images::Image, PixelType, ResizeAlg, ResizeOptions, Resizer};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ExtendedColorType};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// JPEG quality used for all thumbnails
pub const THUMBNAIL_JPEG_QUALITY: u8 = 85;

/// An owned, decoded pixel buffer.
///
/// `pixels` holds `width * height * channels` bytes in row-major order,
/// channels interleaved. The buffer is released when the value is dropped,
/// on every exit path.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    /// Raw interleaved pixel data
    pub pixels: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Number of channels per pixel (1, 2, 3, or 4)
    pub channels: u8,
}

/// Decode an image file into an 8-bit pixel buffer.
///
/// Higher bit-depth sources are converted to 8-bit RGBA first, so `channels`
/// is always 1, 2, 3, or 4 with one byte per channel.
pub fn decode(path: &Path) -> Result<DecodedImage, CodecError> {
    let img = image::open(path).map_err(|e| CodecError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let img = match img {
        DynamicImage::ImageLuma8(_)
        | DynamicImage::ImageLumaA8(_)
        | DynamicImage::ImageRgb8(_)
        | DynamicImage::ImageRgba8(_) => img,
        other => DynamicImage::ImageRgba8(other.to_rgba8()),
    };

    let channels = img.color().channel_count();
    let width = img.width();
    let height = img.height();

    if width == 0 || height == 0 {
        return Err(CodecError::Decode {
            path: path.to_path_buf(),
            reason: "image has zero dimensions".to_string(),
        });
    }

    Ok(DecodedImage {
        pixels: img.into_bytes(),
        width,
        height,
        channels,
    })
}

/// Compute thumbnail dimensions that preserve the source aspect ratio.
///
/// The longest side becomes `longest_side`; the other side is scaled
/// accordingly, never below 1 pixel.
pub fn thumbnail_dimensions(width: u32, height: u32, longest_side: u32) -> (u32, u32) {
    let aspect = width as f32 / height as f32;

    if width > height {
        let thumb_h = (longest_side as f32 / aspect) as u32;
        (longest_side, thumb_h.max(1))
    } else {
        let thumb_w = (longest_side as f32 * aspect) as u32;
        (thumb_w.max(1), longest_side)
    }
}

fn pixel_type(channels: u8, path: &Path) -> Result<PixelType, CodecError> {
    match channels {
        1 => Ok(PixelType::U8),
        2 => Ok(PixelType::U8x2),
        3 => Ok(PixelType::U8x3),
        4 => Ok(PixelType::U8x4),
        n => Err(CodecError::Resize {
            path: path.to_path_buf(),
            reason: format!("unsupported channel count: {}", n),
        }),
    }
}

/// Resize a decoded image to thumbnail size using bilinear resampling.
pub fn thumbnail(
    img: &DecodedImage,
    longest_side: u32,
    path: &Path,
) -> Result<DecodedImage, CodecError> {
    let (thumb_w, thumb_h) = thumbnail_dimensions(img.width, img.height, longest_side);
    let pt = pixel_type(img.channels, path)?;

    let src = Image::from_vec_u8(img.width, img.height, img.pixels.clone(), pt).map_err(|e| {
        CodecError::Resize {
            path: path.to_path_buf(),
            reason: format!("failed to create source image: {}", e),
        }
    })?;

    let mut dst = Image::new(thumb_w, thumb_h, pt);

    let options = ResizeOptions::new().resize_alg(ResizeAlg::Convolution(
        fast_image_resize::FilterType::Bilinear,
    ));

    let mut resizer = Resizer::new();
    resizer
        .resize(&src, &mut dst, &options)
        .map_err(|e| CodecError::Resize {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    Ok(DecodedImage {
        pixels: dst.into_vec(),
        width: thumb_w,
        height: thumb_h,
        channels: img.channels,
    })
}

/// Encode a decoded image as a JPEG file.
///
/// JPEG has no alpha, so 2-channel buffers drop their alpha channel and
/// 4-channel buffers are reduced to RGB.
pub fn encode_jpeg(img: &DecodedImage, out_path: &Path, quality: u8) -> Result<(), CodecError> {
    let (data, color) = match img.channels {
        1 => (img.pixels.clone(), ExtendedColorType::L8),
        2 => {
            let luma: Vec<u8> = img.pixels.chunks_exact(2).map(|px| px[0]).collect();
            (luma, ExtendedColorType::L8)
        }
        3 => (img.pixels.clone(), ExtendedColorType::Rgb8),
        4 => {
            let rgb: Vec<u8> = img
                .pixels
                .chunks_exact(4)
                .flat_map(|px| [px[0], px[1], px[2]])
                .collect();
            (rgb, ExtendedColorType::Rgb8)
        }
        n => {
            return Err(CodecError::Encode {
                path: out_path.to_path_buf(),
                reason: format!("unsupported channel count: {}", n),
            })
        }
    };

    let file = File::create(out_path).map_err(|e| CodecError::Io {
        path: out_path.to_path_buf(),
        source: e,
    })?;

    let mut encoder = JpegEncoder::new_with_quality(BufWriter::new(file), quality);
    encoder
        .encode(&data, img.width, img.height, color)
        .map_err(|e| CodecError::Encode {
            path: out_path.to_path_buf(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};
    use tempfile::TempDir;

    fn create_test_image(dir: &TempDir, name: &str, width: u32, height: u32) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let img = ImageBuffer::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, 128u8])
        });
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn decode_reads_dimensions_and_channels() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_test_image(&temp_dir, "test.png", 32, 16);

        let decoded = decode(&path).unwrap();

        assert_eq!(decoded.width, 32);
        assert_eq!(decoded.height, 16);
        assert_eq!(decoded.channels, 3);
        assert_eq!(decoded.pixels.len(), 32 * 16 * 3);
    }

    #[test]
    fn decode_rejects_corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("corrupt.jpg");
        std::fs::write(&path, b"this is not an image").unwrap();

        assert!(matches!(decode(&path), Err(CodecError::Decode { .. })));
    }

    #[test]
    fn thumbnail_dimensions_landscape() {
        let (w, h) = thumbnail_dimensions(400, 200, 100);
        assert_eq!(w, 100);
        assert_eq!(h, 50);
    }

    #[test]
    fn thumbnail_dimensions_portrait() {
        let (w, h) = thumbnail_dimensions(200, 400, 100);
        assert_eq!(w, 50);
        assert_eq!(h, 100);
    }

    #[test]
    fn thumbnail_dimensions_square() {
        let (w, h) = thumbnail_dimensions(300, 300, 100);
        assert_eq!(w, 100);
        assert_eq!(h, 100);
    }

    #[test]
    fn thumbnail_dimensions_never_zero() {
        let (w, h) = thumbnail_dimensions(1000, 2, 64);
        assert!(w >= 1);
        assert!(h >= 1);
    }

    #[test]
    fn thumbnail_resizes_to_target() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_test_image(&temp_dir, "test.png", 128, 64);

        let decoded = decode(&path).unwrap();
        let thumb = thumbnail(&decoded, 32, &path).unwrap();

        assert_eq!(thumb.width, 32);
        assert_eq!(thumb.height, 16);
        assert_eq!(thumb.channels, decoded.channels);
    }

    #[test]
    fn encode_writes_readable_jpeg() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_test_image(&temp_dir, "test.png", 64, 64);
        let out_path = temp_dir.path().join("test_thumb.jpg");

        let decoded = decode(&path).unwrap();
        let thumb = thumbnail(&decoded, 32, &path).unwrap();
        encode_jpeg(&thumb, &out_path, THUMBNAIL_JPEG_QUALITY).unwrap();

        let reread = decode(&out_path).unwrap();
        assert_eq!(reread.width, 32);
        assert_eq!(reread.height, 32);
    }

    #[test]
    fn encode_rgba_drops_alpha() {
        let temp_dir = TempDir::new().unwrap();
        let out_path = temp_dir.path().join("rgba_thumb.jpg");

        let img = DecodedImage {
            pixels: vec![200, 100, 50, 255].repeat(16),
            width: 4,
            height: 4,
            channels: 4,
        };

        encode_jpeg(&img, &out_path, THUMBNAIL_JPEG_QUALITY).unwrap();
        assert!(out_path.exists());
    }
}

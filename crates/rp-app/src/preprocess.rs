use std::io::Cursor;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::{DynamicImage, ImageFormat};
use rp_core::GenerateError;

/// Longest edge sent to the provider. Larger inputs risk GPU memory
/// failures on the model side.
pub const MAX_DIMENSION: u32 = 1024;

/// Decode an uploaded photo, cap its longest edge at `max_dimension`
/// (aspect preserved), and re-encode it as a JPEG data URL.
pub fn to_data_url(bytes: &[u8], max_dimension: u32) -> Result<String, GenerateError> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| GenerateError::InvalidImage(format!("could not read image: {e}")))?;

    let resized = if decoded.width().max(decoded.height()) > max_dimension {
        decoded.resize(max_dimension, max_dimension, image::imageops::FilterType::Lanczos3)
    } else {
        decoded
    };

    // JPEG has no alpha channel.
    let rgb = DynamicImage::ImageRgb8(resized.to_rgb8());
    let mut buf = Cursor::new(Vec::new());
    rgb.write_to(&mut buf, ImageFormat::Jpeg)
        .map_err(|e| GenerateError::InvalidImage(format!("could not encode image: {e}")))?;

    Ok(format!(
        "data:image/jpeg;base64,{}",
        STANDARD.encode(buf.into_inner())
    ))
}

#[cfg(test)]
mod tests {
    use image::RgbImage;

    use super::*;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(
            width,
            height,
            image::Rgb([180, 120, 90]),
        ));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    fn decode_data_url(url: &str) -> DynamicImage {
        let b64 = url.strip_prefix("data:image/jpeg;base64,").unwrap();
        image::load_from_memory(&STANDARD.decode(b64).unwrap()).unwrap()
    }

    #[test]
    fn test_small_image_keeps_dimensions() {
        let url = to_data_url(&png_bytes(64, 48), MAX_DIMENSION).unwrap();
        let out = decode_data_url(&url);
        assert_eq!((out.width(), out.height()), (64, 48));
    }

    #[test]
    fn test_oversized_image_is_capped_with_aspect_preserved() {
        let url = to_data_url(&png_bytes(200, 100), 50).unwrap();
        let out = decode_data_url(&url);
        assert_eq!((out.width(), out.height()), (50, 25));
    }

    #[test]
    fn test_garbage_bytes_rejected() {
        let err = to_data_url(b"definitely not an image", MAX_DIMENSION).unwrap_err();
        assert!(matches!(err, GenerateError::InvalidImage(_)));
    }
}

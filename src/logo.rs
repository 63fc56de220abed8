//! Cover logo decoding, shared by every drawing backend.

use std::io::Cursor;

use image::{DynamicImage, ExtendedColorType, ImageDecoder, ImageFormat};

use crate::model::LogoImage;
use crate::surface::SurfaceError;

pub(crate) enum ImagePayload {
    /// Three-component JPEG, embedded as-is behind a DCT filter.
    Jpeg(Vec<u8>),
    /// Decoded 8-bit samples; alpha becomes a soft mask when not fully opaque.
    Raw { rgb: Vec<u8>, alpha: Option<Vec<u8>> },
}

/// A logo that decoded successfully and is ready to embed.
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub(crate) payload: ImagePayload,
}

impl DecodedImage {
    /// Largest size with the image's aspect ratio that fits in `max_w` x `max_h`.
    pub fn fit_within(&self, max_w: f32, max_h: f32) -> (f32, f32) {
        if self.width == 0 || self.height == 0 {
            return (0.0, 0.0);
        }
        let scale = (max_w / self.width as f32).min(max_h / self.height as f32);
        (self.width as f32 * scale, self.height as f32 * scale)
    }

    /// True when the original JPEG stream is embedded unchanged.
    pub fn is_passthrough(&self) -> bool {
        matches!(self.payload, ImagePayload::Jpeg(_))
    }
}

fn image_err(e: impl std::fmt::Display) -> SurfaceError {
    SurfaceError::Image(e.to_string())
}

/// Decodes a PNG or JPEG logo. Only a JPEG whose stream is RGB is kept
/// compressed; CMYK, YCCK and grayscale files are re-encoded from pixels
/// since the decoder converts them and the stream would not match the
/// RGB colour space it is embedded with.
pub fn decode(logo: &LogoImage) -> Result<DecodedImage, SurfaceError> {
    let reader = image::ImageReader::new(Cursor::new(&logo.data))
        .with_guessed_format()
        .map_err(image_err)?;
    let format = reader.format();
    let decoder = reader.into_decoder().map_err(image_err)?;
    let stream_is_rgb = decoder.original_color_type() == ExtendedColorType::Rgb8;
    let decoded = DynamicImage::from_decoder(decoder).map_err(image_err)?;

    let (width, height) = (decoded.width(), decoded.height());
    if width == 0 || height == 0 {
        return Err(SurfaceError::Image("image has no pixels".into()));
    }

    if format == Some(ImageFormat::Jpeg) && stream_is_rgb {
        return Ok(DecodedImage {
            width,
            height,
            payload: ImagePayload::Jpeg(logo.data.clone()),
        });
    }

    let rgba = decoded.to_rgba8();
    let has_alpha = rgba.pixels().any(|p| p.0[3] < 255);
    let rgb: Vec<u8> = rgba
        .pixels()
        .flat_map(|p| [p.0[0], p.0[1], p.0[2]])
        .collect();
    let alpha = has_alpha.then(|| rgba.pixels().map(|p| p.0[3]).collect());
    Ok(DecodedImage {
        width,
        height,
        payload: ImagePayload::Raw { rgb, alpha },
    })
}

/// Decode the logo, treating any failure as "no logo".
pub fn decode_or_skip(logo: Option<&LogoImage>) -> Option<DecodedImage> {
    let logo = logo?;
    match decode(logo) {
        Ok(img) => {
            log::debug!(
                "Logo decoded: {}x{} px{}",
                img.width,
                img.height,
                if img.is_passthrough() { " (JPEG passthrough)" } else { "" }
            );
            Some(img)
        }
        Err(e) => {
            log::warn!("Logo could not be decoded, rendering without it: {e}");
            None
        }
    }
}

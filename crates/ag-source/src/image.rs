use std::path::Path;

use ag_core::error::CoreError;
use ag_core::frame::PixelBuffer;
use ag_core::traits::ImageDecoder;

/// Décodeur d'images sur disque (PNG, JPEG, BMP, GIF) via le crate `image`.
///
/// Alpha is dropped; only RGB reaches the brightness pass.
///
/// # Example
/// ```no_run
/// use ag_core::traits::ImageDecoder;
/// use ag_source::image::ImageFileDecoder;
/// use std::path::Path;
/// let buf = ImageFileDecoder.decode(Path::new("photo.png")).unwrap();
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct ImageFileDecoder;

impl ImageDecoder for ImageFileDecoder {
    fn decode(&self, path: &Path) -> Result<PixelBuffer, CoreError> {
        load_image(path)
    }
}

/// Load an image from disk into an RGB buffer.
///
/// # Errors
/// Returns [`CoreError::Decode`] if the file is missing or cannot be decoded.
///
/// # Example
/// ```no_run
/// use ag_source::image::load_image;
/// use std::path::Path;
/// let frame = load_image(Path::new("test.png")).unwrap();
/// ```
pub fn load_image(path: &Path) -> Result<PixelBuffer, CoreError> {
    let img = image::open(path).map_err(|e| CoreError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();
    log::debug!("Decoded {} ({width}×{height})", path.display());
    PixelBuffer::from_raw(width, height, rgb.into_raw())
}

use std::path::Path;

use crate::config::Scaling;
use crate::error::CoreError;
use crate::frame::PixelBuffer;

/// Décode un fichier image en buffer RGB.
///
/// Implémenté par : `ImageFileDecoder` (crate `image`).
///
/// # Example
/// ```
/// use ag_core::traits::ImageDecoder;
/// use ag_core::frame::{Pixel, PixelBuffer};
/// use ag_core::CoreError;
/// use std::path::Path;
///
/// struct SolidDecoder;
/// impl ImageDecoder for SolidDecoder {
///     fn decode(&self, _path: &Path) -> Result<PixelBuffer, CoreError> {
///         Ok(PixelBuffer::filled(1, 1, Pixel::BLACK))
///     }
/// }
/// ```
pub trait ImageDecoder {
    /// Read and decode `path`.
    ///
    /// # Errors
    /// [`CoreError::Decode`] if the file is missing or not a supported image.
    fn decode(&self, path: &Path) -> Result<PixelBuffer, CoreError>;
}

/// Rééchantillonne un buffer selon un facteur par axe.
///
/// Implementations must produce exactly
/// [`Scaling::target_dimensions`] of the source, and an empty buffer when
/// either dimension floors to zero.
///
/// # Example
/// ```
/// use ag_core::traits::Rescaler;
/// use ag_core::config::Scaling;
/// use ag_core::frame::PixelBuffer;
/// use ag_core::CoreError;
///
/// struct BlankRescaler;
/// impl Rescaler for BlankRescaler {
///     fn rescale(&mut self, src: PixelBuffer, scaling: Scaling) -> Result<PixelBuffer, CoreError> {
///         let (w, h) = scaling.target_dimensions(src.width(), src.height());
///         Ok(PixelBuffer::new(w, h))
///     }
/// }
/// ```
pub trait Rescaler {
    /// Consume `src` and return the rescaled copy.
    ///
    /// # Errors
    /// Implementation-specific resampling failures.
    fn rescale(&mut self, src: PixelBuffer, scaling: Scaling) -> Result<PixelBuffer, CoreError>;
}

/// Destination d'un rendu texte.
pub trait Sink {
    /// Write `text` verbatim.
    ///
    /// # Errors
    /// [`CoreError::Write`] if the destination cannot be written.
    fn write_text(&mut self, text: &str) -> Result<(), CoreError>;
}

use ag_core::config::Scaling;
use ag_core::error::CoreError;
use ag_core::frame::PixelBuffer;
use ag_core::traits::Rescaler;
use fast_image_resize::images::Image;
use fast_image_resize::{PixelType, ResizeAlg, ResizeOptions, Resizer as FirResizer};

/// Resizer réutilisable wrappant fast_image_resize, en plus-proche-voisin.
///
/// # Example
/// ```
/// use ag_core::config::Scaling;
/// use ag_core::frame::PixelBuffer;
/// use ag_core::traits::Rescaler;
/// use ag_source::resize::Resizer;
///
/// let mut r = Resizer::new();
/// let out = r.rescale(PixelBuffer::new(10, 10), Scaling::Uniform(0.5)).unwrap();
/// assert_eq!(out.dimensions(), (5, 5));
/// ```
pub struct Resizer {
    inner: FirResizer,
    options: ResizeOptions,
}

impl Resizer {
    /// Create a new nearest-neighbour resizer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: FirResizer::new(),
            options: ResizeOptions::new().resize_alg(ResizeAlg::Nearest),
        }
    }

    /// Resize `src` to exactly `width × height`.
    ///
    /// Returns an empty buffer if either target dimension, or the source, is
    /// zero-sized.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDimensions`] if the target buffer is too
    /// large to allocate or fast_image_resize rejects the buffers.
    pub fn resize_to(
        &mut self,
        src: PixelBuffer,
        width: u32,
        height: u32,
    ) -> Result<PixelBuffer, CoreError> {
        if width == 0 || height == 0 || src.is_empty() {
            log::debug!("Resize to {width}×{height}: empty output");
            return Ok(PixelBuffer::empty());
        }
        if src.dimensions() == (width, height) {
            return Ok(src);
        }

        let (src_w, src_h) = src.dimensions();
        let mut src_data = src.into_raw();
        let src_image = Image::from_slice_u8(src_w, src_h, &mut src_data, PixelType::U8x3)
            .map_err(|_| CoreError::InvalidDimensions {
                width: src_w,
                height: src_h,
            })?;

        let mut dst = PixelBuffer::try_new(width, height)?.into_raw();
        let mut dst_image = Image::from_slice_u8(width, height, &mut dst, PixelType::U8x3)
            .map_err(|_| CoreError::InvalidDimensions { width, height })?;

        self.inner
            .resize(&src_image, &mut dst_image, Some(&self.options))
            .map_err(|_| CoreError::InvalidDimensions { width, height })?;

        drop(dst_image);
        log::debug!("Resized {src_w}×{src_h} → {width}×{height}");
        PixelBuffer::from_raw(width, height, dst)
    }
}

impl Default for Resizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rescaler for Resizer {
    fn rescale(&mut self, src: PixelBuffer, scaling: Scaling) -> Result<PixelBuffer, CoreError> {
        let (width, height) = scaling.target_dimensions(src.width(), src.height());
        self.resize_to(src, width, height)
    }
}

use std::path::Path;

use ag_core::config::{RenderOptions, Scaling};
use ag_core::error::CoreError;
use ag_core::frame::{BrightnessGrid, PixelBuffer};
use ag_core::traits::{ImageDecoder, Rescaler};

use crate::brightness::build_brightness_grid;
use crate::render::render;

/// Pipeline complet : decode → rescale (optionnel) → luminances → texte.
///
/// The decoder and rescaler are injected, so this type never touches an
/// image codec directly. One converter serves one conversion at a time; for
/// parallel batch work build one per worker.
///
/// # Example
/// ```
/// use ag_ascii::pipeline::Converter;
/// use ag_core::config::{RenderOptions, Scaling};
/// use ag_core::frame::{Pixel, PixelBuffer};
/// use ag_core::traits::{ImageDecoder, Rescaler};
/// use ag_core::CoreError;
/// use std::path::Path;
///
/// struct Black;
/// impl ImageDecoder for Black {
///     fn decode(&self, _: &Path) -> Result<PixelBuffer, CoreError> {
///         Ok(PixelBuffer::filled(1, 1, Pixel::BLACK))
///     }
/// }
/// struct Keep;
/// impl Rescaler for Keep {
///     fn rescale(&mut self, src: PixelBuffer, _: Scaling) -> Result<PixelBuffer, CoreError> {
///         Ok(src)
///     }
/// }
///
/// let mut conv = Converter::new(Black, Keep);
/// let text = conv.convert(Path::new("x"), Scaling::default(), RenderOptions::default()).unwrap();
/// assert_eq!(text, "@\n");
/// ```
pub struct Converter<D, R> {
    decoder: D,
    rescaler: R,
}

impl<D: ImageDecoder, R: Rescaler> Converter<D, R> {
    /// Assemble a converter from its two capabilities.
    pub fn new(decoder: D, rescaler: R) -> Self {
        Self { decoder, rescaler }
    }

    /// Decode `path`, rescale it and build its brightness grid.
    ///
    /// The grid can then be rendered any number of times with different
    /// [`RenderOptions`].
    ///
    /// # Errors
    /// Propagates decoder and rescaler errors.
    pub fn load(&mut self, path: &Path, scaling: Scaling) -> Result<BrightnessGrid, CoreError> {
        let buffer = self.decoder.decode(path)?;
        self.grid_from_buffer(buffer, scaling)
    }

    /// Rescale an already decoded buffer and build its brightness grid.
    ///
    /// The rescaler is skipped entirely for identity scaling.
    ///
    /// # Errors
    /// Propagates rescaler errors.
    pub fn grid_from_buffer(
        &mut self,
        buffer: PixelBuffer,
        scaling: Scaling,
    ) -> Result<BrightnessGrid, CoreError> {
        let buffer = if scaling.is_identity() {
            buffer
        } else {
            self.rescaler.rescale(buffer, scaling)?
        };
        if buffer.is_empty() {
            log::info!("Scaled image is empty, nothing to render");
        }
        Ok(build_brightness_grid(&buffer))
    }

    /// One-shot conversion of `path` into text.
    ///
    /// # Errors
    /// Propagates decoder and rescaler errors.
    pub fn convert(
        &mut self,
        path: &Path,
        scaling: Scaling,
        options: RenderOptions,
    ) -> Result<String, CoreError> {
        let grid = self.load(path, scaling)?;
        Ok(render(&grid, options))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::PathBuf;

    use ag_core::frame::Pixel;

    use super::*;

    struct MapDecoder(HashMap<PathBuf, PixelBuffer>);

    impl ImageDecoder for MapDecoder {
        fn decode(&self, path: &Path) -> Result<PixelBuffer, CoreError> {
            self.0.get(path).cloned().ok_or_else(|| CoreError::Decode {
                path: path.to_path_buf(),
                reason: "not found".into(),
            })
        }
    }

    /// Nearest-neighbour by index arithmetic, counting its calls.
    #[derive(Default)]
    struct CountingRescaler {
        calls: usize,
    }

    impl Rescaler for CountingRescaler {
        fn rescale(
            &mut self,
            src: PixelBuffer,
            scaling: Scaling,
        ) -> Result<PixelBuffer, CoreError> {
            self.calls += 1;
            let (w, h) = scaling.target_dimensions(src.width(), src.height());
            if w == 0 || h == 0 {
                return Ok(PixelBuffer::empty());
            }
            let mut out = PixelBuffer::new(w, h);
            for y in 0..h {
                for x in 0..w {
                    let sx = (u64::from(x) * u64::from(src.width()) / u64::from(w)) as u32;
                    let sy = (u64::from(y) * u64::from(src.height()) / u64::from(h)) as u32;
                    out.set_pixel(x, y, src.pixel(sx, sy));
                }
            }
            Ok(out)
        }
    }

    fn converter(images: &[(&str, PixelBuffer)]) -> Converter<MapDecoder, CountingRescaler> {
        let map = images
            .iter()
            .map(|(name, buf)| (PathBuf::from(name), buf.clone()))
            .collect();
        Converter::new(MapDecoder(map), CountingRescaler::default())
    }

    #[test]
    fn black_white_and_inverted_pixels() {
        let mut conv = converter(&[
            ("black", PixelBuffer::filled(1, 1, Pixel::BLACK)),
            ("white", PixelBuffer::filled(1, 1, Pixel::WHITE)),
        ]);
        let plain = RenderOptions::default();
        let inverted = RenderOptions {
            invert: true,
            remove_border: false,
        };
        let s = Scaling::default();
        assert_eq!(conv.convert(Path::new("black"), s, plain).unwrap(), "@\n");
        assert_eq!(conv.convert(Path::new("white"), s, plain).unwrap(), " \n");
        assert_eq!(conv.convert(Path::new("white"), s, inverted).unwrap(), "@\n");
    }

    #[test]
    fn identity_scaling_skips_rescaler() {
        let mut conv = converter(&[("img", PixelBuffer::new(3, 3))]);
        conv.load(Path::new("img"), Scaling::Uniform(1.0)).unwrap();
        conv.load(
            Path::new("img"),
            Scaling::Independent {
                width: 1.0,
                height: 1.0,
            },
        )
        .unwrap();
        assert_eq!(conv.rescaler.calls, 0);
    }

    #[test]
    fn rescaled_grid_has_target_dimensions() {
        let mut conv = converter(&[("img", PixelBuffer::new(10, 10))]);
        let grid = conv
            .load(
                Path::new("img"),
                Scaling::Independent {
                    width: 0.5,
                    height: 0.2,
                },
            )
            .unwrap();
        assert_eq!((grid.width(), grid.height()), (5, 2));
        assert_eq!(conv.rescaler.calls, 1);
    }

    #[test]
    fn degenerate_scaling_renders_empty_string() {
        let mut conv = converter(&[("img", PixelBuffer::new(2, 2))]);
        let text = conv
            .convert(
                Path::new("img"),
                Scaling::Uniform(0.1),
                RenderOptions::default(),
            )
            .unwrap();
        assert_eq!(text, "");
    }

    #[test]
    fn grid_renders_under_several_options() {
        let mut buf = PixelBuffer::filled(2, 2, Pixel::WHITE);
        buf.set_pixel(0, 0, Pixel::BLACK);
        let mut conv = converter(&[("img", buf)]);
        let grid = conv.load(Path::new("img"), Scaling::default()).unwrap();

        assert_eq!(render(&grid, RenderOptions::default()), "@ \n  \n");
        let border = RenderOptions {
            invert: false,
            remove_border: true,
        };
        assert_eq!(render(&grid, border), "@\n\n");
    }

    #[test]
    fn decode_failure_propagates() {
        let mut conv = converter(&[]);
        let err = conv
            .convert(
                Path::new("missing"),
                Scaling::default(),
                RenderOptions::default(),
            )
            .unwrap_err();
        assert!(matches!(err, CoreError::Decode { .. }));
    }
}

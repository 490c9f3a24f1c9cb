use ag_core::frame::{BrightnessGrid, PixelBuffer};

use crate::luminance::luminance;

/// Build the brightness grid of `buffer`: cell (row, col) is the luminance
/// of pixel (col, row).
///
/// Covers every pixel, final row and final column included.
///
/// # Example
/// ```
/// use ag_core::frame::{Pixel, PixelBuffer};
/// use ag_ascii::brightness::build_brightness_grid;
///
/// let grid = build_brightness_grid(&PixelBuffer::filled(3, 2, Pixel::WHITE));
/// assert_eq!((grid.width(), grid.height()), (3, 2));
/// assert!((grid.get(1, 2) - 255.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn build_brightness_grid(buffer: &PixelBuffer) -> BrightnessGrid {
    let (width, height) = buffer.dimensions();
    BrightnessGrid::from_fn(width as usize, height as usize, |row, col| {
        luminance(buffer.pixel(col as u32, row as u32))
    })
}

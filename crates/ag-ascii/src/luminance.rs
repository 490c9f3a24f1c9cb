use ag_core::frame::Pixel;

/// Poids perceptuels (R, G, B) appliqués aux carrés des canaux.
pub const WEIGHTS: (f64, f64, f64) = (0.299, 0.587, 0.114);

/// Perceptual brightness of one pixel: `sqrt(0.299·R² + 0.587·G² + 0.114·B²)`.
///
/// Channels are used raw in [0, 255]; grays map to their own value.
///
/// # Example
/// ```
/// use ag_core::frame::Pixel;
/// use ag_ascii::luminance::luminance;
/// assert_eq!(luminance(Pixel::BLACK), 0.0);
/// assert!((luminance(Pixel::WHITE) - 255.0).abs() < 1e-9);
/// ```
#[inline(always)]
#[must_use]
pub fn luminance(pixel: Pixel) -> f64 {
    let (pr, pg, pb) = WEIGHTS;
    let r = f64::from(pixel.r);
    let g = f64::from(pixel.g);
    let b = f64::from(pixel.b);
    (pr * r * r + pg * g * g + pb * b * b).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grays_map_to_themselves() {
        for v in [0u8, 1, 64, 127, 200, 255] {
            let l = luminance(Pixel::gray(v));
            assert!((l - f64::from(v)).abs() < 1e-9, "gris {v} → {l}");
        }
    }

    #[test]
    fn green_dominates_blue() {
        let green = luminance(Pixel::new(0, 255, 0));
        let red = luminance(Pixel::new(255, 0, 0));
        let blue = luminance(Pixel::new(0, 0, 255));
        assert!(green > red && red > blue);
        assert!((green - 255.0 * 0.587f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn never_negative() {
        for r in (0..=255u8).step_by(51) {
            for g in (0..=255u8).step_by(51) {
                for b in (0..=255u8).step_by(51) {
                    assert!(luminance(Pixel::new(r, g, b)) >= 0.0);
                }
            }
        }
    }
}

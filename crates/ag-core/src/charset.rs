/// Nombre de caractères dans la rampe.
pub const RAMP_LEN: usize = 10;

/// Densité décroissante : du caractère le plus sombre au plus clair.
pub const RAMP: [char; RAMP_LEN] = ['@', '%', '#', '*', '+', '=', '-', ':', '.', ' '];

/// [`RAMP`] reversed, used when rendering inverted.
pub const INVERSE_RAMP: [char; RAMP_LEN] = reversed(RAMP);

/// Darkest-appearing character. Border removal keeps only this one.
pub const DARKEST: char = RAMP[0];

/// Divisor numerator for quantisation. Deliberately 255.1 rather than the
/// true luminance maximum so that 255 lands on the last index.
pub const QUANTIZE_SCALE: f64 = 255.1;

const fn reversed(ramp: [char; RAMP_LEN]) -> [char; RAMP_LEN] {
    let mut out = ramp;
    let mut i = 0;
    while i < RAMP_LEN {
        out[i] = ramp[RAMP_LEN - 1 - i];
        i += 1;
    }
    out
}

/// Ramp to render with.
///
/// # Example
/// ```
/// use ag_core::charset::{ramp, RAMP, INVERSE_RAMP};
/// assert_eq!(ramp(false), &RAMP);
/// assert_eq!(ramp(true), &INVERSE_RAMP);
/// ```
#[inline]
#[must_use]
pub fn ramp(invert: bool) -> &'static [char; RAMP_LEN] {
    if invert { &INVERSE_RAMP } else { &RAMP }
}

/// Quantise a brightness value into a ramp index in `[0, RAMP_LEN)`.
///
/// `floor(brightness / (255.1 / 10))`, clamped. Negative or NaN input maps
/// to 0.
///
/// # Example
/// ```
/// use ag_core::charset::ramp_index;
/// assert_eq!(ramp_index(0.0), 0);
/// assert_eq!(ramp_index(255.0), 9);
/// assert_eq!(ramp_index(441.67), 9);
/// ```
#[inline(always)]
#[must_use]
pub fn ramp_index(brightness: f64) -> usize {
    let idx = (brightness / (QUANTIZE_SCALE / RAMP_LEN as f64)).floor();
    // `as` saturates: negatives and NaN become 0.
    (idx as usize).min(RAMP_LEN - 1)
}

use crate::error::CoreError;

/// Un pixel RGB 8 bits. Immutable once read.
///
/// # Example
/// ```
/// use ag_core::frame::Pixel;
/// let p = Pixel::gray(128);
/// assert_eq!((p.r, p.g, p.b), (128, 128, 128));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pixel {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Pixel {
    /// Build a pixel from its three channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Gray pixel with all three channels set to `v`.
    #[must_use]
    pub const fn gray(v: u8) -> Self {
        Self { r: v, g: v, b: v }
    }

    /// Pure black.
    pub const BLACK: Self = Self::gray(0);
    /// Pure white.
    pub const WHITE: Self = Self::gray(255);
}

/// Buffer de pixels décodé.
///
/// Stocke les pixels en RGB row-major, 3 bytes par pixel. Ownership moves
/// from the decoder to the rescaler to the brightness pass; nothing aliases it.
///
/// # Example
/// ```
/// use ag_core::frame::PixelBuffer;
/// let buf = PixelBuffer::new(10, 10);
/// assert_eq!(buf.data().len(), 300);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl PixelBuffer {
    /// Bytes per RGB pixel.
    pub const CHANNELS: usize = 3;

    /// Crée un buffer noir aux dimensions données.
    ///
    /// # Example
    /// ```
    /// use ag_core::frame::PixelBuffer;
    /// let buf = PixelBuffer::new(100, 50);
    /// assert_eq!(buf.width(), 100);
    /// assert_eq!(buf.height(), 50);
    /// ```
    ///
    /// # Panics
    /// Panics if `width * height * 3` does not fit in memory addressing.
    /// Use [`PixelBuffer::try_new`] for sizes coming from user input.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        match Self::try_new(width, height) {
            Ok(buf) => buf,
            Err(e) => panic!("{e}"),
        }
    }

    /// Crée un buffer noir, ou refuse une taille non adressable.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDimensions`] if `width * height * 3`
    /// overflows or exceeds `isize::MAX` bytes.
    ///
    /// # Example
    /// ```
    /// use ag_core::frame::PixelBuffer;
    /// assert!(PixelBuffer::try_new(4, 4).is_ok());
    /// assert!(PixelBuffer::try_new(u32::MAX, u32::MAX).is_err());
    /// ```
    pub fn try_new(width: u32, height: u32) -> Result<Self, CoreError> {
        let len = byte_len(width, height).ok_or(CoreError::InvalidDimensions { width, height })?;
        Ok(Self {
            data: vec![0u8; len],
            width,
            height,
        })
    }

    /// Buffer where every pixel is `pixel`.
    ///
    /// # Example
    /// ```
    /// use ag_core::frame::{Pixel, PixelBuffer};
    /// let buf = PixelBuffer::filled(2, 2, Pixel::WHITE);
    /// assert_eq!(buf.pixel(1, 1), Pixel::WHITE);
    /// ```
    ///
    /// # Panics
    /// Same limits as [`PixelBuffer::new`].
    #[must_use]
    pub fn filled(width: u32, height: u32, pixel: Pixel) -> Self {
        let mut buf = Self::new(width, height);
        for px in buf.data.chunks_exact_mut(Self::CHANNELS) {
            px.copy_from_slice(&[pixel.r, pixel.g, pixel.b]);
        }
        buf
    }

    /// Zero-sized buffer.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(0, 0)
    }

    /// Wrap raw RGB bytes.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDimensions`] if `data` is not exactly
    /// `width * height * 3` bytes long.
    ///
    /// # Example
    /// ```
    /// use ag_core::frame::PixelBuffer;
    /// assert!(PixelBuffer::from_raw(1, 1, vec![1, 2, 3]).is_ok());
    /// assert!(PixelBuffer::from_raw(2, 1, vec![1, 2, 3]).is_err());
    /// ```
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self, CoreError> {
        if byte_len(width, height) != Some(data.len()) {
            return Err(CoreError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Width in pixels.
    #[inline]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// True when the buffer holds no pixel.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Raw RGB bytes, row-major.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer and return its raw bytes.
    #[must_use]
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Accès au pixel (x, y).
    ///
    /// # Panics
    /// Panics if `(x, y)` is outside the buffer.
    #[inline(always)]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Pixel {
        let idx = self.index(x, y);
        Pixel::new(self.data[idx], self.data[idx + 1], self.data[idx + 2])
    }

    /// Overwrite the pixel at (x, y).
    ///
    /// # Panics
    /// Panics if `(x, y)` is outside the buffer.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: Pixel) {
        let idx = self.index(x, y);
        self.data[idx..idx + Self::CHANNELS].copy_from_slice(&[pixel.r, pixel.g, pixel.b]);
    }

    #[inline(always)]
    fn index(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) out of bounds for {}×{}",
            self.width,
            self.height
        );
        (y as usize * self.width as usize + x as usize) * Self::CHANNELS
    }
}

/// `width * height * 3`, `None` past what a `Vec<u8>` can hold.
fn byte_len(width: u32, height: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(PixelBuffer::CHANNELS)
        .filter(|&len| isize::try_from(len).is_ok())
}

/// Grille de luminances, une valeur par pixel.
///
/// Row-major storage in a single vector, so every row has the same length by
/// construction.
///
/// # Example
/// ```
/// use ag_core::frame::BrightnessGrid;
/// let grid = BrightnessGrid::from_fn(3, 2, |row, col| (row * 3 + col) as f64);
/// assert_eq!(grid.get(1, 2), 5.0);
/// assert_eq!(grid.rows().count(), 2);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct BrightnessGrid {
    values: Vec<f64>,
    width: usize,
    height: usize,
}

impl BrightnessGrid {
    /// Build a grid by evaluating `f(row, col)` for every cell.
    ///
    /// A grid with no column has no row either.
    #[must_use]
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let height = if width == 0 { 0 } else { height };
        let mut values = Vec::with_capacity(width * height);
        for row in 0..height {
            for col in 0..width {
                values.push(f(row, col));
            }
        }
        Self {
            values,
            width,
            height,
        }
    }

    /// Build a grid from explicit rows.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDimensions`] if the rows are ragged.
    ///
    /// # Example
    /// ```
    /// use ag_core::frame::BrightnessGrid;
    /// assert!(BrightnessGrid::from_rows(&[vec![0.0, 1.0], vec![2.0]]).is_err());
    /// ```
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, CoreError> {
        let width = rows.first().map_or(0, Vec::len);
        let height = if width == 0 { 0 } else { rows.len() };
        if rows.iter().any(|r| r.len() != width) {
            return Err(CoreError::InvalidDimensions {
                width: u32::try_from(width).unwrap_or(u32::MAX),
                height: u32::try_from(height).unwrap_or(u32::MAX),
            });
        }
        Ok(Self {
            values: rows.concat(),
            width,
            height,
        })
    }

    /// Number of columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// True when the grid holds no cell.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Brightness at (row, col).
    ///
    /// # Panics
    /// Panics if the cell is outside the grid.
    #[inline]
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(row < self.height && col < self.width, "cell out of bounds");
        self.values[row * self.width + col]
    }

    /// Iterate over rows, top to bottom.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[f64]> {
        // Zero-width grids have no rows, the chunk size only has to be non-zero.
        self.values.chunks_exact(self.width.max(1))
    }
}

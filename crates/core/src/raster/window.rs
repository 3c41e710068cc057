//! Rectangular raster window

use std::fmt;

/// A rectangular sub-region of a raster, addressed in pixel coordinates.
///
/// Windows are produced by the block iterator and consumed by the windowed
/// read/write methods of [`crate::raster::SourceRaster`] and
/// [`crate::raster::OutputRaster`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// Row offset of the top-left corner in the full raster
    pub row_off: usize,
    /// Column offset of the top-left corner in the full raster
    pub col_off: usize,
    /// Number of rows in the window
    pub rows: usize,
    /// Number of columns in the window
    pub cols: usize,
}

impl Window {
    /// Create a new window
    pub fn new(row_off: usize, col_off: usize, rows: usize, cols: usize) -> Self {
        Self {
            row_off,
            col_off,
            rows,
            cols,
        }
    }

    /// Number of pixels covered by the window
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    /// Whether the window covers no pixels
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Whether the window lies entirely inside a raster of the given extent
    pub fn fits(&self, rows: usize, cols: usize) -> bool {
        self.row_off + self.rows <= rows && self.col_off + self.cols <= cols
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(row {}, col {}, {}x{})",
            self.row_off, self.col_off, self.rows, self.cols
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_bounds_check() {
        let w = Window::new(90, 200, 20, 56);
        assert_eq!(w.len(), 20 * 56);
        assert!(w.fits(110, 256));
        assert!(!w.fits(100, 256));
        assert!(!w.fits(110, 255));
    }
}

//! Block iteration over a raster extent

use specres_core::raster::Window;

/// Rows per processing block.
///
/// Together with [`BLOCK_COLS`] this bounds peak memory to a small multiple
/// of `band_count * BLOCK_ROWS * BLOCK_COLS * 8` bytes. Tuning constants,
/// not user input.
pub const BLOCK_ROWS: usize = 256;

/// Columns per processing block.
pub const BLOCK_COLS: usize = 256;

/// Iterator over non-overlapping windows covering a raster exactly once.
///
/// Windows are produced in row-major order (top-to-bottom, left-to-right);
/// blocks at the right and bottom edges are clipped to the raster bounds.
/// Consumers may rely on this order for deterministic output layout. The
/// iterator is `Clone`, so a fresh pass can be restarted from a copy.
#[derive(Debug, Clone)]
pub struct BlockIterator {
    rows: usize,
    cols: usize,
    block_rows: usize,
    block_cols: usize,
    next_row: usize,
    next_col: usize,
}

impl BlockIterator {
    /// Iterate the extent of a `rows` x `cols` raster with the default
    /// block size.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::with_block_size(rows, cols, BLOCK_ROWS, BLOCK_COLS)
    }

    /// Iterate with an explicit block size. Exposed for tests; production
    /// callers use [`BlockIterator::new`].
    pub fn with_block_size(rows: usize, cols: usize, block_rows: usize, block_cols: usize) -> Self {
        assert!(block_rows > 0 && block_cols > 0);
        Self {
            rows,
            cols,
            block_rows,
            block_cols,
            next_row: 0,
            next_col: 0,
        }
    }

    /// Total number of blocks the iterator will produce
    pub fn total_blocks(&self) -> usize {
        self.rows.div_ceil(self.block_rows) * self.cols.div_ceil(self.block_cols)
    }
}

impl Iterator for BlockIterator {
    type Item = Window;

    fn next(&mut self) -> Option<Window> {
        if self.next_row >= self.rows || self.cols == 0 {
            return None;
        }

        let window = Window::new(
            self.next_row,
            self.next_col,
            self.block_rows.min(self.rows - self.next_row),
            self.block_cols.min(self.cols - self.next_col),
        );

        self.next_col += self.block_cols;
        if self.next_col >= self.cols {
            self.next_col = 0;
            self.next_row += self.block_rows;
        }

        Some(window)
    }
}

//! Pure tiling arithmetic.
//!
//! Tiles are addressed by block coordinates `(row_block, col_block)` and hold elements at local
//! coordinates `(local_row, local_col)`. Trailing tiles may be shorter or narrower than the tile
//! edge when the matrix is not a tile multiple.

use crate::config::Dimensions;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AddressMapper {
    rows: usize,
    cols: usize,
    tile_size: usize,
}

impl AddressMapper {
    /// # Panics
    /// Panics if `tile_size` is zero.
    #[must_use]
    pub const fn new(dims: Dimensions, tile_size: usize) -> Self {
        assert!(tile_size > 0, "tile size must be non-zero");
        Self {
            rows: dims.rows,
            cols: dims.cols,
            tile_size,
        }
    }

    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.rows, self.cols)
    }

    #[must_use]
    pub const fn tile_size(&self) -> usize {
        self.tile_size
    }

    /// Number of tile rows, counting a trailing partial one.
    #[must_use]
    pub const fn row_blocks(&self) -> usize {
        self.rows.div_ceil(self.tile_size)
    }

    /// Number of tile columns, counting a trailing partial one.
    #[must_use]
    pub const fn col_blocks(&self) -> usize {
        self.cols.div_ceil(self.tile_size)
    }

    #[must_use]
    pub const fn total_tiles(&self) -> usize {
        self.row_blocks() * self.col_blocks()
    }

    /// Rows held by tiles of `row_block`, clamped at the bottom edge.
    #[must_use]
    #[inline]
    pub const fn tile_height(&self, row_block: usize) -> usize {
        debug_assert!(row_block < self.row_blocks());
        let start = row_block * self.tile_size;
        let remaining = self.rows - start;
        if remaining < self.tile_size {
            remaining
        } else {
            self.tile_size
        }
    }

    /// Columns held by tiles of `col_block`, clamped at the right edge.
    #[must_use]
    #[inline]
    pub const fn tile_width(&self, col_block: usize) -> usize {
        debug_assert!(col_block < self.col_blocks());
        let start = col_block * self.tile_size;
        let remaining = self.cols - start;
        if remaining < self.tile_size {
            remaining
        } else {
            self.tile_size
        }
    }

    /// Row-major coordinate of the `index`-th stream element.
    #[must_use]
    #[inline]
    pub const fn source_coords(&self, index: usize) -> (usize, usize) {
        debug_assert!(index < self.rows * self.cols);
        (index / self.cols, index % self.cols)
    }

    /// Linear offset of `(row_block, col_block, local_row, local_col)` in the transposed output.
    ///
    /// The element at matrix coordinate `(r, c)` lands at `c * rows + r`.
    #[must_use]
    #[inline]
    pub const fn dest_offset(
        &self,
        row_block: usize,
        col_block: usize,
        local_row: usize,
        local_col: usize,
    ) -> usize {
        debug_assert!(local_row < self.tile_height(row_block));
        debug_assert!(local_col < self.tile_width(col_block));
        let r = row_block * self.tile_size + local_row;
        let c = col_block * self.tile_size + local_col;
        c * self.rows + r
    }

    /// Number of stream elements making up tile row `row_block`.
    #[must_use]
    #[inline]
    pub const fn band_len(&self, row_block: usize) -> usize {
        self.tile_height(row_block) * self.cols
    }

    /// Offset of `(local_row, local_col)` of tile `col_block` inside a buffered tile row.
    ///
    /// A tile row is buffered exactly as it arrives: `tile_height` matrix rows of `cols`
    /// elements each.
    #[must_use]
    #[inline]
    pub const fn band_offset(&self, col_block: usize, local_row: usize, local_col: usize) -> usize {
        local_row * self.cols + col_block * self.tile_size + local_col
    }
}

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default tile edge, matching a 32-row tile.
pub const DEFAULT_TILE_SIZE: usize = 32;

/// Default widest matrix the tile buffers are sized for.
pub const DEFAULT_MAX_COLS: usize = 2048;

/// What to do with a matrix whose dimensions are not multiples of the tile size.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RemainderPolicy {
    /// Refuse the run with [`ConfigError::NotTileMultiple`].
    #[default]
    Reject,
    /// Clamp the trailing tile row and tile column to the leftover extent.
    PartialTiles,
}

/// Engine-wide settings, fixed when the tile buffers are allocated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Edge length `T` of a square tile.
    pub tile_size: usize,
    /// Widest matrix a run may request; each buffer holds `tile_size * max_cols` elements.
    pub max_cols: usize,
    pub remainder: RemainderPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            max_cols: DEFAULT_MAX_COLS,
            remainder: RemainderPolicy::Reject,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub const fn new(tile_size: usize, max_cols: usize) -> Self {
        Self {
            tile_size,
            max_cols,
            remainder: RemainderPolicy::Reject,
        }
    }

    #[must_use]
    pub const fn with_remainder(mut self, remainder: RemainderPolicy) -> Self {
        self.remainder = remainder;
        self
    }

    /// Number of elements in one tile buffer.
    pub fn buffer_capacity(&self) -> Result<usize, ConfigError> {
        if self.tile_size == 0 {
            return Err(ConfigError::ZeroTileSize);
        }
        if self.max_cols == 0 {
            return Err(ConfigError::ZeroMaxCols);
        }
        self.tile_size
            .checked_mul(self.max_cols)
            .ok_or(ConfigError::CapacityOverflow {
                tile_size: self.tile_size,
                max_cols: self.max_cols,
            })
    }

    /// Checks a run's matrix shape against this configuration.
    pub fn validate(&self, dims: Dimensions) -> Result<(), ConfigError> {
        self.buffer_capacity()?;
        let Dimensions { rows, cols } = dims;
        if rows == 0 || cols == 0 {
            return Err(ConfigError::ZeroDimension { rows, cols });
        }
        if cols > self.max_cols {
            return Err(ConfigError::ExceedsCapacity {
                cols,
                max_cols: self.max_cols,
            });
        }
        if rows.checked_mul(cols).is_none() {
            return Err(ConfigError::ShapeOverflow { rows, cols });
        }
        let is_tile_multiple = rows % self.tile_size == 0 && cols % self.tile_size == 0;
        if !is_tile_multiple && self.remainder == RemainderPolicy::Reject {
            return Err(ConfigError::NotTileMultiple {
                rows,
                cols,
                tile_size: self.tile_size,
            });
        }
        Ok(())
    }
}

/// Shape of the matrix delivered by the stream, `rows x cols` in row-major order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub rows: usize,
    pub cols: usize,
}

impl Dimensions {
    #[must_use]
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.rows * self.cols
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Shape of the transposed matrix.
    #[must_use]
    pub const fn transposed(&self) -> Self {
        Self {
            rows: self.cols,
            cols: self.rows,
        }
    }
}

impl core::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

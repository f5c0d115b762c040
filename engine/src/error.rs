//! Failure conditions of a transpose run.
//!
//! Every error is terminal: nothing is retried and a failed run leaves the output undefined.

use thiserror::Error;

/// The requested configuration or matrix shape cannot be served.
///
/// Always raised before the first stream read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("matrix dimensions must be non-zero, got {rows}x{cols}")]
    ZeroDimension { rows: usize, cols: usize },
    #[error("tile size must be non-zero")]
    ZeroTileSize,
    #[error("maximum column count must be non-zero")]
    ZeroMaxCols,
    #[error("tile buffer of {tile_size}x{max_cols} elements overflows the address space")]
    CapacityOverflow { tile_size: usize, max_cols: usize },
    #[error("{rows}x{cols} matrix overflows the address space")]
    ShapeOverflow { rows: usize, cols: usize },
    #[error("{rows}x{cols} matrix is not a multiple of the {tile_size}x{tile_size} tile")]
    NotTileMultiple {
        rows: usize,
        cols: usize,
        tile_size: usize,
    },
    #[error("{cols} columns exceed the buffer capacity of {max_cols} columns")]
    ExceedsCapacity { cols: usize, max_cols: usize },
    #[error("{len} values do not form whole rows of width {width}")]
    RaggedInput { len: usize, width: usize },
    #[error("output memory holds {available} elements, {required} required")]
    OutputTooSmall { required: usize, available: usize },
}

/// A write to output memory was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("burst of {len} elements at offset {offset} exceeds output capacity {capacity}")]
    OutOfBounds {
        offset: usize,
        len: usize,
        capacity: usize,
    },
    #[error("write at offset {offset} rejected by output memory")]
    Rejected { offset: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransposeError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    /// The producer ran dry before `expected` elements were delivered.
    #[error("stream underrun: {consumed} of {expected} elements delivered")]
    StreamUnderrun { expected: usize, consumed: usize },
    #[error("store failure: {0}")]
    StoreFailure(#[from] StoreError),
}

/// Result type alias for transpose runs.
pub type TransposeResult<T> = core::result::Result<T, TransposeError>;

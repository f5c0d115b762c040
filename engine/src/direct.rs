//! Entry points that bypass the streaming setup.

use tracing::instrument;

use crate::config::Dimensions;
use crate::element::Element;
use crate::engine::{TransposeEngine, TransposeReport};
use crate::error::{ConfigError, TransposeError};
use crate::memory::OutputMemory;
use crate::stream::{SliceSource, StreamSource};

/// Scatters every stream element straight to its transposed address, without buffering.
///
/// Each element is a separate single-element write with a stride of `rows` between consecutive
/// writes, so nothing can be coalesced. Useful as a reference and as a baseline for the tiled
/// engine. Returns the number of elements written.
#[instrument(level = "debug", skip_all, fields(dims = %dims))]
pub fn transpose_direct<E, S, O>(
    dims: Dimensions,
    stream: &mut S,
    out: &mut O,
) -> Result<usize, TransposeError>
where
    E: Element,
    S: StreamSource<E> + ?Sized,
    O: OutputMemory<E> + ?Sized,
{
    let Dimensions { rows, cols } = dims;
    if rows == 0 || cols == 0 {
        return Err(ConfigError::ZeroDimension { rows, cols }.into());
    }
    let len = rows
        .checked_mul(cols)
        .ok_or(ConfigError::ShapeOverflow { rows, cols })?;
    if out.len() < len {
        return Err(ConfigError::OutputTooSmall {
            required: len,
            available: out.len(),
        }
        .into());
    }

    for r in 0..rows {
        for c in 0..cols {
            let value = stream
                .read()
                .ok_or_else(|| TransposeError::StreamUnderrun {
                    expected: len,
                    consumed: stream.consumed(),
                })?;
            out.write(c * rows + r, value)?;
        }
    }
    Ok(len)
}

/// Transposes a row-major matrix of the given `width` already held in memory.
///
/// The values are streamed through `engine`, so the usual capacity and remainder rules apply.
pub fn transpose_in_memory<E: Element>(
    engine: &mut TransposeEngine<E>,
    values: &[E],
    width: usize,
    out: &mut [E],
) -> Result<TransposeReport, TransposeError> {
    if width == 0 || values.len() % width != 0 {
        return Err(ConfigError::RaggedInput {
            len: values.len(),
            width,
        }
        .into());
    }
    let dims = Dimensions::new(values.len() / width, width);
    engine.transpose(dims, &mut SliceSource::new(values), out)
}

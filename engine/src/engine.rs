use alloc::vec;
use alloc::vec::Vec;

use tracing::{debug, instrument, trace, warn};

use crate::buffer::PingPongBuffers;
use crate::config::{Dimensions, EngineConfig};
use crate::element::Element;
use crate::error::{ConfigError, TransposeError};
use crate::join::join;
use crate::loader::TileLoader;
use crate::mapper::AddressMapper;
use crate::memory::OutputMemory;
use crate::scheduler::PingPongScheduler;
use crate::store::{DrainStats, TileStore};
use crate::stream::StreamSource;

/// Summary of a completed run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TransposeReport {
    pub dims: Dimensions,
    pub tile_size: usize,
    /// Tile rows passed through the ping-pong buffers.
    pub bands: usize,
    pub tiles: usize,
    pub iterations: usize,
    pub elements_read: usize,
    pub elements_written: usize,
    pub bursts: usize,
}

/// Tiled, double-buffered streaming transpose.
///
/// Both tile buffers are allocated once here and reused by every run. A run consumes a
/// `rows x cols` row-major stream and leaves its transpose, a `cols x rows` row-major matrix, in
/// output memory.
#[derive(Debug)]
pub struct TransposeEngine<E> {
    config: EngineConfig,
    buffers: PingPongBuffers<E>,
    /// Gathers one tile column before it is written as a burst.
    burst: Vec<E>,
}

impl<E: Element> TransposeEngine<E> {
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        let capacity = config.buffer_capacity()?;
        if !fits_in_allocation::<E>(capacity) || !fits_in_allocation::<E>(config.tile_size) {
            return Err(ConfigError::CapacityOverflow {
                tile_size: config.tile_size,
                max_cols: config.max_cols,
            });
        }
        debug!(
            tile_size = config.tile_size,
            max_cols = config.max_cols,
            capacity,
            "allocating tile buffers"
        );
        Ok(Self {
            config,
            buffers: PingPongBuffers::new(capacity),
            burst: vec![E::default(); config.tile_size],
        })
    }

    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Elements held by each of the two tile buffers.
    #[must_use]
    pub fn buffer_capacity(&self) -> usize {
        self.buffers.capacity()
    }

    /// Transposes the `dims`-shaped matrix delivered by `stream` into `out`.
    ///
    /// Configuration problems are reported before the first read. Otherwise exactly
    /// `dims.len()` elements are read and each of the first `dims.len()` output addresses is
    /// written exactly once. On error the output contents are undefined.
    #[instrument(skip_all, fields(dims = %dims, tile_size = self.config.tile_size))]
    pub fn transpose<S, O>(
        &mut self,
        dims: Dimensions,
        stream: &mut S,
        out: &mut O,
    ) -> Result<TransposeReport, TransposeError>
    where
        S: StreamSource<E> + Send + ?Sized,
        O: OutputMemory<E> + Send + ?Sized,
    {
        self.config.validate(dims)?;
        if out.len() < dims.len() {
            return Err(ConfigError::OutputTooSmall {
                required: dims.len(),
                available: out.len(),
            }
            .into());
        }

        let mapper = AddressMapper::new(dims, self.config.tile_size);
        self.buffers.reset();
        let result = self.run(mapper, stream, out);
        self.buffers.reset();

        match &result {
            Ok(report) => debug!(
                bands = report.bands,
                bursts = report.bursts,
                "transpose complete"
            ),
            Err(err) => warn!(%err, "transpose aborted"),
        }
        result
    }

    fn run<S, O>(
        &mut self,
        mapper: AddressMapper,
        stream: &mut S,
        out: &mut O,
    ) -> Result<TransposeReport, TransposeError>
    where
        S: StreamSource<E> + Send + ?Sized,
        O: OutputMemory<E> + Send + ?Sized,
    {
        let loader = TileLoader::new(mapper);
        let store = TileStore::new(mapper);
        let scheduler = PingPongScheduler::new(mapper.row_blocks());
        let mut report = TransposeReport {
            dims: mapper.dimensions(),
            tile_size: mapper.tile_size(),
            bands: mapper.row_blocks(),
            tiles: 0,
            iterations: 0,
            elements_read: 0,
            elements_written: 0,
            bursts: 0,
        };

        for step in scheduler {
            trace!(
                iteration = step.iteration,
                filling = %step.filling,
                fill = ?step.fill_row_block,
                drain = ?step.drain_row_block,
                "ping-pong step"
            );
            let (fill_buffer, drain_buffer) = self.buffers.split(step.filling);
            debug_assert_ne!(fill_buffer.id(), drain_buffer.id());
            let burst = self.burst.as_mut_slice();

            let (loaded, drained) = join(
                || match step.fill_row_block {
                    Some(row_block) => loader.load(&mut *stream, fill_buffer, row_block),
                    None => Ok(0),
                },
                || match step.drain_row_block {
                    Some(row_block) => {
                        debug_assert_eq!(
                            drain_buffer.contents().map(|(held, _)| held),
                            Some(row_block)
                        );
                        store.drain(drain_buffer, burst, &mut *out)
                    }
                    None => Ok(DrainStats::default()),
                },
            );

            let drained = drained?;
            report.elements_read += loaded?;
            report.elements_written += drained.elements;
            report.bursts += drained.bursts;
            report.tiles += drained.tiles;
            report.iterations += 1;
        }

        debug_assert_eq!(report.elements_read, mapper.dimensions().len());
        debug_assert_eq!(report.elements_written, mapper.dimensions().len());
        debug_assert_eq!(report.tiles, mapper.total_tiles());
        Ok(report)
    }
}

/// Whether `len` elements of `E` stay within the `isize::MAX` byte limit of a `Vec<E>`.
fn fits_in_allocation<E>(len: usize) -> bool {
    len.checked_mul(size_of::<E>())
        .is_some_and(|bytes| bytes <= isize::MAX as usize)
}

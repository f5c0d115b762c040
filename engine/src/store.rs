use tracing::error;

use crate::buffer::TileBuffer;
use crate::element::Element;
use crate::error::TransposeError;
use crate::mapper::AddressMapper;
use crate::memory::OutputMemory;

/// Counters for one drained tile row.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DrainStats {
    pub tiles: usize,
    pub elements: usize,
    pub bursts: usize,
}

/// Writes a buffered tile row to output memory in transposed order.
///
/// Tiles are drained left to right. Inside a tile the walk is column-major: for each local column
/// the `tile_height` elements of that column are gathered into one burst, and since they land on
/// consecutive destination addresses `c * rows + r .. c * rows + r + tile_height` the burst is a
/// single contiguous write.
#[derive(Copy, Clone, Debug)]
pub struct TileStore {
    mapper: AddressMapper,
}

impl TileStore {
    #[must_use]
    pub const fn new(mapper: AddressMapper) -> Self {
        Self { mapper }
    }

    /// Drains `buffer` into `out` and releases it.
    ///
    /// `burst` is scratch space of at least one tile edge. An empty buffer is a no-op.
    pub fn drain<E, O>(
        &self,
        buffer: &mut TileBuffer<E>,
        burst: &mut [E],
        out: &mut O,
    ) -> Result<DrainStats, TransposeError>
    where
        E: Element,
        O: OutputMemory<E> + ?Sized,
    {
        let mut stats = DrainStats::default();
        let Some((row_block, values)) = buffer.contents() else {
            return Ok(stats);
        };
        debug_assert_eq!(values.len(), self.mapper.band_len(row_block));

        let height = self.mapper.tile_height(row_block);
        let burst = &mut burst[..height];
        for col_block in 0..self.mapper.col_blocks() {
            for local_col in 0..self.mapper.tile_width(col_block) {
                for (local_row, slot) in burst.iter_mut().enumerate() {
                    *slot = values[self.mapper.band_offset(col_block, local_row, local_col)];
                }
                let dest = self.mapper.dest_offset(row_block, col_block, 0, local_col);
                out.write_burst(dest, burst).map_err(|err| {
                    error!(row_block, col_block, local_col, %err, "output rejected burst");
                    TransposeError::StoreFailure(err)
                })?;
                stats.elements += height;
                stats.bursts += 1;
            }
            stats.tiles += 1;
        }

        buffer.release();
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;
    use crate::buffer::BufferId;
    use crate::config::Dimensions;
    use crate::error::StoreError;

    /// Records every burst it receives.
    struct Recorder {
        len: usize,
        bursts: Vec<(usize, Vec<u32>)>,
    }

    impl OutputMemory<u32> for Recorder {
        fn len(&self) -> usize {
            self.len
        }

        fn write_burst(&mut self, offset: usize, values: &[u32]) -> Result<(), StoreError> {
            self.bursts.push((offset, values.to_vec()));
            Ok(())
        }
    }

    #[test]
    fn single_tile_is_transposed_column_by_column() {
        let mapper = AddressMapper::new(Dimensions::new(4, 4), 4);
        let store = TileStore::new(mapper);
        let mut buffer = TileBuffer::new(BufferId::Pong, 16);
        buffer.claim(0, 16).copy_from_slice(&(0..16).collect::<Vec<u32>>());
        let mut burst = vec![0; 4];
        let mut out = vec![0u32; 16];

        let stats = store.drain(&mut buffer, &mut burst, out.as_mut_slice()).unwrap();
        assert_eq!(out, [0, 4, 8, 12, 1, 5, 9, 13, 2, 6, 10, 14, 3, 7, 11, 15]);
        assert_eq!(
            stats,
            DrainStats {
                tiles: 1,
                elements: 16,
                bursts: 4
            }
        );
        assert!(buffer.is_empty());
    }

    #[test]
    fn bursts_are_contiguous_runs_of_tile_height() {
        // Second tile row of an 8x8 matrix with 4x4 tiles.
        let mapper = AddressMapper::new(Dimensions::new(8, 8), 4);
        let store = TileStore::new(mapper);
        let mut buffer = TileBuffer::new(BufferId::Ping, 32);
        buffer
            .claim(1, 32)
            .copy_from_slice(&(32..64).collect::<Vec<u32>>());
        let mut burst = vec![0; 4];
        let mut out = Recorder {
            len: 64,
            bursts: Vec::new(),
        };

        store.drain(&mut buffer, &mut burst, &mut out).unwrap();
        assert_eq!(out.bursts.len(), 8);
        for (c, (offset, values)) in out.bursts.iter().enumerate() {
            assert_eq!(*offset, c * 8 + 4);
            let column: Vec<u32> = (4..8).map(|r| (r * 8 + c) as u32).collect();
            assert_eq!(values, &column);
        }
    }

    #[test]
    fn clamped_edge_tiles() {
        // 3x5 matrix, 2x2 tiles: the last tile row is 1 high, the last tile column 1 wide.
        let dims = Dimensions::new(3, 5);
        let mapper = AddressMapper::new(dims, 2);
        let store = TileStore::new(mapper);
        let mut buffer = TileBuffer::new(BufferId::Ping, 10);
        buffer.claim(1, 5).copy_from_slice(&[10, 11, 12, 13, 14]);
        let mut burst = vec![0; 2];
        let mut out = vec![u32::MAX; dims.len()];

        let stats = store.drain(&mut buffer, &mut burst, out.as_mut_slice()).unwrap();
        assert_eq!((stats.tiles, stats.elements, stats.bursts), (3, 5, 5));
        for c in 0..5 {
            assert_eq!(out[c * 3 + 2], 10 + c as u32);
        }
        assert_eq!(out.iter().filter(|&&v| v != u32::MAX).count(), 5);
    }

    #[test]
    fn rejected_write_is_fatal() {
        let mapper = AddressMapper::new(Dimensions::new(4, 4), 4);
        let store = TileStore::new(mapper);
        let mut buffer = TileBuffer::new(BufferId::Ping, 16);
        buffer.claim(0, 16);
        let mut burst = vec![0u32; 4];
        let mut out = vec![0u32; 8];

        assert_eq!(
            store.drain(&mut buffer, &mut burst, out.as_mut_slice()),
            Err(TransposeError::StoreFailure(StoreError::OutOfBounds {
                offset: 8,
                len: 4,
                capacity: 8
            }))
        );
    }

    #[test]
    fn empty_buffer_is_a_no_op() {
        let mapper = AddressMapper::new(Dimensions::new(4, 4), 4);
        let store = TileStore::new(mapper);
        let mut buffer = TileBuffer::<u32>::new(BufferId::Ping, 16);
        let mut out = vec![0u32; 16];
        let stats = store.drain(&mut buffer, &mut [0; 4], out.as_mut_slice());
        assert_eq!(stats, Ok(DrainStats::default()));
    }
}

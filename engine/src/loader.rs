use tracing::warn;

use crate::buffer::TileBuffer;
use crate::element::Element;
use crate::error::TransposeError;
use crate::mapper::AddressMapper;
use crate::stream::StreamSource;

/// Consumes one tile row at a time from the stream into the filling buffer.
///
/// The stream is row-major, so the `tile_height * cols` elements of a tile row arrive as
/// `tile_height` complete matrix rows. They are stored in that arrival order, which places each
/// element at local row then local column of its tile within the buffered row.
#[derive(Copy, Clone, Debug)]
pub struct TileLoader {
    mapper: AddressMapper,
}

impl TileLoader {
    #[must_use]
    pub const fn new(mapper: AddressMapper) -> Self {
        Self { mapper }
    }

    /// Fills `buffer` with tile row `row_block`, returning the number of elements read.
    ///
    /// Reads exactly [`AddressMapper::band_len`] elements. If the stream runs dry first the run is
    /// over: the shortfall is reported and nothing is padded.
    pub fn load<E, S>(
        &self,
        stream: &mut S,
        buffer: &mut TileBuffer<E>,
        row_block: usize,
    ) -> Result<usize, TransposeError>
    where
        E: Element,
        S: StreamSource<E> + ?Sized,
    {
        let len = self.mapper.band_len(row_block);
        let slots = buffer.claim(row_block, len);
        for slot in slots.iter_mut() {
            match stream.read() {
                Some(value) => *slot = value,
                None => {
                    let expected = self.mapper.dimensions().len();
                    let consumed = stream.consumed();
                    warn!(row_block, consumed, expected, "stream ran dry mid tile row");
                    return Err(TransposeError::StreamUnderrun { expected, consumed });
                }
            }
        }
        Ok(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::BufferId;
    use crate::config::Dimensions;
    use crate::stream::IterSource;

    #[test]
    fn fills_tile_row_in_arrival_order() {
        let mapper = AddressMapper::new(Dimensions::new(4, 6), 2);
        let loader = TileLoader::new(mapper);
        let mut buffer = TileBuffer::new(BufferId::Ping, 12);
        let mut stream = IterSource::new(0u32..24);

        assert_eq!(loader.load(&mut stream, &mut buffer, 0), Ok(12));
        let (row_block, values) = buffer.contents().unwrap();
        assert_eq!(row_block, 0);
        assert_eq!(values, (0..12).collect::<alloc::vec::Vec<_>>());

        // Element (1, 3) is local (1, 1) of tile column 1.
        assert_eq!(values[mapper.band_offset(1, 1, 1)], 9);

        assert_eq!(loader.load(&mut stream, &mut buffer, 1), Ok(12));
        assert_eq!(buffer.contents().unwrap().1[0], 12);
        assert_eq!(stream.consumed(), 24);
    }

    #[test]
    fn partial_tile_row_reads_only_what_remains() {
        let mapper = AddressMapper::new(Dimensions::new(5, 3), 2);
        let loader = TileLoader::new(mapper);
        let mut buffer = TileBuffer::new(BufferId::Pong, 6);
        let mut stream = IterSource::new(0u8..100);

        loader.load(&mut stream, &mut buffer, 0).unwrap();
        loader.load(&mut stream, &mut buffer, 1).unwrap();
        assert_eq!(loader.load(&mut stream, &mut buffer, 2), Ok(3));
        assert_eq!(buffer.contents(), Some((2, &[12, 13, 14][..])));
        assert_eq!(stream.consumed(), 15);
    }

    #[test]
    fn underrun_is_reported_not_padded() {
        let mapper = AddressMapper::new(Dimensions::new(4, 4), 4);
        let loader = TileLoader::new(mapper);
        let mut buffer = TileBuffer::new(BufferId::Ping, 16);
        let mut stream = IterSource::new(0u16..10);

        assert_eq!(
            loader.load(&mut stream, &mut buffer, 0),
            Err(TransposeError::StreamUnderrun {
                expected: 16,
                consumed: 10
            })
        );
    }
}

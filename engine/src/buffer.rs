use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use crate::element::Element;

/// Identifies one of the two buffers of a [`PingPongBuffers`] pool.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BufferId {
    Ping,
    Pong,
}

impl BufferId {
    /// The opposite buffer.
    #[must_use]
    #[inline]
    pub const fn other(self) -> Self {
        match self {
            Self::Ping => Self::Pong,
            Self::Pong => Self::Ping,
        }
    }

    #[must_use]
    #[inline]
    const fn index(self) -> usize {
        match self {
            Self::Ping => 0,
            Self::Pong => 1,
        }
    }
}

impl fmt::Display for BufferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ping => f.write_str("ping"),
            Self::Pong => f.write_str("pong"),
        }
    }
}

/// Fixed-capacity storage for one buffered tile row.
///
/// Holds the tile row it was last filled with until it is drained and released.
#[derive(Clone)]
pub struct TileBuffer<E> {
    id: BufferId,
    values: Vec<E>,
    /// Tile row currently held, and the number of elements it occupies.
    held: Option<(usize, usize)>,
}

impl<E: Element> TileBuffer<E> {
    #[must_use]
    pub fn new(id: BufferId, capacity: usize) -> Self {
        Self {
            id,
            values: vec![E::default(); capacity],
            held: None,
        }
    }

    #[must_use]
    pub const fn id(&self) -> BufferId {
        self.id
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.held.is_none()
    }

    /// Claims the first `len` slots for tile row `row_block` and hands them out for filling.
    ///
    /// # Panics
    /// Panics if `len` exceeds the capacity. Configuration validation rules this out.
    pub fn claim(&mut self, row_block: usize, len: usize) -> &mut [E] {
        assert!(
            len <= self.values.len(),
            "tile row of {len} elements overflows {} buffer of capacity {}",
            self.id,
            self.values.len()
        );
        self.held = Some((row_block, len));
        &mut self.values[..len]
    }

    /// The tile row held by this buffer, if any.
    #[must_use]
    pub fn contents(&self) -> Option<(usize, &[E])> {
        self.held
            .map(|(row_block, len)| (row_block, &self.values[..len]))
    }

    /// Marks the buffer as free. The stale values stay in place and are overwritten by the next
    /// claim.
    pub fn release(&mut self) {
        self.held = None;
    }
}

impl<E> fmt::Debug for TileBuffer<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TileBuffer")
            .field("id", &self.id)
            .field("capacity", &self.values.len())
            .field("held", &self.held)
            .finish()
    }
}

/// The two tile buffers alternated between the loader and the store.
#[derive(Clone, Debug)]
pub struct PingPongBuffers<E> {
    buffers: [TileBuffer<E>; 2],
}

impl<E: Element> PingPongBuffers<E> {
    /// Allocates both buffers up front; they are reused for every run.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            buffers: [
                TileBuffer::new(BufferId::Ping, capacity),
                TileBuffer::new(BufferId::Pong, capacity),
            ],
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffers[0].capacity()
    }

    #[must_use]
    pub fn get(&self, id: BufferId) -> &TileBuffer<E> {
        &self.buffers[id.index()]
    }

    /// Splits the pool into `(filling, draining)` halves.
    ///
    /// The two borrows are disjoint, so the loader and the store can never touch the same
    /// buffer at once.
    pub fn split(&mut self, filling: BufferId) -> (&mut TileBuffer<E>, &mut TileBuffer<E>) {
        let (ping, pong) = self.buffers.split_at_mut(1);
        match filling {
            BufferId::Ping => (&mut ping[0], &mut pong[0]),
            BufferId::Pong => (&mut pong[0], &mut ping[0]),
        }
    }

    /// Releases both buffers so no tile row leaks into the next run.
    pub fn reset(&mut self) {
        self.buffers.iter_mut().for_each(TileBuffer::release);
    }
}

//! Ordered, read-once element sources.

/// A one-directional stream of elements in row-major order.
///
/// There is no random access and no re-delivery: each call to [`read`](Self::read) yields the
/// next element exactly once. Implementations may block until the producer has data.
pub trait StreamSource<E> {
    /// Next element, or `None` once the producer is exhausted.
    fn read(&mut self) -> Option<E>;

    /// Number of elements handed out so far.
    fn consumed(&self) -> usize;
}

impl<E, S: StreamSource<E> + ?Sized> StreamSource<E> for &mut S {
    #[inline]
    fn read(&mut self) -> Option<E> {
        (**self).read()
    }

    #[inline]
    fn consumed(&self) -> usize {
        (**self).consumed()
    }
}

/// Streams the items of an iterator.
#[derive(Clone, Debug)]
pub struct IterSource<I> {
    iter: I,
    consumed: usize,
}

impl<I: Iterator> IterSource<I> {
    pub fn new(iter: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            iter: iter.into_iter(),
            consumed: 0,
        }
    }
}

impl<I: Iterator> StreamSource<I::Item> for IterSource<I> {
    #[inline]
    fn read(&mut self) -> Option<I::Item> {
        let item = self.iter.next()?;
        self.consumed += 1;
        Some(item)
    }

    #[inline]
    fn consumed(&self) -> usize {
        self.consumed
    }
}

/// Streams a row-major matrix already resident in memory.
#[derive(Clone, Debug)]
pub struct SliceSource<'a, E> {
    values: &'a [E],
    cursor: usize,
}

impl<'a, E> SliceSource<'a, E> {
    #[must_use]
    pub const fn new(values: &'a [E]) -> Self {
        Self { values, cursor: 0 }
    }

    /// Elements not yet read.
    #[must_use]
    pub fn remaining(&self) -> &'a [E] {
        &self.values[self.cursor..]
    }
}

impl<E: Copy> StreamSource<E> for SliceSource<'_, E> {
    #[inline]
    fn read(&mut self) -> Option<E> {
        let value = *self.values.get(self.cursor)?;
        self.cursor += 1;
        Some(value)
    }

    #[inline]
    fn consumed(&self) -> usize {
        self.cursor
    }
}

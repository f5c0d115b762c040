//! Random-access output regions.

use crate::error::StoreError;

/// A linear, randomly addressable region the transposed matrix is written into.
pub trait OutputMemory<E> {
    /// Number of addressable elements.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Writes `values` to the consecutive addresses starting at `offset`.
    ///
    /// Either the whole burst is accepted or an error is returned; a rejected burst is fatal for
    /// the run.
    fn write_burst(&mut self, offset: usize, values: &[E]) -> Result<(), StoreError>;

    /// Writes a single element.
    #[inline]
    fn write(&mut self, offset: usize, value: E) -> Result<(), StoreError> {
        self.write_burst(offset, core::slice::from_ref(&value))
    }
}

impl<E: Copy> OutputMemory<E> for [E] {
    #[inline]
    fn len(&self) -> usize {
        <[E]>::len(self)
    }

    #[inline]
    fn write_burst(&mut self, offset: usize, values: &[E]) -> Result<(), StoreError> {
        let capacity = <[E]>::len(self);
        let dst = offset
            .checked_add(values.len())
            .and_then(|end| self.get_mut(offset..end))
            .ok_or(StoreError::OutOfBounds {
                offset,
                len: values.len(),
                capacity,
            })?;
        dst.copy_from_slice(values);
        Ok(())
    }
}

impl<E, M: OutputMemory<E> + ?Sized> OutputMemory<E> for &mut M {
    #[inline]
    fn len(&self) -> usize {
        (**self).len()
    }

    #[inline]
    fn write_burst(&mut self, offset: usize, values: &[E]) -> Result<(), StoreError> {
        (**self).write_burst(offset, values)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn slice_accepts_in_bounds_bursts() {
        let mut out = vec![0u32; 6];
        out.write_burst(2, &[5, 6, 7]).unwrap();
        out.write(0, 9).unwrap();
        assert_eq!(out, [9, 0, 5, 6, 7, 0]);
    }

    #[test]
    fn slice_rejects_overflowing_bursts() {
        let mut out = vec![0u32; 4];
        assert_eq!(
            out.write_burst(3, &[1, 2]),
            Err(StoreError::OutOfBounds {
                offset: 3,
                len: 2,
                capacity: 4
            })
        );
        assert!(out.write(usize::MAX, 1).is_err());
        assert_eq!(out, [0; 4]);
    }
}
